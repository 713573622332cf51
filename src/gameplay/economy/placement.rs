//! Placement commands from the input layer: arm, place, cancel, pointer tracking.

use bevy::prelude::*;
use thiserror::Error;

use super::{Money, Placeable};
use crate::gameplay::defenders::spawn_defender;
use crate::gameplay::effects::support::spawn_support_call;
use crate::gameplay::hud::ScreenShake;
use crate::gameplay::session::SessionPhase;
use crate::{GameSet, session_open};

/// Camera shake when a support call is radioed in.
const SUPPORT_CALL_SHAKE: f32 = 5.0;

// === Messages ===

/// Select a placeable for repeated placement (a shop button press).
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmPlacement(pub Placeable);

/// Put `kind` at `position`, paying its cost.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PlacementCommand {
    pub position: Vec2,
    pub kind: Placeable,
}

/// Leave placement mode.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelPlacement;

/// Pointer moved over the field. Only feeds the placement preview.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PointerMoved(pub Vec2);

// === Errors ===

/// Why a placement was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PlacementError {
    #[error("need {cost} money, have {balance}")]
    InsufficientFunds { cost: f64, balance: f64 },

    #[error("the session is over")]
    SessionOver,
}

// === Resources ===

/// Current placement selection and pointer position, for preview rendering.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlacementMode {
    pub armed: Option<Placeable>,
    pub pointer: Vec2,
}

// === Helpers ===

/// Charges for and spawns one placeable.
pub fn try_place(
    commands: &mut Commands,
    money: &mut Money,
    phase: SessionPhase,
    command: PlacementCommand,
) -> Result<Entity, PlacementError> {
    if phase == SessionPhase::GameOver {
        return Err(PlacementError::SessionOver);
    }
    let cost = command.kind.cost();
    if !money.spend(cost) {
        return Err(PlacementError::InsufficientFunds {
            cost,
            balance: money.balance,
        });
    }
    let entity = match command.kind {
        Placeable::Defender(kind) => spawn_defender(commands, kind, command.position),
        Placeable::Support(kind) => spawn_support_call(commands, kind, command.position),
    };
    Ok(entity)
}

// === Systems ===

fn track_pointer(mut moves: MessageReader<PointerMoved>, mut mode: ResMut<PlacementMode>) {
    if let Some(PointerMoved(position)) = moves.read().last() {
        mode.pointer = *position;
    }
}

fn arm_placement(
    mut arms: MessageReader<ArmPlacement>,
    mut cancels: MessageReader<CancelPlacement>,
    money: Res<Money>,
    mut mode: ResMut<PlacementMode>,
) {
    for ArmPlacement(kind) in arms.read() {
        if money.can_afford(kind.cost()) {
            mode.armed = Some(*kind);
        }
    }
    if cancels.read().count() > 0 {
        mode.armed = None;
    }
}

fn handle_placement(
    mut commands: Commands,
    mut requests: MessageReader<PlacementCommand>,
    phase: Res<SessionPhase>,
    mut money: ResMut<Money>,
    mut mode: ResMut<PlacementMode>,
    mut shake: ResMut<ScreenShake>,
) {
    for request in requests.read() {
        match try_place(&mut commands, &mut money, *phase, *request) {
            Ok(entity) => {
                debug!(?entity, kind = ?request.kind, "Placed");
                if let Placeable::Support(_) = request.kind {
                    shake.kick(SUPPORT_CALL_SHAKE);
                    mode.armed = None;
                }
            }
            Err(err) => {
                warn!(kind = ?request.kind, "Placement refused: {err}");
                mode.armed = None;
            }
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<PlacementMode>()
        .init_resource::<PlacementMode>()
        .add_message::<ArmPlacement>()
        .add_message::<PlacementCommand>()
        .add_message::<CancelPlacement>()
        .add_message::<PointerMoved>();

    // Placement keeps running after game over so late requests are refused
    // through `try_place`.
    app.add_systems(
        Update,
        (
            (track_pointer, arm_placement).run_if(session_open),
            handle_placement,
        )
            .chain()
            .in_set(GameSet::Input),
    );
}
