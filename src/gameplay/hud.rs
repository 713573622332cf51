//! Read-only snapshots for the presentation layer: scoreboard and screen shake.

use bevy::prelude::*;

use crate::gameplay::economy::Money;
use crate::gameplay::session::{CityGate, SessionPhase, WaveProgress};
use crate::{GameSet, session_open};

/// Fraction of the shake kept each frame.
const SHAKE_DECAY: f32 = 0.9;

/// Below this the shake snaps to zero.
const SHAKE_FLOOR: f32 = 0.1;

// === Resources ===

/// Camera shake magnitude in pixels. Kicks replace the current value;
/// the renderer jitters by it and it decays once per frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct ScreenShake(f32);

impl ScreenShake {
    pub const fn kick(&mut self, magnitude: f32) {
        self.0 = magnitude;
    }

    #[must_use]
    pub const fn magnitude(self) -> f32 {
        self.0
    }

    fn decay(&mut self) {
        self.0 *= SHAKE_DECAY;
        if self.0 < SHAKE_FLOOR {
            self.0 = 0.0;
        }
    }
}

/// Numbers shown on the HUD, floored the way the player sees them.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct Scoreboard {
    pub money: i64,
    pub wave: u32,
    pub rescued: u32,
    pub city_health: u32,
    pub game_over: bool,
}

impl Scoreboard {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn capture(
        money: &Money,
        progress: &WaveProgress,
        gate: &CityGate,
        phase: SessionPhase,
    ) -> Self {
        Self {
            money: money.balance.floor() as i64,
            wave: progress.wave,
            rescued: progress.rescued,
            city_health: gate.health.floor().max(0.0) as u32,
            game_over: phase == SessionPhase::GameOver,
        }
    }
}

// === Systems ===

/// Decays last frame's shake before this frame's kicks land.
fn decay_screen_shake(mut shake: ResMut<ScreenShake>) {
    shake.decay();
}

fn refresh_scoreboard(
    money: Res<Money>,
    progress: Res<WaveProgress>,
    gate: Res<CityGate>,
    phase: Res<SessionPhase>,
    mut scoreboard: ResMut<Scoreboard>,
) {
    *scoreboard = Scoreboard::capture(&money, &progress, &gate, *phase);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<ScreenShake>()
        .register_type::<Scoreboard>()
        .init_resource::<ScreenShake>()
        .init_resource::<Scoreboard>();

    app.add_systems(
        Update,
        decay_screen_shake
            .in_set(GameSet::Phase)
            .run_if(session_open),
    );
    app.add_systems(Update, refresh_scoreboard.in_set(GameSet::Hud));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kick_replaces_magnitude() {
        let mut shake = ScreenShake::default();
        shake.kick(10.0);
        shake.kick(5.0);
        assert_eq!(shake.magnitude(), 5.0);
    }

    #[test]
    fn decay_snaps_to_zero() {
        let mut shake = ScreenShake(0.105);
        shake.decay();
        assert_eq!(shake.magnitude(), 0.0);
    }

    #[test]
    fn decay_shrinks_geometrically() {
        let mut shake = ScreenShake(10.0);
        shake.decay();
        assert!((shake.magnitude() - 9.0).abs() < 1e-5);
    }

    #[test]
    fn scoreboard_floors_and_clamps() {
        let mut money = Money::new(500.0);
        money.balance = 123.9;
        let gate = CityGate {
            health: -3.5,
            max: 100.0,
        };
        let board = Scoreboard::capture(
            &money,
            &WaveProgress {
                wave: 3,
                rescued: 11,
            },
            &gate,
            SessionPhase::GameOver,
        );
        assert_eq!(
            board,
            Scoreboard {
                money: 123,
                wave: 3,
                rescued: 11,
                city_health: 0,
                game_over: true,
            }
        );
    }

    #[test]
    fn scoreboard_floors_partial_gate_health() {
        let gate = CityGate {
            health: 57.8,
            max: 100.0,
        };
        let board = Scoreboard::capture(
            &Money::new(500.0),
            &WaveProgress::default(),
            &gate,
            SessionPhase::Running,
        );
        assert_eq!(board.city_health, 57);
        assert!(!board.game_over);
    }
}
