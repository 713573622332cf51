//! Civilians walking the road toward the city, and their rescue.

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::gameplay::economy::{Income, Money};
use crate::gameplay::session::WaveProgress;
use crate::gameplay::zombies::Zombie;
use crate::gameplay::{Condemned, Radius, field_position};
use crate::{GameSet, gameplay_running};

// === Constants ===

pub const CIVILIAN_RADIUS: f32 = 12.0;
pub const CIVILIAN_SPEED: f32 = 65.0;

/// Zombies closer than this make a civilian sidestep.
pub const PANIC_DISTANCE: f32 = 100.0;

/// Sidestep speed as a fraction of walking speed.
const DODGE_FACTOR: f32 = 0.5;

// === Components ===

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Civilian {
    pub speed: f32,
}

/// Spawn a civilian, pulled onto the road if `position` is off it.
pub fn spawn_civilian(commands: &mut Commands, config: &SimConfig, position: Vec2) -> Entity {
    let position = Vec2::new(position.x, config.clamp_to_road(position.y));
    commands
        .spawn((
            Name::new("Civilian"),
            Civilian {
                speed: CIVILIAN_SPEED,
            },
            Radius(CIVILIAN_RADIUS),
            Condemned::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

/// Vertical step away from a zombie at `threat_y`, or `None` when the step
/// would leave the open road band.
fn dodge(y: f32, threat_y: f32, step: f32, road: (f32, f32)) -> Option<f32> {
    let direction = if y - threat_y > 0.0 { 1.0 } else { -1.0 };
    let next = y + direction * step;
    (next > road.0 && next < road.1).then_some(next)
}

// === Systems ===

/// Walks every civilian right, dodging nearby zombies. Runs in `GameSet::Civilians`.
fn update_civilians(
    time: Res<Time>,
    config: Res<SimConfig>,
    mut progress: ResMut<WaveProgress>,
    mut money: ResMut<Money>,
    mut civilians: Query<(&mut Transform, &Civilian, &mut Condemned), Without<Zombie>>,
    zombies: Query<(&Transform, &Condemned), With<Zombie>>,
) {
    let dt = time.delta_secs();
    let road = (config.road_top, config.road_bottom);

    for (mut transform, civilian, mut condemned) in &mut civilians {
        if condemned.is_condemned() {
            continue;
        }
        let mut position = field_position(&transform);
        position.x += civilian.speed * dt;

        let step = civilian.speed * DODGE_FACTOR * dt;
        for (zombie_transform, zombie_condemned) in &zombies {
            if zombie_condemned.is_condemned() {
                continue;
            }
            let threat = field_position(zombie_transform);
            if position.distance(threat) < PANIC_DISTANCE
                && let Some(y) = dodge(position.y, threat.y, step, road)
            {
                position.y = y;
            }
        }

        transform.translation.x = position.x;
        transform.translation.y = position.y;

        if position.x > config.field_width {
            progress.rescued += 1;
            money.credit(Income::Rescue, config.rescue_reward);
            condemned.condemn();
            debug!(rescued = progress.rescued, "Civilian reached the city");
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Civilian>();

    app.add_systems(
        Update,
        update_civilians
            .in_set(GameSet::Civilians)
            .run_if(gameplay_running),
    );
}
