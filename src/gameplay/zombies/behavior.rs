//! Per-frame zombie turn: pick the nearest victim, chase or bite, hold the siege line.

use bevy::prelude::*;

use super::Zombie;
use crate::config::SimConfig;
use crate::gameplay::civilians::Civilian;
use crate::gameplay::combat::{land_hit, nearest_within, step_toward};
use crate::gameplay::defenders::{Defender, DefenderKind};
use crate::gameplay::hud::ScreenShake;
use crate::gameplay::session::CityGate;
use crate::gameplay::{Condemned, Health, Radius, field_position};

/// Camera shake when a civilian is caught.
const CIVILIAN_CAUGHT_SHAKE: f32 = 5.0;

/// What a zombie is going after this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Victim {
    Defender(Entity),
    Civilian(Entity),
}

/// Runs every zombie's turn. Runs in `GameSet::Zombies`.
pub(super) fn update_zombies(
    time: Res<Time>,
    config: Res<SimConfig>,
    mut gate: ResMut<CityGate>,
    mut shake: ResMut<ScreenShake>,
    mut zombies: Query<(&mut Transform, &Radius, &mut Zombie, &Condemned)>,
    mut defenders: Query<
        (Entity, &DefenderKind, &Transform, &Radius, &mut Health, &mut Condemned),
        (With<Defender>, Without<Zombie>),
    >,
    mut civilians: Query<
        (Entity, &Transform, &Radius, &mut Condemned),
        (With<Civilian>, Without<Zombie>, Without<Defender>),
    >,
) {
    let dt = time.delta_secs();
    let siege_line = config.siege_line();

    for (mut transform, radius, mut zombie, condemned) in &mut zombies {
        if condemned.is_condemned() {
            continue;
        }
        let origin = field_position(&transform);
        let speed = zombie.effective_speed();

        // Defenders are offered first, so a tie goes to the defender.
        let defender_victims = defenders
            .iter()
            .filter(|(_, kind, .., flag)| kind.targetable_by_zombies() && !flag.is_condemned())
            .map(|(entity, _, t, r, ..)| (Victim::Defender(entity), field_position(t), r.0));
        let civilian_victims = civilians
            .iter()
            .filter(|(.., flag)| !flag.is_condemned())
            .map(|(entity, t, r, _)| (Victim::Civilian(entity), field_position(t), r.0));
        let victim = nearest_within(
            origin,
            defender_victims
                .chain(civilian_victims)
                .map(|candidate| (candidate, candidate.1)),
            f32::INFINITY,
        );

        let mut next = origin;
        match victim {
            Some(((_, target_position, target_radius), distance))
                if distance > radius.0 + target_radius =>
            {
                next = step_toward(origin, target_position, speed * dt);
            }
            Some(((Victim::Defender(entity), ..), _)) => {
                if let Ok((.., mut health, mut flag)) = defenders.get_mut(entity) {
                    land_hit(&mut health, &mut flag, zombie.damage * dt);
                }
            }
            Some(((Victim::Civilian(entity), ..), _)) => {
                if let Ok((.., mut flag)) = civilians.get_mut(entity) {
                    flag.condemn();
                    shake.kick(CIVILIAN_CAUGHT_SHAKE);
                }
            }
            None => next.x += speed * dt,
        }

        if next.x > siege_line {
            next.x = siege_line;
            gate.breach(config.siege_damage_per_sec * time.delta_secs_f64());
        }
        transform.translation.x = next.x;
        transform.translation.y = next.y;
        zombie.snared = false;
    }
}
