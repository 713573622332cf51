//! Per-frame defender turn: reloads, mines, barbed wire, medics, gunfire.

use bevy::prelude::*;

use super::{Defender, DefenderKind, FireControl, Magazine, Tactic};
use crate::gameplay::combat::{in_contact, nearest_within};
use crate::gameplay::effects::explosion::spawn_explosion;
use crate::gameplay::effects::projectile::{spawn_arcing, spawn_homing};
use crate::gameplay::zombies::Zombie;
use crate::gameplay::{Condemned, Health, Radius, field_position};

/// Blast of a triggered mine. Its listed damage is only the shop figure;
/// the blast itself wipes everything it reaches.
const MINE_BLAST_RADIUS: f32 = 100.0;
const MINE_BLAST_DAMAGE: f32 = 9999.0;

type SquadQuery<'w, 's> = Query<
    'w,
    's,
    (Entity, &'static Transform, &'static mut Health, &'static mut Condemned),
    (With<Defender>, Without<Zombie>),
>;

type HordeQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static Radius,
        &'static mut Health,
        &'static mut Zombie,
        &'static Condemned,
    ),
    Without<Defender>,
>;

/// Runs every defender's turn once, in query order. That order follows
/// archetypes and table rows, not spawn order. Runs in `GameSet::Defenders`.
pub(super) fn update_defenders(
    time: Res<Time>,
    mut commands: Commands,
    mut defenders: Query<
        (
            Entity,
            &DefenderKind,
            &Transform,
            &Radius,
            &mut FireControl,
            Option<&mut Magazine>,
        ),
        (With<Defender>, Without<Zombie>),
    >,
    mut squad: SquadQuery<'_, '_>,
    mut horde: HordeQuery<'_, '_>,
) {
    let dt = time.delta_secs();

    for (entity, kind, transform, radius, mut fire, mut magazine) in &mut defenders {
        if let Some(magazine) = magazine.as_mut().filter(|m| m.is_reloading()) {
            magazine.tick_reload(time.delta());
            continue;
        }
        let origin = field_position(transform);

        match kind.tactic() {
            Tactic::Inert => {}
            Tactic::Mine => {
                let triggered = live_zombies(&horde)
                    .any(|(_, position)| origin.distance(position) < fire.range);
                if triggered {
                    spawn_explosion(&mut commands, origin, MINE_BLAST_RADIUS, MINE_BLAST_DAMAGE);
                    if let Ok((.., mut condemned)) = squad.get_mut(entity) {
                        condemned.condemn();
                    }
                    debug!(?entity, "Mine triggered");
                }
            }
            Tactic::Barbwire => {
                for (_, zombie_transform, zombie_radius, mut health, mut zombie, condemned) in
                    &mut horde
                {
                    if condemned.is_condemned() {
                        continue;
                    }
                    let position = field_position(zombie_transform);
                    if in_contact(origin, radius.0, position, zombie_radius.0) {
                        zombie.snared = true;
                        health.take(fire.damage * dt);
                    }
                }
            }
            Tactic::Medic => {
                fire.since_last_action += dt;
                if !fire.is_ready() {
                    continue;
                }
                let patient = nearest_within(
                    origin,
                    squad
                        .iter()
                        .filter(|(other, _, health, condemned)| {
                            *other != entity && health.is_wounded() && !condemned.is_condemned()
                        })
                        .map(|(other, t, ..)| (other, field_position(t))),
                    fire.range,
                );
                if let Some((patient, _)) = patient
                    && let Ok((_, _, mut health, _)) = squad.get_mut(patient)
                {
                    health.heal(fire.damage);
                    fire.since_last_action = 0.0;
                }
            }
            Tactic::DirectFire { arcing } => {
                fire.since_last_action += dt;
                if !fire.is_ready() {
                    continue;
                }
                let Some((target, _)) = nearest_within(origin, live_zombies(&horde), fire.range)
                else {
                    continue;
                };
                let Ok((_, target_transform, ..)) = horde.get(target) else {
                    continue;
                };
                let size = kind.projectile_radius();
                if arcing {
                    let aim = field_position(target_transform);
                    spawn_arcing(&mut commands, origin, aim, fire.damage, size);
                } else {
                    spawn_homing(&mut commands, origin, target, fire.damage, size);
                }
                fire.since_last_action = 0.0;
                if let Some(magazine) = magazine.as_mut() {
                    magazine.expend();
                    if magazine.is_reloading() {
                        debug!(?entity, "Magazine empty, reloading");
                    }
                }
            }
        }
    }
}

/// Zombies still in play, with their positions, in iteration order.
fn live_zombies(horde: &HordeQuery<'_, '_>) -> impl Iterator<Item = (Entity, Vec2)> {
    horde
        .iter()
        .filter(|(.., condemned)| !condemned.is_condemned())
        .map(|(entity, transform, ..)| (entity, field_position(transform)))
}
