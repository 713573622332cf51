//! Rounds in flight: homing bullets and arcing mortar shells.

use std::f32::consts::PI;

use bevy::prelude::*;

use super::explosion::spawn_explosion;
use crate::gameplay::combat::{land_hit, step_toward};
use crate::gameplay::economy::{Income, Money};
use crate::gameplay::zombies::Zombie;
use crate::gameplay::{Condemned, Health, Radius, field_position};

// === Constants ===

const HOMING_SPEED: f32 = 500.0;
const SHELL_SPEED: f32 = 200.0;

/// Peak height of a shell's arc, for drawing only.
const SHELL_APEX: f32 = 100.0;

/// Blast radius of a landing shell.
const SHELL_BLAST_RADIUS: f32 = 80.0;

// === Components ===

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Flight {
    /// Chases `target` until contact. Fizzles if the target is gone.
    Homing { target: Entity },
    /// Lerps from `origin` to the fixed `target` point and bursts there.
    Arcing {
        origin: Vec2,
        target: Vec2,
        progress: f32,
        total_distance: f32,
        /// Height above the ground track, `sin(progress * PI) * 100`.
        altitude: f32,
    },
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub damage: f32,
    pub speed: f32,
    pub flight: Flight,
}

pub fn spawn_homing(
    commands: &mut Commands,
    origin: Vec2,
    target: Entity,
    damage: f32,
    radius: f32,
) -> Entity {
    spawn_projectile(
        commands,
        origin,
        radius,
        Projectile {
            damage,
            speed: HOMING_SPEED,
            flight: Flight::Homing { target },
        },
    )
}

/// Fires a shell at a point. The point is captured now; the shell never
/// follows whatever was standing there.
pub fn spawn_arcing(
    commands: &mut Commands,
    origin: Vec2,
    target: Vec2,
    damage: f32,
    radius: f32,
) -> Entity {
    spawn_projectile(
        commands,
        origin,
        radius,
        Projectile {
            damage,
            speed: SHELL_SPEED,
            flight: Flight::Arcing {
                origin,
                target,
                progress: 0.0,
                total_distance: origin.distance(target),
                altitude: 0.0,
            },
        },
    )
}

fn spawn_projectile(
    commands: &mut Commands,
    origin: Vec2,
    radius: f32,
    projectile: Projectile,
) -> Entity {
    commands
        .spawn((
            Name::new("Projectile"),
            projectile,
            Radius(radius),
            Condemned::default(),
            Transform::from_translation(origin.extend(0.0)),
        ))
        .id()
}

// === Systems ===

pub(super) fn update_projectiles(
    time: Res<Time>,
    mut commands: Commands,
    mut money: ResMut<Money>,
    mut projectiles: Query<
        (&mut Projectile, &mut Transform, &Radius, &mut Condemned),
        Without<Zombie>,
    >,
    mut zombies: Query<
        (&Transform, &Radius, &mut Health, &mut Condemned, &Zombie),
        Without<Projectile>,
    >,
) {
    let dt = time.delta_secs();

    for (mut projectile, mut transform, radius, mut spent) in &mut projectiles {
        if spent.is_condemned() {
            continue;
        }
        let position = field_position(&transform);
        let step = projectile.speed * dt;
        let flight = projectile.flight;

        match flight {
            Flight::Homing { target } => {
                let Ok((target_transform, target_radius, mut health, mut flag, zombie)) =
                    zombies.get_mut(target)
                else {
                    spent.condemn();
                    continue;
                };
                if flag.is_condemned() {
                    spent.condemn();
                    continue;
                }
                let aim = field_position(target_transform);
                let distance = position.distance(aim);
                if distance < radius.0 + target_radius.0 {
                    if land_hit(&mut health, &mut flag, projectile.damage) {
                        money.credit(Income::Kill, zombie.reward);
                    }
                    spent.condemn();
                    continue;
                }
                let next = step_toward(position, aim, step.min(distance));
                transform.translation = next.extend(transform.translation.z);
            }
            Flight::Arcing {
                origin,
                target,
                progress,
                total_distance,
                ..
            } => {
                let progress = if total_distance > 0.0 {
                    progress + step / total_distance
                } else {
                    1.0
                };
                if progress >= 1.0 {
                    spawn_explosion(&mut commands, target, SHELL_BLAST_RADIUS, projectile.damage);
                    spent.condemn();
                    continue;
                }
                let ground = origin.lerp(target, progress);
                transform.translation = ground.extend(transform.translation.z);
                projectile.flight = Flight::Arcing {
                    origin,
                    target,
                    progress,
                    total_distance,
                    altitude: (progress * PI).sin() * SHELL_APEX,
                };
            }
        }
    }
}
