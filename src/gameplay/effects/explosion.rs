//! Area blasts. Damage lands once, on the first update; the fireball lingers
//! for the renderer until its life runs out.

use bevy::prelude::*;

use super::particles::{ParticleKind, spawn_particle};
use crate::gameplay::combat::land_hit;
use crate::gameplay::economy::{Income, Money};
use crate::gameplay::hud::ScreenShake;
use crate::gameplay::spawn::SimRng;
use crate::gameplay::zombies::Zombie;
use crate::gameplay::{Condemned, Health, field_position};

/// Seconds a fireball stays on screen.
pub const EXPLOSION_LIFE: f32 = 0.5;

const FIRE_PARTICLES: usize = 15;
const EXPLOSION_SHAKE: f32 = 10.0;

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Explosion {
    pub radius: f32,
    pub damage: f32,
    /// Time left on screen. Starts ticking on the detonation frame.
    pub life: Timer,
    /// Set once the blast has hit everything in range.
    pub detonated: bool,
}

pub fn spawn_explosion(commands: &mut Commands, center: Vec2, radius: f32, damage: f32) -> Entity {
    commands
        .spawn((
            Name::new("Explosion"),
            Explosion {
                radius,
                damage,
                life: Timer::from_seconds(EXPLOSION_LIFE, TimerMode::Once),
                detonated: false,
            },
            Condemned::default(),
            Transform::from_translation(center.extend(0.0)),
        ))
        .id()
}

pub(super) fn update_explosions(
    time: Res<Time>,
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut money: ResMut<Money>,
    mut shake: ResMut<ScreenShake>,
    mut explosions: Query<(&mut Explosion, &Transform, &mut Condemned), Without<Zombie>>,
    mut zombies: Query<(&Transform, &mut Health, &mut Condemned, &Zombie), Without<Explosion>>,
) {
    for (mut explosion, transform, mut condemned) in &mut explosions {
        if explosion.life.tick(time.delta()).just_finished() {
            condemned.condemn();
        }
        if explosion.detonated {
            continue;
        }

        let center = field_position(transform);
        let mut kills = 0;
        for (zombie_transform, mut health, mut flag, zombie) in &mut zombies {
            if center.distance(field_position(zombie_transform)) < explosion.radius
                && land_hit(&mut health, &mut flag, explosion.damage)
            {
                money.credit(Income::Kill, zombie.reward);
                kills += 1;
            }
        }
        for _ in 0..FIRE_PARTICLES {
            spawn_particle(&mut commands, &mut rng, center, ParticleKind::Fire);
        }
        shake.kick(EXPLOSION_SHAKE);
        explosion.detonated = true;
        debug!(?center, radius = explosion.radius, kills, "Explosion");
    }
}
