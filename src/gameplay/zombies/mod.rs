//! Zombie components, level-scaled stats and the spawn helper.

mod behavior;

use bevy::prelude::*;

use crate::gameplay::{Condemned, Health, Radius};
use crate::{GameSet, gameplay_running};

/// Speed multiplier while caught in barbed wire.
pub const SNARE_FACTOR: f32 = 0.5;

// === Zombie Kinds ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ZombieKind {
    Regular,
    Runner,
    Brute,
}

/// Stats for a zombie kind at a given wave level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZombieStats {
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    /// Damage per second of contact.
    pub damage: f32,
    /// Money paid for the kill.
    pub reward: f64,
}

impl ZombieKind {
    pub const ALL: &[Self] = &[Self::Regular, Self::Runner, Self::Brute];

    /// Picks a kind from a uniform roll in `[0, 1)`: one in ten is a brute,
    /// two in ten are runners.
    #[must_use]
    pub fn roll(r: f32) -> Self {
        if r < 0.1 {
            Self::Brute
        } else if r < 0.3 {
            Self::Runner
        } else {
            Self::Regular
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
    pub const fn stats(self, level: u32) -> ZombieStats {
        let l = level as f32;
        let (radius, speed, health, damage, bounty) = match self {
            Self::Regular => (16.0, 35.0 + 4.0 * l, 80.0 + 20.0 * l, 15.0 + 2.0 * l, 25.0),
            Self::Runner => (14.0, 80.0 + 5.0 * l, 40.0 + 10.0 * l, 10.0 + l, 20.0),
            Self::Brute => (22.0, 20.0 + 2.0 * l, 300.0 + 50.0 * l, 40.0 + 5.0 * l, 100.0),
        };
        ZombieStats {
            radius,
            speed,
            health,
            damage,
            reward: bounty + 5.0 * level as f64,
        }
    }
}

// === Components ===

/// A zombie. Stats are frozen at spawn from the wave it arrived in.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Zombie {
    pub kind: ZombieKind,
    pub speed: f32,
    pub damage: f32,
    pub reward: f64,
    /// Set by barbed wire, cleared after the zombie moves.
    pub snared: bool,
}

impl Zombie {
    /// Speed for this frame.
    #[must_use]
    pub fn effective_speed(&self) -> f32 {
        if self.snared {
            self.speed * SNARE_FACTOR
        } else {
            self.speed
        }
    }
}

/// Spawn a zombie of `kind` scaled to `level`.
pub fn spawn_zombie(
    commands: &mut Commands,
    kind: ZombieKind,
    position: Vec2,
    level: u32,
) -> Entity {
    let stats = kind.stats(level);
    commands
        .spawn((
            Name::new(format!("{kind:?} zombie")),
            Zombie {
                kind,
                speed: stats.speed,
                damage: stats.damage,
                reward: stats.reward,
                snared: false,
            },
            Health::new(stats.health),
            Radius(stats.radius),
            Condemned::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Zombie>().register_type::<ZombieKind>();

    app.add_systems(
        Update,
        behavior::update_zombies
            .in_set(GameSet::Zombies)
            .run_if(gameplay_running),
    );
}
