//! End-of-tick bookkeeping: late collisions, reaping, and the single despawn pass.

use bevy::prelude::*;

use crate::gameplay::civilians::Civilian;
use crate::gameplay::combat::in_contact;
use crate::gameplay::economy::{Income, Money};
use crate::gameplay::effects::particles::{ParticleKind, spawn_particle};
use crate::gameplay::spawn::SimRng;
use crate::gameplay::zombies::Zombie;
use crate::gameplay::{Condemned, Health, Radius, field_position};
use crate::{GameSet, gameplay_running};

// === Systems ===

/// Catches civilians that ended the frame touching a zombie.
fn civilian_contact(
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut civilians: Query<(&Transform, &Radius, &mut Condemned), (With<Civilian>, Without<Zombie>)>,
    zombies: Query<(&Transform, &Radius, &Condemned), With<Zombie>>,
) {
    for (transform, radius, mut condemned) in &mut civilians {
        if condemned.is_condemned() {
            continue;
        }
        let position = field_position(transform);
        let caught = zombies.iter().any(|(z_transform, z_radius, z_condemned)| {
            !z_condemned.is_condemned()
                && in_contact(position, radius.0, field_position(z_transform), z_radius.0)
        });
        if caught {
            condemned.condemn();
            spawn_particle(&mut commands, &mut rng, position, ParticleKind::Blood);
        }
    }
}

/// Condemns anything at or below zero health. Zombies worn down without a
/// killing blow (barbed wire) pay their bounty here.
fn reap_depleted(
    mut money: ResMut<Money>,
    mut fallen: Query<(&Health, &mut Condemned, Option<&Zombie>)>,
) {
    for (health, mut condemned, zombie) in &mut fallen {
        if condemned.is_condemned() || !health.is_depleted() {
            continue;
        }
        condemned.condemn();
        if let Some(zombie) = zombie {
            money.credit(Income::Kill, zombie.reward);
        }
    }
}

fn despawn_condemned(mut commands: Commands, condemned: Query<(Entity, &Condemned)>) {
    for (entity, flag) in &condemned {
        if flag.is_condemned() {
            commands.entity(entity).despawn();
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (civilian_contact, reap_depleted, despawn_condemned)
            .chain()
            .in_set(GameSet::Cleanup)
            .run_if(gameplay_running),
    );
}
