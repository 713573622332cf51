//! Short-lived actors: projectiles, explosions, support calls and particles.

pub mod explosion;
pub mod particles;
pub mod projectile;
pub mod support;

use bevy::prelude::*;

use crate::{GameSet, gameplay_running};

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<projectile::Projectile>()
        .register_type::<explosion::Explosion>()
        .register_type::<support::SupportCall>()
        .register_type::<support::StrikeSchedule>()
        .register_type::<particles::Particle>()
        .init_resource::<support::StrikeSchedule>();

    // Blasts queued this frame detonate this frame.
    app.add_systems(
        Update,
        (
            particles::update_particles,
            projectile::update_projectiles,
            support::update_support_calls,
            support::drain_strike_schedule,
            explosion::update_explosions,
        )
            .chain()
            .in_set(GameSet::Effects)
            .run_if(gameplay_running),
    );
}
