//! Cosmetic sparks and blood. Nothing in the simulation reads them.

use bevy::prelude::*;

use crate::gameplay::Condemned;
use crate::gameplay::spawn::SimRng;

/// Spread of the random launch velocity, per axis, in px/s.
const SCATTER: f32 = 200.0;

/// Seconds from launch until a particle has faded out.
const PARTICLE_LIFE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ParticleKind {
    Fire,
    Blood,
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Particle {
    pub kind: ParticleKind,
    pub velocity: Vec2,
    pub life: Timer,
}

impl Particle {
    /// Opacity for the renderer, from 1 down to 0.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.life.fraction_remaining()
    }
}

pub fn spawn_particle(
    commands: &mut Commands,
    rng: &mut SimRng,
    position: Vec2,
    kind: ParticleKind,
) -> Entity {
    let velocity = Vec2::new(rng.centered(SCATTER), rng.centered(SCATTER));
    commands
        .spawn((
            Particle {
                kind,
                velocity,
                life: Timer::from_seconds(PARTICLE_LIFE, TimerMode::Once),
            },
            Condemned::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

pub(super) fn update_particles(
    time: Res<Time>,
    mut particles: Query<(&mut Particle, &mut Transform, &mut Condemned)>,
) {
    let dt = time.delta_secs();
    for (mut particle, mut transform, mut condemned) in &mut particles {
        transform.translation += (particle.velocity * dt).extend(0.0);
        if particle.life.tick(time.delta()).just_finished() {
            condemned.condemn();
        }
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::testing::{advance, count_entities, create_sim_test_app, spawn_with, test_config};
    use pretty_assertions::assert_eq;

    #[test]
    fn particles_fade_out_in_half_a_second() {
        let mut app = create_sim_test_app(test_config());
        let mut rng = SimRng::seeded(5);
        spawn_with(&mut app, |commands| {
            spawn_particle(commands, &mut rng, Vec2::new(10.0, 10.0), ParticleKind::Fire)
        });

        advance(&mut app, 0.25);
        let mut particles = app.world_mut().query::<&Particle>();
        let opacity = particles.single(app.world()).unwrap().opacity();
        assert!((opacity - 0.5).abs() < 1e-4);

        advance(&mut app, 0.25);
        assert_eq!(count_entities::<With<Particle>>(&mut app), 0);
    }
}
