//! Random arrivals at the left edge of the field, and the session's RNG.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SimConfig;
use crate::gameplay::civilians::spawn_civilian;
use crate::gameplay::session::{WaveProgress, advance_wave};
use crate::gameplay::zombies::{ZombieKind, spawn_zombie};
use crate::{GameSet, gameplay_running};

// === Resources ===

/// The single random source of a session. Seeded from [`SimConfig::seed`]
/// when set, so a run can be replayed exactly.
#[derive(Resource, Debug)]
pub struct SimRng(StdRng);

impl FromWorld for SimRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<SimConfig>().and_then(|c| c.seed);
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self(StdRng::from_os_rng()),
        }
    }
}

impl SimRng {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }

    /// Uniform in `[-span / 2, span / 2)`.
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.unit() - 0.5) * span
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }
}

// === Systems ===

/// Rolls for one zombie and one civilian arrival per frame.
fn spawn_arrivals(
    mut commands: Commands,
    config: Res<SimConfig>,
    progress: Res<WaveProgress>,
    mut rng: ResMut<SimRng>,
) {
    #[allow(clippy::cast_precision_loss)]
    let zombie_chance =
        config.zombie_spawn_chance + progress.wave as f32 * config.zombie_spawn_chance_per_wave;
    let (top, bottom) = config.spawn_band();

    if rng.chance(zombie_chance) {
        let kind = ZombieKind::roll(rng.unit());
        let y = rng.unit().mul_add(bottom - top, top);
        let entity = spawn_zombie(
            &mut commands,
            kind,
            Vec2::new(config.spawn_x, y),
            progress.wave,
        );
        debug!(?entity, ?kind, wave = progress.wave, "Zombie arrived");
    }

    if rng.chance(config.civilian_spawn_chance) {
        let y = rng.unit().mul_add(bottom - top, top);
        spawn_civilian(&mut commands, &config, Vec2::new(config.spawn_x, y));
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<SimRng>();

    app.add_systems(
        Update,
        spawn_arrivals
            .in_set(GameSet::Spawn)
            .before(advance_wave)
            .run_if(gameplay_running),
    );
}


#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::gameplay::civilians::Civilian;
    use crate::gameplay::zombies::Zombie;
    use crate::testing::{advance, count_entities, create_sim_test_app, test_config};
    use pretty_assertions::assert_eq;

    #[test]
    fn certain_zombie_arrival_spawns_inside_the_band() {
        let mut app = create_sim_test_app(SimConfig {
            zombie_spawn_chance: 1.0,
            ..test_config()
        });

        advance(&mut app, 0.0);

        assert_eq!(count_entities::<With<Zombie>>(&mut app), 1);
        let config = app.world().resource::<SimConfig>().clone();
        let (top, bottom) = config.spawn_band();
        let mut zombies = app.world_mut().query_filtered::<&Transform, With<Zombie>>();
        for transform in zombies.iter(app.world()) {
            assert_eq!(transform.translation.x, config.spawn_x);
            assert!((top..bottom).contains(&transform.translation.y));
        }
    }

    #[test]
    fn civilians_arrive_on_the_road() {
        let mut app = create_sim_test_app(SimConfig {
            civilian_spawn_chance: 1.0,
            ..test_config()
        });

        for _ in 0..20 {
            advance(&mut app, 0.0);
        }

        assert_eq!(count_entities::<With<Civilian>>(&mut app), 20);
        let config = app.world().resource::<SimConfig>().clone();
        let mut civilians = app
            .world_mut()
            .query_filtered::<&Transform, With<Civilian>>();
        for transform in civilians.iter(app.world()) {
            assert!((config.road_top..=config.road_bottom).contains(&transform.translation.y));
        }
    }

    #[test]
    fn nothing_spawns_during_head_start() {
        let mut app = create_sim_test_app(SimConfig {
            prep_time: 5.0,
            zombie_spawn_chance: 1.0,
            civilian_spawn_chance: 1.0,
            ..test_config()
        });

        for _ in 0..10 {
            advance(&mut app, 0.1);
        }

        assert_eq!(count_entities::<With<Zombie>>(&mut app), 0);
        assert_eq!(count_entities::<With<Civilian>>(&mut app), 0);
    }
}
