//! Testing utilities for the simulation plugins.

#![cfg(test)]

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

use crate::GameSet;
use crate::config::SimConfig;
use crate::gameplay::session::GameOver;

/// Every `GameOver` message seen so far.
#[derive(Resource, Debug, Default)]
pub struct GameOverLog(pub Vec<GameOver>);

fn collect_game_over(mut messages: MessageReader<GameOver>, mut log: ResMut<GameOverLog>) {
    log.0.extend(messages.read().copied());
}

/// Configuration with no head start, no random arrivals and a fixed seed.
pub fn test_config() -> SimConfig {
    SimConfig {
        prep_time: 0.0,
        zombie_spawn_chance: 0.0,
        zombie_spawn_chance_per_wave: 0.0,
        civilian_spawn_chance: 0.0,
        seed: Some(7),
        ..SimConfig::default()
    }
}

/// Builds an app running the full simulation with a manually driven clock.
pub fn create_sim_test_app(config: SimConfig) -> App {
    let mut app = App::new();
    app.insert_resource(config);
    app.init_resource::<Time>();
    app.add_plugins(crate::plugin);
    app.init_resource::<GameOverLog>();
    app.add_systems(Update, collect_game_over.in_set(GameSet::Hud));
    app
}

/// Runs one frame that is `secs` long.
pub fn advance(app: &mut App, secs: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(secs));
    app.update();
}

/// Runs `frames` frames of `secs` each.
pub fn advance_frames(app: &mut App, frames: usize, secs: f32) {
    for _ in 0..frames {
        advance(app, secs);
    }
}

/// Leaves `timer` one nanosecond short of finishing, so any positive delta
/// completes it.
pub fn nearly_expire_timer(timer: &mut Timer) {
    let duration = timer.duration();
    timer.set_elapsed(duration - Duration::from_nanos(1));
}

/// Number of entities matching `F`.
pub fn count_entities<F: QueryFilter>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<Entity, F>().iter(world).count()
}

pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    assert_eq!(
        count_entities::<F>(app),
        expected,
        "unexpected entity count for {}",
        std::any::type_name::<F>()
    );
}

/// Field position of `entity`.
pub fn position_of(app: &App, entity: Entity) -> Vec2 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation.truncate())
        .expect("entity has no transform")
}

/// Runs a `spawn_*` helper against the world and applies its commands.
pub fn spawn_with(app: &mut App, spawn: impl FnOnce(&mut Commands) -> Entity) -> Entity {
    let world = app.world_mut();
    let entity = spawn(&mut world.commands());
    world.flush();
    entity
}
