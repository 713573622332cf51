//! Full-session tests driving the public plugin the way a presentation layer would.

mod session;

use std::time::Duration;

use bevy::prelude::*;
use zombie_siege::config::SimConfig;

/// Builds an app with the whole simulation and a hand-driven clock.
pub fn create_session_app(config: SimConfig) -> App {
    let mut app = App::new();
    app.insert_resource(config);
    app.init_resource::<Time>();
    app.add_plugins(zombie_siege::plugin);
    app
}

pub fn run_frames(app: &mut App, frames: usize, secs: f32) {
    for _ in 0..frames {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }
}

/// A busy road: frequent arrivals, no head start, fixed seed.
pub fn busy_config(seed: u64) -> SimConfig {
    SimConfig {
        prep_time: 0.0,
        zombie_spawn_chance: 0.05,
        civilian_spawn_chance: 0.05,
        seed: Some(seed),
        ..SimConfig::default()
    }
}
