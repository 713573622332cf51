//! Zombie siege: a road-defense survival simulation.
//!
//! The crate owns the per-frame simulation only. A presentation layer reads
//! the entities and the [`gameplay::hud::Scoreboard`] and feeds placement
//! messages back in.

pub mod config;
pub mod gameplay;
#[cfg(test)]
pub mod testing;

use bevy::prelude::*;

use gameplay::session::SessionPhase;

/// Ordered stages of one simulation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Preparation countdown and game-over detection.
    Phase,
    /// Placement commands from the input layer.
    Input,
    /// Random arrivals, wave progression, passive income.
    Spawn,
    Defenders,
    Zombies,
    Civilians,
    /// Particles, projectiles, support calls, explosions.
    Effects,
    /// Cross-collection collisions, reaping and the despawn pass.
    Cleanup,
    /// Read-only snapshots for the presentation layer.
    Hud,
}

/// Run condition: the simulation is live (past the head start, not over).
pub fn gameplay_running(phase: Res<SessionPhase>) -> bool {
    matches!(*phase, SessionPhase::Running)
}

/// Run condition: the session is not over.
pub fn session_open(phase: Res<SessionPhase>) -> bool {
    !matches!(*phase, SessionPhase::GameOver)
}

/// Installs the full simulation. Insert a [`config::SimConfig`] before adding
/// this plugin to override the defaults.
pub fn plugin(app: &mut App) {
    app.init_resource::<config::SimConfig>();

    app.configure_sets(
        Update,
        (
            GameSet::Phase,
            GameSet::Input,
            GameSet::Spawn,
            GameSet::Defenders,
            GameSet::Zombies,
            GameSet::Civilians,
            GameSet::Effects,
            GameSet::Cleanup,
            GameSet::Hud,
        )
            .chain(),
    );

    app.add_plugins(gameplay::plugin);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn running_condition_tracks_phase() {
        let mut app = App::new();
        app.insert_resource(SessionPhase::Preparing);
        assert!(!app.world_mut().run_system_once(gameplay_running).unwrap());

        app.insert_resource(SessionPhase::Running);
        assert!(app.world_mut().run_system_once(gameplay_running).unwrap());

        app.insert_resource(SessionPhase::GameOver);
        assert!(!app.world_mut().run_system_once(gameplay_running).unwrap());
        assert!(!app.world_mut().run_system_once(session_open).unwrap());
    }
}
