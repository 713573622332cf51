//! Session lifecycle: head start, city gate, wave progression, game over.

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::gameplay::economy::{Income, Money};
use crate::gameplay::hud::ScreenShake;
use crate::{GameSet, gameplay_running};

/// Camera shake when a new wave begins.
const WAVE_SHAKE: f32 = 15.0;

// === Resources ===

/// Where the session is in its lifecycle. `GameOver` is terminal.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub enum SessionPhase {
    /// Head start: nothing moves, placements are accepted.
    Preparing,
    Running,
    GameOver,
}

impl FromWorld for SessionPhase {
    fn from_world(world: &mut World) -> Self {
        if prep_time(world) > 0.0 {
            Self::Preparing
        } else {
            Self::Running
        }
    }
}

/// Counts down the head start while the session is [`SessionPhase::Preparing`].
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct HeadStart(pub Timer);

impl FromWorld for HeadStart {
    fn from_world(world: &mut World) -> Self {
        Self(Timer::from_seconds(prep_time(world).max(0.0), TimerMode::Once))
    }
}

fn prep_time(world: &World) -> f32 {
    world
        .get_resource::<SimConfig>()
        .map_or_else(|| SimConfig::default().prep_time, |c| c.prep_time)
}

/// Health of the city gate. Zombies held at the siege line wear it down.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct CityGate {
    pub health: f64,
    pub max: f64,
}

impl FromWorld for CityGate {
    fn from_world(world: &mut World) -> Self {
        let max = world
            .get_resource::<SimConfig>()
            .map_or_else(|| SimConfig::default().city_health, |c| c.city_health);
        Self { health: max, max }
    }
}

impl CityGate {
    pub fn breach(&mut self, amount: f64) {
        self.health -= amount;
    }

    #[must_use]
    pub fn has_fallen(&self) -> bool {
        self.health <= 0.0
    }
}

/// Wave number and rescued-civilian count.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct WaveProgress {
    pub wave: u32,
    pub rescued: u32,
}

impl Default for WaveProgress {
    fn default() -> Self {
        Self { wave: 1, rescued: 0 }
    }
}

impl WaveProgress {
    /// The wave the rescued count has earned: one more per `per_wave` rescues.
    #[must_use]
    pub fn earned_wave(&self, per_wave: u32) -> u32 {
        self.rescued / per_wave.max(1) + 1
    }
}

// === Messages ===

/// Written once, on the tick the session ends.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_wave: u32,
    pub rescued: u32,
}

// === Systems ===

/// Counts down the head start, then watches the gate.
fn advance_phase(
    time: Res<Time>,
    gate: Res<CityGate>,
    progress: Res<WaveProgress>,
    mut head_start: ResMut<HeadStart>,
    mut phase: ResMut<SessionPhase>,
    mut game_over: MessageWriter<GameOver>,
) {
    match *phase {
        SessionPhase::Preparing => {
            if head_start.0.tick(time.delta()).just_finished() {
                info!("Head start over, the dead are coming");
                *phase = SessionPhase::Running;
                check_gate(&gate, &progress, &mut phase, &mut game_over);
            }
        }
        SessionPhase::Running => check_gate(&gate, &progress, &mut phase, &mut game_over),
        SessionPhase::GameOver => {}
    }
}

fn check_gate(
    gate: &CityGate,
    progress: &WaveProgress,
    phase: &mut SessionPhase,
    game_over: &mut MessageWriter<GameOver>,
) {
    if !gate.has_fallen() {
        return;
    }
    *phase = SessionPhase::GameOver;
    info!(
        wave = progress.wave,
        rescued = progress.rescued,
        "City gate has fallen"
    );
    game_over.write(GameOver {
        final_wave: progress.wave,
        rescued: progress.rescued,
    });
}

/// Raises the wave when rescues earn it. Each step pays the wave bonus once.
pub(crate) fn advance_wave(
    config: Res<SimConfig>,
    mut progress: ResMut<WaveProgress>,
    mut money: ResMut<Money>,
    mut shake: ResMut<ScreenShake>,
) {
    let earned = progress.earned_wave(config.civilians_per_wave);
    if earned <= progress.wave {
        return;
    }
    let steps = earned - progress.wave;
    money.credit(Income::WaveBonus, config.wave_bonus * f64::from(steps));
    progress.wave = earned;
    shake.kick(WAVE_SHAKE);
    info!(wave = earned, "Wave advanced");
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<SessionPhase>()
        .register_type::<HeadStart>()
        .register_type::<CityGate>()
        .register_type::<WaveProgress>()
        .init_resource::<HeadStart>()
        .init_resource::<SessionPhase>()
        .init_resource::<CityGate>()
        .init_resource::<WaveProgress>()
        .add_message::<GameOver>();

    app.add_systems(Update, advance_phase.in_set(GameSet::Phase));
    app.add_systems(
        Update,
        advance_wave.in_set(GameSet::Spawn).run_if(gameplay_running),
    );
}
