//! Headless zombie siege: runs the simulation at 60 Hz, deploys a small
//! defensive line and logs the scoreboard until the city falls.
//!
//! Usage: `zombie-siege [config.ron]`

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use zombie_siege::GameSet;
use zombie_siege::config::SimConfig;
use zombie_siege::gameplay::defenders::DefenderKind;
use zombie_siege::gameplay::economy::Placeable;
use zombie_siege::gameplay::economy::placement::PlacementCommand;
use zombie_siege::gameplay::hud::Scoreboard;
use zombie_siege::gameplay::session::GameOver;

const TICK_RATE: f64 = 60.0;
const REPORT_INTERVAL: f32 = 5.0;

/// Opening deployment, spent from the starting money.
const DEMO_LINE: &[(DefenderKind, f32, f32)] = &[
    (DefenderKind::Sniper, 800.0, 300.0),
    (DefenderKind::Soldier, 650.0, 220.0),
    (DefenderKind::Soldier, 650.0, 300.0),
    (DefenderKind::Soldier, 650.0, 380.0),
    (DefenderKind::Medic, 720.0, 300.0),
    (DefenderKind::Barbwire, 560.0, 260.0),
    (DefenderKind::Barbwire, 560.0, 340.0),
];

#[derive(Resource)]
struct ReportTimer(Timer);

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            TICK_RATE.recip(),
        ))),
        LogPlugin::default(),
    ));

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => {
                info!(%path, "Loaded config");
                config
            }
            Err(err) => {
                error!("{err}");
                return AppExit::error();
            }
        },
        None => SimConfig::default(),
    };

    app.insert_resource(config)
        .add_plugins(zombie_siege::plugin)
        .insert_resource(ReportTimer(Timer::from_seconds(
            REPORT_INTERVAL,
            TimerMode::Repeating,
        )))
        .add_systems(Startup, deploy_demo_line)
        .add_systems(
            Update,
            (report_scoreboard, exit_on_game_over).after(GameSet::Hud),
        )
        .run()
}

fn deploy_demo_line(mut placements: MessageWriter<PlacementCommand>) {
    for &(kind, x, y) in DEMO_LINE {
        placements.write(PlacementCommand {
            position: Vec2::new(x, y),
            kind: Placeable::Defender(kind),
        });
    }
}

fn report_scoreboard(time: Res<Time>, mut timer: ResMut<ReportTimer>, board: Res<Scoreboard>) {
    if timer.0.tick(time.delta()).just_finished() {
        info!(
            money = board.money,
            wave = board.wave,
            rescued = board.rescued,
            city = board.city_health,
            "Scoreboard"
        );
    }
}

fn exit_on_game_over(mut game_over: MessageReader<GameOver>, mut exit: MessageWriter<AppExit>) {
    if let Some(summary) = game_over.read().last() {
        info!(
            wave = summary.final_wave,
            rescued = summary.rescued,
            "The city has fallen"
        );
        exit.write(AppExit::Success);
    }
}
