use bevy::prelude::*;
use pretty_assertions::assert_eq;
use zombie_siege::config::SimConfig;
use zombie_siege::gameplay::defenders::DefenderKind;
use zombie_siege::gameplay::economy::placement::PlacementCommand;
use zombie_siege::gameplay::economy::{Money, Placeable};
use zombie_siege::gameplay::hud::Scoreboard;
use zombie_siege::gameplay::session::{CityGate, SessionPhase};
use zombie_siege::gameplay::zombies::Zombie;

use crate::{busy_config, create_session_app, run_frames};

fn place(app: &mut App, kind: DefenderKind, x: f32, y: f32) {
    app.world_mut().write_message(PlacementCommand {
        position: Vec2::new(x, y),
        kind: Placeable::Defender(kind),
    });
}

fn deploy_line(app: &mut App) {
    place(app, DefenderKind::Soldier, 600.0, 250.0);
    place(app, DefenderKind::Soldier, 600.0, 350.0);
    place(app, DefenderKind::Mine, 400.0, 300.0);
    place(app, DefenderKind::Barbwire, 500.0, 300.0);
    place(app, DefenderKind::Medic, 650.0, 300.0);
}

#[test]
fn ledger_accounts_for_every_coin() {
    let mut app = create_session_app(busy_config(11));
    deploy_line(&mut app);

    run_frames(&mut app, 1800, 1.0 / 30.0);

    let money = app.world().resource::<Money>();
    assert_eq!(money.ledger.spent, 50.0 + 50.0 + 50.0 + 30.0 + 100.0);
    let drift = (money.balance - money.starting) - money.ledger.net();
    assert!(drift.abs() < 0.5, "ledger drifted by {drift}");
}

#[test]
fn same_seed_same_session() {
    let mut first = create_session_app(busy_config(99));
    let mut second = create_session_app(busy_config(99));
    deploy_line(&mut first);
    deploy_line(&mut second);

    run_frames(&mut first, 900, 1.0 / 30.0);
    run_frames(&mut second, 900, 1.0 / 30.0);

    assert_eq!(
        *first.world().resource::<Scoreboard>(),
        *second.world().resource::<Scoreboard>()
    );
}

#[test]
fn game_over_freezes_the_field() {
    let mut app = create_session_app(SimConfig {
        city_health: 1.0,
        zombie_spawn_chance: 0.2,
        ..busy_config(5)
    });

    for _ in 0..600 {
        run_frames(&mut app, 1, 0.1);
        if *app.world().resource::<SessionPhase>() == SessionPhase::GameOver {
            break;
        }
    }
    assert_eq!(
        *app.world().resource::<SessionPhase>(),
        SessionPhase::GameOver
    );

    let snapshot = |app: &mut App| -> Vec<Vec2> {
        let mut zombies = app
            .world_mut()
            .query_filtered::<&Transform, With<Zombie>>();
        zombies
            .iter(app.world())
            .map(|t| t.translation.truncate())
            .collect()
    };
    let before = snapshot(&mut app);
    let gate = app.world().resource::<CityGate>().health;
    run_frames(&mut app, 30, 0.1);

    assert_eq!(snapshot(&mut app), before);
    assert_eq!(app.world().resource::<CityGate>().health, gate);
    let board = *app.world().resource::<Scoreboard>();
    assert!(board.game_over);
    assert_eq!(board.city_health, 0);
}

#[test]
fn placements_wait_out_the_head_start() {
    let mut app = create_session_app(SimConfig {
        prep_time: 2.0,
        ..busy_config(3)
    });
    deploy_line(&mut app);

    run_frames(&mut app, 10, 0.1);

    let board = *app.world().resource::<Scoreboard>();
    assert_eq!(board.money, 500 - 280);
    assert_eq!(
        *app.world().resource::<SessionPhase>(),
        SessionPhase::Preparing
    );
}

#[test]
fn partial_config_file_overrides_only_named_fields() {
    let config = SimConfig::from_ron_str("(starting_money: 1200.0, seed: Some(4))").unwrap();
    let app = create_session_app(config);

    assert_eq!(app.world().resource::<Money>().balance, 1200.0);
    assert_eq!(app.world().resource::<CityGate>().health, 100.0);
}

#[test]
fn shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.ron");
    let config = SimConfig::load(path).unwrap();

    assert_eq!(config, SimConfig::default());
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = SimConfig::load("/nonexistent/siege.ron").unwrap_err();

    assert!(matches!(err, zombie_siege::config::ConfigError::Io { .. }));
}
