//! Purchased strikes: a fuse, then a burst of explosions.
//!
//! Staggered blasts wait in [`StrikeSchedule`] against the simulation clock
//! and go off in order.

use bevy::prelude::*;

use super::explosion::spawn_explosion;
use crate::gameplay::spawn::SimRng;
use crate::gameplay::{Condemned, field_position};

// === Constants ===

const AIRSTRIKE_BLASTS: usize = 5;
const AIRSTRIKE_SCATTER: f32 = 150.0;
const AIRSTRIKE_RADIUS: f32 = 120.0;
const AIRSTRIKE_DAMAGE: f32 = 500.0;

const STRAFE_BLASTS: usize = 10;
/// Offset of the first strafe blast from the call point.
const STRAFE_START: f32 = -200.0;
const STRAFE_SPACING: f32 = 40.0;
const STRAFE_INTERVAL: f32 = 0.05;
const STRAFE_RADIUS: f32 = 40.0;
const STRAFE_DAMAGE: f32 = 100.0;

// === Support Kinds ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SupportKind {
    /// Scattered heavy bombs around the call point.
    Airstrike,
    /// A left-to-right line of light blasts.
    StrafingRun,
}

impl SupportKind {
    pub const ALL: &[Self] = &[Self::Airstrike, Self::StrafingRun];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Airstrike => "airstrike",
            Self::StrafingRun => "strafing_run",
        }
    }

    /// Seconds between the call and the first blast.
    #[must_use]
    pub const fn fuse(self) -> f32 {
        match self {
            Self::Airstrike => 1.5,
            Self::StrafingRun => 0.5,
        }
    }
}

// === Components and Resources ===

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SupportCall {
    pub kind: SupportKind,
    pub fuse: Timer,
    pub executed: bool,
}

/// One blast waiting for the clock.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PendingBlast {
    pub at: f32,
    pub center: Vec2,
    pub radius: f32,
    pub damage: f32,
}

/// Blasts scheduled for later frames, and the clock they are measured on.
/// The clock only runs while the simulation does.
#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct StrikeSchedule {
    pub clock: f32,
    pub pending: Vec<PendingBlast>,
}

impl StrikeSchedule {
    /// Queues a blast `delay` seconds from now.
    pub fn schedule(&mut self, delay: f32, center: Vec2, radius: f32, damage: f32) {
        self.pending.push(PendingBlast {
            at: self.clock + delay,
            center,
            radius,
            damage,
        });
    }

    pub fn advance_clock(&mut self, dt: f32) {
        self.clock += dt;
    }

    /// Removes every blast now due, in schedule order.
    pub fn take_due(&mut self) -> Vec<PendingBlast> {
        let clock = self.clock;
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|blast| blast.at <= clock);
        self.pending = waiting;
        due
    }
}

pub fn spawn_support_call(commands: &mut Commands, kind: SupportKind, position: Vec2) -> Entity {
    commands
        .spawn((
            Name::new(kind.key()),
            SupportCall {
                kind,
                fuse: Timer::from_seconds(kind.fuse(), TimerMode::Once),
                executed: false,
            },
            Condemned::default(),
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

// === Systems ===

pub(super) fn update_support_calls(
    time: Res<Time>,
    mut commands: Commands,
    mut rng: ResMut<SimRng>,
    mut schedule: ResMut<StrikeSchedule>,
    mut calls: Query<(&mut SupportCall, &Transform, &mut Condemned)>,
) {
    let dt = time.delta_secs();
    schedule.advance_clock(dt);

    for (mut call, transform, mut condemned) in &mut calls {
        if !call.fuse.tick(time.delta()).just_finished() || call.executed {
            continue;
        }
        let center = field_position(transform);
        match call.kind {
            SupportKind::Airstrike => {
                for _ in 0..AIRSTRIKE_BLASTS {
                    let offset = Vec2::new(
                        rng.centered(AIRSTRIKE_SCATTER),
                        rng.centered(AIRSTRIKE_SCATTER),
                    );
                    spawn_explosion(
                        &mut commands,
                        center + offset,
                        AIRSTRIKE_RADIUS,
                        AIRSTRIKE_DAMAGE,
                    );
                }
            }
            SupportKind::StrafingRun => {
                for i in 0..STRAFE_BLASTS {
                    #[allow(clippy::cast_precision_loss)]
                    let step = i as f32;
                    let x = STRAFE_SPACING.mul_add(step, center.x + STRAFE_START);
                    schedule.schedule(
                        STRAFE_INTERVAL * step,
                        Vec2::new(x, center.y),
                        STRAFE_RADIUS,
                        STRAFE_DAMAGE,
                    );
                }
            }
        }
        call.executed = true;
        condemned.condemn();
        info!(kind = call.kind.key(), ?center, "Support call executed");
    }
}

pub(super) fn drain_strike_schedule(mut commands: Commands, mut schedule: ResMut<StrikeSchedule>) {
    for blast in schedule.take_due() {
        spawn_explosion(&mut commands, blast.center, blast.radius, blast.damage);
    }
}
