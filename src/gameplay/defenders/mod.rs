//! Defender components, the per-kind stat table and the spawn helper.

mod behavior;

use std::time::Duration;

use bevy::prelude::*;

use crate::gameplay::{Condemned, Health, Radius};
use crate::{GameSet, gameplay_running};

// === Constants ===

/// Seconds a turret spends refilling an empty magazine.
pub const RELOAD_TIME: f32 = 10.0;

// === Defender Kinds ===

/// Everything the player can deploy on the field.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum DefenderKind {
    Soldier,
    Sniper,
    Tank,
    Turret,
    Medic,
    Barricade,
    Barbwire,
    Mine,
    MgNest,
    Mortar,
}

/// How a defender spends its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    /// Blocks and soaks damage.
    Inert,
    /// Detonates once when a zombie comes within range.
    Mine,
    /// Burns every zombie in contact and snares it for the frame.
    Barbwire,
    /// Heals the nearest wounded ally on its cooldown.
    Medic,
    /// Shoots the nearest zombie on its cooldown.
    DirectFire { arcing: bool },
}

/// Stats for a defender kind. All values are compile-time constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenderStats {
    pub radius: f32,
    pub range: f32,
    /// Actions per second. Zero never acts on a cooldown.
    pub fire_rate: f32,
    /// Damage per shot, damage per second for barbwire, heal amount for medics.
    pub damage: f32,
    pub health: f32,
    /// Rounds before a reload. `None` never runs dry.
    pub magazine: Option<u32>,
}

impl DefenderKind {
    pub const ALL: &[Self] = &[
        Self::Soldier,
        Self::Sniper,
        Self::Tank,
        Self::Turret,
        Self::Medic,
        Self::Barricade,
        Self::Barbwire,
        Self::Mine,
        Self::MgNest,
        Self::Mortar,
    ];

    /// Identifier used by input layers and config files.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Soldier => "soldier",
            Self::Sniper => "sniper",
            Self::Tank => "tank",
            Self::Turret => "turret",
            Self::Medic => "medic",
            Self::Barricade => "barricade",
            Self::Barbwire => "barbwire",
            Self::Mine => "mine",
            Self::MgNest => "mg_nest",
            Self::Mortar => "mortar",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Soldier => "Soldier",
            Self::Sniper => "Sniper",
            Self::Tank => "Tank",
            Self::Turret => "Turret",
            Self::Medic => "Medic",
            Self::Barricade => "Barricade",
            Self::Barbwire => "Barbed Wire",
            Self::Mine => "Land Mine",
            Self::MgNest => "MG Nest",
            Self::Mortar => "Mortar",
        }
    }

    #[must_use]
    pub const fn stats(self) -> DefenderStats {
        const fn base(
            radius: f32,
            range: f32,
            fire_rate: f32,
            damage: f32,
            health: f32,
        ) -> DefenderStats {
            DefenderStats {
                radius,
                range,
                fire_rate,
                damage,
                health,
                magazine: None,
            }
        }

        match self {
            Self::Soldier => base(16.0, 220.0, 1.2, 25.0, 120.0),
            Self::Sniper => base(12.0, 450.0, 0.4, 60.0, 80.0),
            Self::Tank => base(25.0, 300.0, 0.3, 150.0, 500.0),
            Self::Turret => DefenderStats {
                magazine: Some(100),
                ..base(20.0, 250.0, 3.0, 10.0, 99_999.0)
            },
            Self::Medic => base(14.0, 150.0, 1.0, 10.0, 100.0),
            Self::Barricade => base(18.0, 0.0, 0.0, 0.0, 1000.0),
            Self::Barbwire => base(15.0, 20.0, 0.0, 2.0, 200.0),
            Self::Mine => base(8.0, 40.0, 0.0, 300.0, 1.0),
            Self::MgNest => base(22.0, 350.0, 10.0, 5.0, 400.0),
            Self::Mortar => base(20.0, 600.0, 0.2, 200.0, 250.0),
        }
    }

    #[must_use]
    pub const fn tactic(self) -> Tactic {
        match self {
            Self::Barricade => Tactic::Inert,
            Self::Mine => Tactic::Mine,
            Self::Barbwire => Tactic::Barbwire,
            Self::Medic => Tactic::Medic,
            Self::Mortar => Tactic::DirectFire { arcing: true },
            Self::Soldier | Self::Sniper | Self::Tank | Self::Turret | Self::MgNest => {
                Tactic::DirectFire { arcing: false }
            }
        }
    }

    /// Size of the rounds this kind fires.
    #[must_use]
    pub const fn projectile_radius(self) -> f32 {
        match self {
            Self::Tank => 8.0,
            Self::Mortar => 12.0,
            _ => 4.0,
        }
    }

    /// Mines and turrets are ignored by zombies picking a target.
    #[must_use]
    pub const fn targetable_by_zombies(self) -> bool {
        !matches!(self, Self::Mine | Self::Turret)
    }
}

// === Components ===

/// Marker for defender entities.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Defender;

/// Cooldown-driven action state. `since_last_action` keeps growing while
/// nothing is in range, so a banked shot fires the moment a target appears.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FireControl {
    pub range: f32,
    pub fire_rate: f32,
    pub damage: f32,
    pub since_last_action: f32,
}

impl FireControl {
    #[must_use]
    pub const fn from_stats(stats: &DefenderStats) -> Self {
        Self {
            range: stats.range,
            fire_rate: stats.fire_rate,
            damage: stats.damage,
            since_last_action: 0.0,
        }
    }

    /// Cooldown has elapsed. A zero fire rate is never ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.fire_rate > 0.0 && self.since_last_action >= self.fire_rate.recip()
    }
}

/// Finite ammunition. While `reload` is running the defender does nothing else.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Magazine {
    pub rounds: u32,
    pub capacity: u32,
    pub reload: Option<Timer>,
}

impl Magazine {
    #[must_use]
    pub const fn full(capacity: u32) -> Self {
        Self {
            rounds: capacity,
            capacity,
            reload: None,
        }
    }

    #[must_use]
    pub const fn is_reloading(&self) -> bool {
        self.reload.is_some()
    }

    /// Advances the reload and refills once it finishes.
    pub fn tick_reload(&mut self, delta: Duration) {
        let done = self
            .reload
            .as_mut()
            .is_some_and(|timer| timer.tick(delta).just_finished());
        if done {
            self.reload = None;
            self.rounds = self.capacity;
        }
    }

    /// Spends one round, starting a reload when the last one goes.
    pub fn expend(&mut self) {
        self.rounds = self.rounds.saturating_sub(1);
        if self.rounds == 0 {
            self.reload = Some(Timer::from_seconds(RELOAD_TIME, TimerMode::Once));
        }
    }
}

/// Spawn a defender entity with all required components.
pub fn spawn_defender(commands: &mut Commands, kind: DefenderKind, position: Vec2) -> Entity {
    let stats = kind.stats();
    let mut entity = commands.spawn((
        Name::new(kind.display_name()),
        Defender,
        kind,
        FireControl::from_stats(&stats),
        Health::new(stats.health),
        Radius(stats.radius),
        Condemned::default(),
        Transform::from_translation(position.extend(0.0)),
    ));
    if let Some(capacity) = stats.magazine {
        entity.insert(Magazine::full(capacity));
    }
    entity.id()
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Defender>()
        .register_type::<DefenderKind>()
        .register_type::<FireControl>()
        .register_type::<Magazine>();

    app.add_systems(
        Update,
        behavior::update_defenders
            .in_set(GameSet::Defenders)
            .run_if(gameplay_running),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::nearly_expire_timer;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = DefenderKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), DefenderKind::ALL.len());
    }

    #[test]
    fn only_turrets_carry_a_magazine() {
        for kind in DefenderKind::ALL {
            assert_eq!(
                kind.stats().magazine.is_some(),
                *kind == DefenderKind::Turret,
                "{kind:?}"
            );
        }
    }

    #[test]
    fn projectile_sizes() {
        assert_eq!(DefenderKind::Tank.projectile_radius(), 8.0);
        assert_eq!(DefenderKind::Mortar.projectile_radius(), 12.0);
        assert_eq!(DefenderKind::Sniper.projectile_radius(), 4.0);
    }

    #[test]
    fn zero_fire_rate_is_never_ready() {
        let mut fire = FireControl::from_stats(&DefenderKind::Barricade.stats());
        fire.since_last_action = 1.0e6;
        assert!(!fire.is_ready());
    }

    #[test]
    fn cooldown_is_inverse_fire_rate() {
        let mut fire = FireControl::from_stats(&DefenderKind::Soldier.stats());
        fire.since_last_action = 0.8;
        assert!(!fire.is_ready());
        fire.since_last_action = 0.84;
        assert!(fire.is_ready());
    }

    #[test]
    fn magazine_reloads_after_last_round() {
        let mut magazine = Magazine::full(2);
        magazine.expend();
        assert!(!magazine.is_reloading());
        magazine.expend();
        assert!(magazine.is_reloading());

        magazine.tick_reload(Duration::from_secs(9));
        assert!(magazine.is_reloading());
        magazine.tick_reload(Duration::from_secs(1));
        assert!(!magazine.is_reloading());
        assert_eq!(magazine.rounds, 2);
    }

    #[test]
    fn nearly_finished_reload_refills_on_next_tick() {
        let mut magazine = Magazine::full(100);
        for _ in 0..100 {
            magazine.expend();
        }
        let mut reload = magazine.reload.clone().unwrap();
        nearly_expire_timer(&mut reload);
        magazine.reload = Some(reload);

        magazine.tick_reload(Duration::from_millis(1));

        assert!(!magazine.is_reloading());
        assert_eq!(magazine.rounds, 100);
    }

    #[test]
    fn zombies_ignore_mines_and_turrets() {
        assert!(!DefenderKind::Mine.targetable_by_zombies());
        assert!(!DefenderKind::Turret.targetable_by_zombies());
        assert!(DefenderKind::Barricade.targetable_by_zombies());
    }
}
