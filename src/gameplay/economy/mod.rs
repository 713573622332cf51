//! Economy: money, the income ledger, placement costs and passive income.

pub mod placement;

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::gameplay::defenders::DefenderKind;
use crate::gameplay::effects::support::SupportKind;
use crate::gameplay::session::{WaveProgress, advance_wave};
use crate::{GameSet, gameplay_running};

// === Placeables ===

/// Anything the player can buy and drop on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Placeable {
    Defender(DefenderKind),
    Support(SupportKind),
}

impl Placeable {
    /// Price in money.
    #[must_use]
    pub const fn cost(self) -> f64 {
        match self {
            Self::Defender(kind) => match kind {
                DefenderKind::Soldier => 50.0,
                DefenderKind::Sniper => 150.0,
                DefenderKind::Tank => 600.0,
                DefenderKind::Turret => 300.0,
                DefenderKind::Medic => 100.0,
                DefenderKind::Barricade => 40.0,
                DefenderKind::Barbwire => 30.0,
                DefenderKind::Mine => 50.0,
                DefenderKind::MgNest => 400.0,
                DefenderKind::Mortar => 500.0,
            },
            Self::Support(SupportKind::Airstrike) => 800.0,
            Self::Support(SupportKind::StrafingRun) => 400.0,
        }
    }

    /// Resolve the key an input layer attaches to its buttons
    /// (`"soldier"`, `"mg_nest"`, `"airstrike"`, ...).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(kind) = SupportKind::ALL.iter().find(|k| k.key() == key) {
            return Some(Self::Support(*kind));
        }
        DefenderKind::ALL
            .iter()
            .find(|k| k.key() == key)
            .map(|k| Self::Defender(*k))
    }
}

// === Resources ===

/// Where money came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Income {
    Kill,
    Rescue,
    WaveBonus,
    Passive,
}

/// Running totals per money source, so a session's balance can be audited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Ledger {
    pub kills: f64,
    pub rescues: f64,
    pub wave_bonuses: f64,
    pub passive: f64,
    pub spent: f64,
}

impl Ledger {
    /// Sum of every recorded change.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.kills + self.rescues + self.wave_bonuses + self.passive - self.spent
    }
}

/// The player's money. Only [`Money::credit`] and [`Money::spend`] move it.
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct Money {
    pub balance: f64,
    pub starting: f64,
    pub ledger: Ledger,
}

impl FromWorld for Money {
    fn from_world(world: &mut World) -> Self {
        let starting = world
            .get_resource::<SimConfig>()
            .map_or_else(|| SimConfig::default().starting_money, |c| c.starting_money);
        Self::new(starting)
    }
}

impl Money {
    #[must_use]
    pub fn new(starting: f64) -> Self {
        Self {
            balance: starting,
            starting,
            ledger: Ledger::default(),
        }
    }

    pub fn credit(&mut self, source: Income, amount: f64) {
        self.balance += amount;
        let bucket = match source {
            Income::Kill => &mut self.ledger.kills,
            Income::Rescue => &mut self.ledger.rescues,
            Income::WaveBonus => &mut self.ledger.wave_bonuses,
            Income::Passive => &mut self.ledger.passive,
        };
        *bucket += amount;
    }

    #[must_use]
    pub fn can_afford(&self, cost: f64) -> bool {
        self.balance >= cost
    }

    /// Deducts `cost` if affordable. Returns whether the purchase went through.
    pub fn spend(&mut self, cost: f64) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.balance -= cost;
        self.ledger.spent += cost;
        true
    }
}

// === Systems ===

/// Trickle of income that grows with the wave.
fn passive_income(
    time: Res<Time>,
    config: Res<SimConfig>,
    progress: Res<WaveProgress>,
    mut money: ResMut<Money>,
) {
    let rate = f64::from(progress.wave) * config.passive_income_per_wave;
    money.credit(Income::Passive, time.delta_secs_f64() * rate);
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Money>().init_resource::<Money>();

    app.add_systems(
        Update,
        passive_income
            .in_set(GameSet::Spawn)
            .after(advance_wave)
            .run_if(gameplay_running),
    );

    placement::plugin(app);
}
