//! Gameplay domain plugins: defenders, zombies, civilians, effects, economy, session.

pub mod civilians;
pub mod cleanup;
pub mod combat;
pub mod defenders;
pub mod economy;
pub mod effects;
pub mod hud;
pub mod session;
pub mod spawn;
pub mod zombies;

use bevy::prelude::*;

// === Shared Components ===

/// Hit points. `current` may dip below zero within a tick; the cleanup pass
/// condemns anything at or below zero.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtracts `amount` and reports whether this hit took health from above
    /// zero to zero or below.
    pub fn take(&mut self, amount: f32) -> bool {
        let was_alive = self.current > 0.0;
        self.current -= amount;
        was_alive && self.current <= 0.0
    }

    /// Restores up to `amount`, never past `max`.
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    #[must_use]
    pub fn is_wounded(&self) -> bool {
        self.current < self.max
    }
}

/// Collision radius in field pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Radius(pub f32);

/// Removal flag. Set during a tick, honored by the single despawn pass at
/// the end of it. Anything holding an `Entity` to a condemned actor must
/// treat it as gone.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Condemned(pub bool);

impl Condemned {
    pub const fn condemn(&mut self) {
        self.0 = true;
    }

    #[must_use]
    pub const fn is_condemned(self) -> bool {
        self.0
    }
}

/// Position of an entity on the field.
#[must_use]
pub fn field_position(transform: &Transform) -> Vec2 {
    transform.translation.truncate()
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Health>()
        .register_type::<Radius>()
        .register_type::<Condemned>();

    app.add_plugins((
        session::plugin,
        economy::plugin,
        spawn::plugin,
        defenders::plugin,
        zombies::plugin,
        civilians::plugin,
        effects::plugin,
        cleanup::plugin,
        hud::plugin,
    ));
}
