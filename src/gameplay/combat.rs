//! Combat math shared by defenders, zombies and area effects.

use bevy::prelude::*;

use super::{Condemned, Health};

/// Picks the candidate closest to `origin` whose distance is strictly below
/// `limit`. Ties keep the first candidate encountered, so callers control
/// precedence through the order they chain candidates in. Within a single
/// query that order is the query's iteration order, not spawn order.
pub fn nearest_within<T>(
    origin: Vec2,
    candidates: impl IntoIterator<Item = (T, Vec2)>,
    limit: f32,
) -> Option<(T, f32)> {
    let mut nearest: Option<(T, f32)> = None;
    let mut best = limit;
    for (candidate, position) in candidates {
        let dist = origin.distance(position);
        if dist < best {
            best = dist;
            nearest = Some((candidate, dist));
        }
    }
    nearest
}

/// Two circles overlap.
#[must_use]
pub fn in_contact(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Moves `from` toward `to` by `distance` along the straight line.
/// Returns `from` unchanged when the two points coincide.
#[must_use]
pub fn step_toward(from: Vec2, to: Vec2, distance: f32) -> Vec2 {
    let offset = to - from;
    let length = offset.length();
    if length <= f32::EPSILON {
        return from;
    }
    from + offset / length * distance
}

/// Applies `damage` to a live target and condemns it when the hit leaves it
/// at or below zero. Returns whether this hit condemned it, so the caller
/// pays a bounty at most once. Condemned targets take no damage.
pub fn land_hit(health: &mut Health, condemned: &mut Condemned, damage: f32) -> bool {
    if condemned.is_condemned() {
        return false;
    }
    health.take(damage);
    if health.is_depleted() {
        condemned.condemn();
        return true;
    }
    false
}
