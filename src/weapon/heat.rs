//! Heat accumulation and the overheat lockout state machine.
//!
//! Firing adds heat; heat drains every tick.  Reaching `max_heat` flips the
//! weapon into **Overheated**: firing is rejected outright for
//! `overheat_duration` seconds while heat keeps draining at a multiplied
//! rate, after which the weapon returns to **Cool**.
//!
//! Cost application is all-or-nothing: [`HeatState::try_consume`] either
//! applies the full cost or leaves the state completely untouched.  Callers
//! that price several barrels for the same tick must sum the costs and make a
//! single `try_consume` call, so a volley can never be half-charged.

use crate::config::WeaponConfig;
use crate::weapon::level::FirePattern;

/// Tolerance for accumulated f32 error across long fire sequences; without it
/// an exact-budget shot (e.g. the 125th 0.8-cost shot against a 100 cap)
/// drifts a few millionths over the cap and is wrongly rejected.
const HEAT_EPSILON: f32 = 1e-3;

/// Firing availability of the weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatStatus {
    /// Firing unrestricted (heat may still be anywhere in `[0, max_heat]`).
    Cool,
    /// Timed lockout: every fire request is rejected until the window ends.
    Overheated,
}

/// Accumulated weapon heat plus the overheat lockout countdown.
///
/// Owned exclusively by the weapon engine; mutated once per tick
/// ([`Self::tick`]) and once per accepted volley ([`Self::try_consume`]).
#[derive(Debug, Clone, PartialEq)]
pub struct HeatState {
    value: f32,
    status: HeatStatus,
    overheat_remaining: f32,
}

impl Default for HeatState {
    fn default() -> Self {
        Self {
            value: 0.0,
            status: HeatStatus::Cool,
            overheat_remaining: 0.0,
        }
    }
}

impl HeatState {
    /// Current heat value in `[0, max_heat]`.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current firing availability.
    #[inline]
    pub fn status(&self) -> HeatStatus {
        self.status
    }

    /// Seconds of lockout left; zero while Cool.
    #[inline]
    pub fn overheat_remaining(&self) -> f32 {
        self.overheat_remaining
    }

    /// Heat as a fraction of capacity, for HUD display.
    #[inline]
    pub fn heat_ratio(&self, config: &WeaponConfig) -> f32 {
        self.value / config.max_heat
    }

    /// Whether a volley costing `cost` fits the remaining heat budget.
    ///
    /// False while Overheated regardless of headroom.
    #[inline]
    pub fn can_afford(&self, config: &WeaponConfig, cost: f32) -> bool {
        self.status == HeatStatus::Cool && self.value + cost <= config.max_heat + HEAT_EPSILON
    }

    /// Apply `cost` heat, or reject without touching anything.
    ///
    /// Returns `false` while Overheated, and `false` when the cost would push
    /// heat over `max_heat` — heat is never silently allowed to exceed the
    /// cap.  On acceptance, reaching the cap transitions to Overheated and
    /// arms the lockout countdown.
    pub fn try_consume(&mut self, config: &WeaponConfig, cost: f32) -> bool {
        if !self.can_afford(config, cost) {
            return false;
        }
        self.value = (self.value + cost).min(config.max_heat);
        if self.value >= config.max_heat - HEAT_EPSILON {
            self.value = config.max_heat;
            self.status = HeatStatus::Overheated;
            self.overheat_remaining = config.overheat_duration;
        }
        true
    }

    /// Advance the state machine by `dt` seconds.
    ///
    /// Cool: heat drains at `cooldown_rate`.  Overheated: the lockout
    /// countdown runs while heat drains at `cooldown_rate ×
    /// overheat_cooldown_multiplier`; when the countdown elapses the weapon
    /// returns to Cool and normal decay resumes.
    pub fn tick(&mut self, config: &WeaponConfig, dt: f32) {
        match self.status {
            HeatStatus::Cool => {
                self.value = (self.value - config.cooldown_rate * dt).max(0.0);
            }
            HeatStatus::Overheated => {
                self.value = (self.value
                    - config.cooldown_rate * config.overheat_cooldown_multiplier * dt)
                    .max(0.0);
                self.overheat_remaining -= dt;
                if self.overheat_remaining <= 0.0 {
                    self.overheat_remaining = 0.0;
                    self.status = HeatStatus::Cool;
                }
            }
        }
    }
}

/// Heat price of one shot from one mount.
///
/// `heat_per_shot × (1 + multishot_heat_multiplier × (count − 1))`, times
/// `rear_heat_multiplier` for the rear cannon.  Forward and rear prices for
/// the same tick are summed by the resolver before the single
/// [`HeatState::try_consume`] call.
pub fn shot_cost(config: &WeaponConfig, pattern: FirePattern, rear: bool) -> f32 {
    let count = pattern.projectile_count();
    let multishot = 1.0 + config.multishot_heat_multiplier * (count - 1) as f32;
    let rear_factor = if rear { config.rear_heat_multiplier } else { 1.0 };
    config.heat_per_shot * multishot * rear_factor
}
