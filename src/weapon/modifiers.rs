//! Time-limited multiplicative stat modifiers (pickup buffs).
//!
//! Each modifier kind targets exactly one stat category; at most one modifier
//! per category is active at a time.  Re-applying a modifier refreshes its
//! timer to the full configured duration — durations never stack, and
//! magnitudes never compose.  A modifier whose remaining time reaches zero is
//! removed in the same tick it expires, so an effect ending "this tick" does
//! not apply to this tick's shot.

use crate::config::WeaponConfig;

/// The pickup buffs the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    /// Shortens the fire interval.
    RapidFire,
    /// Raises projectile damage.
    PowerRounds,
    /// Raises projectile speed.
    HighVelocity,
    /// Raises projectile size.
    HeavyCaliber,
}

/// The stat a modifier multiplies.  Categories are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatCategory {
    FireRate,
    Damage,
    Speed,
    Size,
}

/// Number of stat categories (one slot each in [`ModifierStack`]).
const CATEGORY_COUNT: usize = 4;

impl StatCategory {
    #[inline]
    fn slot(self) -> usize {
        match self {
            StatCategory::FireRate => 0,
            StatCategory::Damage => 1,
            StatCategory::Speed => 2,
            StatCategory::Size => 3,
        }
    }
}

impl ModifierKind {
    /// The stat category this kind multiplies.
    #[inline]
    pub fn category(self) -> StatCategory {
        match self {
            ModifierKind::RapidFire => StatCategory::FireRate,
            ModifierKind::PowerRounds => StatCategory::Damage,
            ModifierKind::HighVelocity => StatCategory::Speed,
            ModifierKind::HeavyCaliber => StatCategory::Size,
        }
    }

    /// Configured multiplier for this kind.
    #[inline]
    pub fn multiplier(self, config: &WeaponConfig) -> f32 {
        match self {
            ModifierKind::RapidFire => config.rapid_fire_multiplier,
            ModifierKind::PowerRounds => config.power_rounds_multiplier,
            ModifierKind::HighVelocity => config.high_velocity_multiplier,
            ModifierKind::HeavyCaliber => config.heavy_caliber_multiplier,
        }
    }

    /// Configured duration for this kind (seconds).
    #[inline]
    pub fn duration(self, config: &WeaponConfig) -> f32 {
        match self {
            ModifierKind::RapidFire => config.rapid_fire_duration,
            ModifierKind::PowerRounds => config.power_rounds_duration,
            ModifierKind::HighVelocity => config.high_velocity_duration,
            ModifierKind::HeavyCaliber => config.heavy_caliber_duration,
        }
    }
}

/// One active buff: its kind, the multiplier captured at application time,
/// and the seconds left before it expires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveModifier {
    pub kind: ModifierKind,
    pub multiplier: f32,
    pub remaining: f32,
}

/// The set of currently active modifiers, one slot per stat category.
///
/// Slot storage (rather than a map) keeps iteration order fixed and the whole
/// stack `Copy`-cheap to clone for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierStack {
    slots: [Option<ActiveModifier>; CATEGORY_COUNT],
}

impl ModifierStack {
    /// Insert or refresh the modifier of `kind`.
    ///
    /// The multiplier and duration are captured from `config` now; the slot
    /// for the kind's category is replaced outright, so a different kind of
    /// the same category displaces the previous one rather than composing
    /// with it.  Re-applying the same kind resets `remaining` to the full
    /// duration (idempotent — no stacking).
    pub fn apply(&mut self, kind: ModifierKind, config: &WeaponConfig) {
        self.slots[kind.category().slot()] = Some(ActiveModifier {
            kind,
            multiplier: kind.multiplier(config),
            remaining: kind.duration(config),
        });
    }

    /// Advance all timers by `dt` seconds, removing every modifier whose
    /// remaining time reaches zero.  Removal happens in the same tick as
    /// expiry — there is no one-tick grace.
    pub fn tick(&mut self, dt: f32) {
        for slot in self.slots.iter_mut() {
            if let Some(active) = slot {
                active.remaining -= dt;
                if active.remaining <= 0.0 {
                    *slot = None;
                }
            }
        }
    }

    /// The active multiplier for `category`, or `1.0` when nothing is active.
    #[inline]
    pub fn multiplier_for(&self, category: StatCategory) -> f32 {
        self.slots[category.slot()]
            .map(|active| active.multiplier)
            .unwrap_or(1.0)
    }

    /// The modifier currently occupying `category`, if any.
    #[inline]
    pub fn active_in(&self, category: StatCategory) -> Option<ActiveModifier> {
        self.slots[category.slot()]
    }

    /// How many modifiers are currently active (HUD display).
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WeaponConfig {
        WeaponConfig::default()
    }

    #[test]
    fn inactive_category_multiplier_is_one() {
        let stack = ModifierStack::default();
        assert_eq!(stack.multiplier_for(StatCategory::Damage), 1.0);
        assert_eq!(stack.active_count(), 0);
    }

    #[test]
    fn apply_captures_configured_multiplier() {
        let config = config();
        let mut stack = ModifierStack::default();
        stack.apply(ModifierKind::PowerRounds, &config);
        assert_eq!(
            stack.multiplier_for(StatCategory::Damage),
            config.power_rounds_multiplier
        );
        // Other categories untouched.
        assert_eq!(stack.multiplier_for(StatCategory::FireRate), 1.0);
    }

    #[test]
    fn reapply_refreshes_duration_without_stacking() {
        let config = config();
        let mut stack = ModifierStack::default();
        stack.apply(ModifierKind::RapidFire, &config);
        stack.tick(config.rapid_fire_duration * 0.5);

        // Re-apply while half-expired: remaining snaps back to the full
        // duration, not the sum of both windows.
        stack.apply(ModifierKind::RapidFire, &config);
        let active = stack.active_in(StatCategory::FireRate).unwrap();
        assert_eq!(active.remaining, config.rapid_fire_duration);
        assert_eq!(active.multiplier, config.rapid_fire_multiplier);
    }

    #[test]
    fn expiry_removes_in_the_same_tick() {
        let config = config();
        let mut stack = ModifierStack::default();
        stack.apply(ModifierKind::HighVelocity, &config);

        // One tick that lands exactly on the expiry instant: gone immediately.
        stack.tick(config.high_velocity_duration);
        assert_eq!(stack.multiplier_for(StatCategory::Speed), 1.0);
        assert!(stack.active_in(StatCategory::Speed).is_none());
    }

    #[test]
    fn tick_only_decrements_active_slots() {
        let config = config();
        let mut stack = ModifierStack::default();
        stack.apply(ModifierKind::HeavyCaliber, &config);
        stack.tick(1.0);
        let active = stack.active_in(StatCategory::Size).unwrap();
        assert!((active.remaining - (config.heavy_caliber_duration - 1.0)).abs() < 1e-6);
    }

    #[test]
    fn kinds_map_onto_distinct_categories() {
        let config = config();
        let mut stack = ModifierStack::default();
        stack.apply(ModifierKind::RapidFire, &config);
        stack.apply(ModifierKind::PowerRounds, &config);
        stack.apply(ModifierKind::HighVelocity, &config);
        stack.apply(ModifierKind::HeavyCaliber, &config);
        assert_eq!(stack.active_count(), 4);
    }
}
