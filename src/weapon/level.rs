//! Power-level scaling: level → fire pattern and scaled projectile stats.
//!
//! Everything here is a pure function over `(config, level)` — no state, no
//! side effects.  The level argument is clamped into `[1, max_level]` before
//! any formula is applied, so out-of-range input is silently corrected rather
//! than treated as an error.

use crate::config::WeaponConfig;
use crate::constants::MIN_FIRE_INTERVAL;
use serde::Deserialize;

/// Named projectile-count/spread configuration, ordered by tier.
///
/// With `auto_upgrade_pattern` on, higher tiers unlock as the power level
/// crosses the configured per-tier thresholds; otherwise the config's
/// `manual_pattern` is used unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum FirePattern {
    Single,
    Double,
    Triple,
    Quad,
    X5,
}

impl FirePattern {
    /// Projectiles spawned by one forward volley of this pattern.
    #[inline]
    pub fn projectile_count(self) -> u32 {
        match self {
            FirePattern::Single => 1,
            FirePattern::Double => 2,
            FirePattern::Triple => 3,
            FirePattern::Quad => 4,
            FirePattern::X5 => 5,
        }
    }

    /// Full fan arc of this pattern (degrees, edge to edge).
    /// Single always fires straight ahead.
    #[inline]
    pub fn spread_deg(self, config: &WeaponConfig) -> f32 {
        match self {
            FirePattern::Single => 0.0,
            FirePattern::Double => config.double_spread_deg,
            FirePattern::Triple => config.triple_spread_deg,
            FirePattern::Quad => config.quad_spread_deg,
            FirePattern::X5 => config.x5_spread_deg,
        }
    }
}

/// Clamp a raw level into the configured `[1, max_level]` range.
#[inline]
pub fn clamp_level(config: &WeaponConfig, level: u32) -> u32 {
    level.clamp(1, config.max_level)
}

/// Resolve the active fire pattern for `level`.
///
/// Auto-upgrade mode returns the highest tier whose unlock level is ≤ the
/// (clamped) power level, defaulting to Single when nothing qualifies.
/// Manual mode returns `config.manual_pattern` unconditionally.
pub fn pattern_for_level(config: &WeaponConfig, level: u32) -> FirePattern {
    if !config.auto_upgrade_pattern {
        return config.manual_pattern;
    }
    let level = clamp_level(config, level);
    let tiers = [
        (FirePattern::Double, config.double_shot_level),
        (FirePattern::Triple, config.triple_shot_level),
        (FirePattern::Quad, config.quad_shot_level),
        (FirePattern::X5, config.x5_shot_level),
    ];
    let mut pattern = FirePattern::Single;
    for (tier, unlock_level) in tiers {
        if unlock_level <= level {
            pattern = tier;
        }
    }
    pattern
}

/// Projectile damage at `level`, in integer damage units (rounded half-up).
///
/// `base_damage × (1 + damage_per_level × (level − 1))`.
pub fn scaled_damage(config: &WeaponConfig, level: u32) -> u32 {
    let level = clamp_level(config, level);
    let raw = config.base_damage * (1.0 + config.damage_per_level * (level - 1) as f32);
    raw.round() as u32
}

/// Seconds between volleys at `level`, floored at [`MIN_FIRE_INTERVAL`].
///
/// `base_fire_interval × (1 − fire_rate_per_level × (level − 1))` — the
/// interval shrinks with level but can never reach zero or go negative.
pub fn scaled_fire_interval(config: &WeaponConfig, level: u32) -> f32 {
    let level = clamp_level(config, level);
    let raw = config.base_fire_interval * (1.0 - config.fire_rate_per_level * (level - 1) as f32);
    raw.max(MIN_FIRE_INTERVAL)
}

/// Projectile speed at `level` (world units / second).
///
/// `base_projectile_speed + projectile_speed_per_level × (level − 1)`.
pub fn scaled_speed(config: &WeaponConfig, level: u32) -> f32 {
    let level = clamp_level(config, level);
    config.base_projectile_speed + config.projectile_speed_per_level * (level - 1) as f32
}

/// Projectile size at `level` (world units).
///
/// `base_projectile_size × (1 + projectile_size_per_level × (level − 1))`.
pub fn scaled_size(config: &WeaponConfig, level: u32) -> f32 {
    let level = clamp_level(config, level);
    config.base_projectile_size * (1.0 + config.projectile_size_per_level * (level - 1) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WeaponConfig {
        WeaponConfig::default()
    }

    #[test]
    fn damage_example_level_four() {
        // base 12, +10 % per level: level 1 → 12, level 4 → 15.6 → rounds to 16.
        let config = config();
        assert_eq!(scaled_damage(&config, 1), 12);
        assert_eq!(scaled_damage(&config, 4), 16);
    }

    #[test]
    fn damage_is_non_decreasing_in_level() {
        let config = config();
        let mut previous = 0;
        for level in 1..=config.max_level {
            let damage = scaled_damage(&config, level);
            assert!(
                damage >= previous,
                "damage regressed at level {level}: {damage} < {previous}"
            );
            previous = damage;
        }
    }

    #[test]
    fn out_of_range_levels_behave_like_clamped_levels() {
        let config = config();
        assert_eq!(scaled_damage(&config, 0), scaled_damage(&config, 1));
        assert_eq!(
            scaled_damage(&config, config.max_level + 50),
            scaled_damage(&config, config.max_level)
        );
        assert_eq!(
            pattern_for_level(&config, config.max_level + 50),
            pattern_for_level(&config, config.max_level)
        );
    }

    #[test]
    fn pattern_thresholds_pick_highest_qualifying_tier() {
        let mut config = config();
        config.double_shot_level = 0;
        config.triple_shot_level = 3;
        config.quad_shot_level = 6;
        config.x5_shot_level = 9;
        config.auto_upgrade_pattern = true;

        assert_eq!(pattern_for_level(&config, 1), FirePattern::Double);
        assert_eq!(pattern_for_level(&config, 5), FirePattern::Triple);
        assert_eq!(pattern_for_level(&config, 9), FirePattern::X5);
    }

    #[test]
    fn manual_pattern_ignores_thresholds() {
        let mut config = config();
        config.auto_upgrade_pattern = false;
        config.manual_pattern = FirePattern::Quad;
        // Level 1 is far below the Quad unlock level; manual mode does not care.
        assert_eq!(pattern_for_level(&config, 1), FirePattern::Quad);
    }

    #[test]
    fn fire_interval_never_reaches_zero() {
        let mut config = config();
        // Extreme scaling that would drive the raw interval negative.
        config.fire_rate_per_level = 0.5;
        let interval = scaled_fire_interval(&config, config.max_level);
        assert_eq!(interval, MIN_FIRE_INTERVAL);
    }

    #[test]
    fn speed_and_size_scale_linearly() {
        let config = config();
        let speed_gain = scaled_speed(&config, 3) - scaled_speed(&config, 1);
        assert!((speed_gain - 2.0 * config.projectile_speed_per_level).abs() < 1e-3);

        let size_ratio = scaled_size(&config, 3) / scaled_size(&config, 1);
        assert!((size_ratio - (1.0 + 2.0 * config.projectile_size_per_level)).abs() < 1e-4);
    }

    #[test]
    fn projectile_counts_match_tiers() {
        assert_eq!(FirePattern::Single.projectile_count(), 1);
        assert_eq!(FirePattern::Double.projectile_count(), 2);
        assert_eq!(FirePattern::Triple.projectile_count(), 3);
        assert_eq!(FirePattern::Quad.projectile_count(), 4);
        assert_eq!(FirePattern::X5.projectile_count(), 5);
    }

    #[test]
    fn single_pattern_has_no_spread() {
        let config = config();
        assert_eq!(FirePattern::Single.spread_deg(&config), 0.0);
        assert!(FirePattern::X5.spread_deg(&config) > 0.0);
    }
}
