//! Runtime weapon configuration loaded from `assets/weapon.toml`.
//!
//! [`WeaponConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_weapon_config`] reads
//! `assets/weapon.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! Unlike the raw constants, a loaded document must pass [`WeaponConfig::validate`]
//! before it replaces the active config — a file that parses but violates an
//! invariant (zero duration, decreasing pattern thresholds, …) is rejected
//! wholesale and the previous values stay in force.  The engine never runs
//! against an invalid config.
//!
//! ## Usage in systems
//!
//! Add `config: Res<WeaponConfig>` to any system parameter list and read values
//! with `config.max_heat`, `config.base_damage`, etc.  The resource is never
//! mutated after startup; a tuning change is modelled as loading a new
//! document.

use crate::constants::*;
use crate::error::{
    require_non_negative, require_ordered_thresholds, require_positive, require_unit_range,
    ConfigResult, ConfigValidationError,
};
use crate::weapon::level::FirePattern;
use bevy::prelude::*;
use serde::Deserialize;

/// Firing discipline of the rear cannon relative to the forward battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RearSyncMode {
    /// The rear cannon fires on the same tick as every forward volley.
    SyncedWithForward,
    /// The rear cannon runs on its own cadence; the external cooldown layer
    /// reports readiness through `FireIntent::wants_rear`.
    Independent,
}

/// Runtime-tunable weapon configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/weapon.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    // ── Base Projectile Stats ─────────────────────────────────────────────────
    pub base_damage: f32,
    pub base_fire_interval: f32,
    pub base_projectile_speed: f32,
    pub base_projectile_size: f32,
    pub projectile_lifetime: f32,

    // ── Fire Patterns ─────────────────────────────────────────────────────────
    pub double_shot_level: u32,
    pub triple_shot_level: u32,
    pub quad_shot_level: u32,
    pub x5_shot_level: u32,
    pub double_spread_deg: f32,
    pub triple_spread_deg: f32,
    pub quad_spread_deg: f32,
    pub x5_spread_deg: f32,
    pub muzzle_offset: f32,
    pub lateral_spacing: f32,
    pub auto_upgrade_pattern: bool,
    /// Pattern used unconditionally when `auto_upgrade_pattern` is off.
    pub manual_pattern: FirePattern,

    // ── Rear Weapon ───────────────────────────────────────────────────────────
    pub rear_enabled: bool,
    pub rear_damage_multiplier: f32,
    pub rear_fire_interval_multiplier: f32,
    pub rear_offset: f32,
    pub rear_sync: RearSyncMode,

    // ── Heat ──────────────────────────────────────────────────────────────────
    pub heat_per_shot: f32,
    pub cooldown_rate: f32,
    pub max_heat: f32,
    pub overheat_duration: f32,
    pub overheat_cooldown_multiplier: f32,
    pub multishot_heat_multiplier: f32,
    pub rear_heat_multiplier: f32,

    // ── Power Level Scaling ───────────────────────────────────────────────────
    pub max_level: u32,
    pub damage_per_level: f32,
    pub fire_rate_per_level: f32,
    pub projectile_speed_per_level: f32,
    pub projectile_size_per_level: f32,

    // ── Modifiers ─────────────────────────────────────────────────────────────
    pub rapid_fire_multiplier: f32,
    pub rapid_fire_duration: f32,
    pub power_rounds_multiplier: f32,
    pub power_rounds_duration: f32,
    pub high_velocity_multiplier: f32,
    pub high_velocity_duration: f32,
    pub heavy_caliber_multiplier: f32,
    pub heavy_caliber_duration: f32,

    // ── Special Effects ───────────────────────────────────────────────────────
    pub pierce_enabled: bool,
    pub pierce_count: u32,
    pub pierce_damage_decay: f32,
    pub homing_enabled: bool,
    pub homing_range: f32,
    pub homing_strength: f32,
    pub explosion_enabled: bool,
    pub explosion_radius: f32,
    pub explosion_damage_multiplier: f32,
    pub ricochet_enabled: bool,
    pub ricochet_bounces: u32,
    pub chain_enabled: bool,
    pub chain_range: f32,
    pub chain_jumps: u32,
    pub chain_damage_decay: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            // Base Projectile Stats
            base_damage: BASE_DAMAGE,
            base_fire_interval: BASE_FIRE_INTERVAL,
            base_projectile_speed: BASE_PROJECTILE_SPEED,
            base_projectile_size: BASE_PROJECTILE_SIZE,
            projectile_lifetime: PROJECTILE_LIFETIME,
            // Fire Patterns
            double_shot_level: DOUBLE_SHOT_LEVEL,
            triple_shot_level: TRIPLE_SHOT_LEVEL,
            quad_shot_level: QUAD_SHOT_LEVEL,
            x5_shot_level: X5_SHOT_LEVEL,
            double_spread_deg: DOUBLE_SPREAD_DEG,
            triple_spread_deg: TRIPLE_SPREAD_DEG,
            quad_spread_deg: QUAD_SPREAD_DEG,
            x5_spread_deg: X5_SPREAD_DEG,
            muzzle_offset: MUZZLE_OFFSET,
            lateral_spacing: LATERAL_SPACING,
            auto_upgrade_pattern: AUTO_UPGRADE_PATTERN,
            manual_pattern: FirePattern::Single,
            // Rear Weapon
            rear_enabled: REAR_ENABLED,
            rear_damage_multiplier: REAR_DAMAGE_MULTIPLIER,
            rear_fire_interval_multiplier: REAR_FIRE_INTERVAL_MULTIPLIER,
            rear_offset: REAR_OFFSET,
            rear_sync: RearSyncMode::SyncedWithForward,
            // Heat
            heat_per_shot: HEAT_PER_SHOT,
            cooldown_rate: COOLDOWN_RATE,
            max_heat: MAX_HEAT,
            overheat_duration: OVERHEAT_DURATION,
            overheat_cooldown_multiplier: OVERHEAT_COOLDOWN_MULTIPLIER,
            multishot_heat_multiplier: MULTISHOT_HEAT_MULTIPLIER,
            rear_heat_multiplier: REAR_HEAT_MULTIPLIER,
            // Power Level Scaling
            max_level: MAX_POWER_LEVEL,
            damage_per_level: DAMAGE_PER_LEVEL,
            fire_rate_per_level: FIRE_RATE_PER_LEVEL,
            projectile_speed_per_level: PROJECTILE_SPEED_PER_LEVEL,
            projectile_size_per_level: PROJECTILE_SIZE_PER_LEVEL,
            // Modifiers
            rapid_fire_multiplier: RAPID_FIRE_MULTIPLIER,
            rapid_fire_duration: RAPID_FIRE_DURATION,
            power_rounds_multiplier: POWER_ROUNDS_MULTIPLIER,
            power_rounds_duration: POWER_ROUNDS_DURATION,
            high_velocity_multiplier: HIGH_VELOCITY_MULTIPLIER,
            high_velocity_duration: HIGH_VELOCITY_DURATION,
            heavy_caliber_multiplier: HEAVY_CALIBER_MULTIPLIER,
            heavy_caliber_duration: HEAVY_CALIBER_DURATION,
            // Special Effects
            pierce_enabled: false,
            pierce_count: PIERCE_COUNT,
            pierce_damage_decay: PIERCE_DAMAGE_DECAY,
            homing_enabled: false,
            homing_range: HOMING_RANGE,
            homing_strength: HOMING_STRENGTH,
            explosion_enabled: false,
            explosion_radius: EXPLOSION_RADIUS,
            explosion_damage_multiplier: EXPLOSION_DAMAGE_MULTIPLIER,
            ricochet_enabled: false,
            ricochet_bounces: RICOCHET_BOUNCES,
            chain_enabled: false,
            chain_range: CHAIN_RANGE,
            chain_jumps: CHAIN_JUMPS,
            chain_damage_decay: CHAIN_DAMAGE_DECAY,
        }
    }
}

impl WeaponConfig {
    /// Check every invariant the engine relies on.
    ///
    /// Returns the first violation found, naming the offending field.  Order
    /// mirrors the field declaration order so diagnostics are predictable.
    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("base_damage", self.base_damage)?;
        require_positive("base_fire_interval", self.base_fire_interval)?;
        require_positive("base_projectile_speed", self.base_projectile_speed)?;
        require_positive("base_projectile_size", self.base_projectile_size)?;
        require_positive("projectile_lifetime", self.projectile_lifetime)?;

        require_ordered_thresholds(
            "double_shot_level",
            self.double_shot_level,
            "triple_shot_level",
            self.triple_shot_level,
        )?;
        require_ordered_thresholds(
            "triple_shot_level",
            self.triple_shot_level,
            "quad_shot_level",
            self.quad_shot_level,
        )?;
        require_ordered_thresholds(
            "quad_shot_level",
            self.quad_shot_level,
            "x5_shot_level",
            self.x5_shot_level,
        )?;
        require_non_negative("double_spread_deg", self.double_spread_deg)?;
        require_non_negative("triple_spread_deg", self.triple_spread_deg)?;
        require_non_negative("quad_spread_deg", self.quad_spread_deg)?;
        require_non_negative("x5_spread_deg", self.x5_spread_deg)?;
        require_non_negative("muzzle_offset", self.muzzle_offset)?;
        require_non_negative("lateral_spacing", self.lateral_spacing)?;

        require_positive("rear_damage_multiplier", self.rear_damage_multiplier)?;
        require_positive(
            "rear_fire_interval_multiplier",
            self.rear_fire_interval_multiplier,
        )?;
        require_non_negative("rear_offset", self.rear_offset)?;

        require_non_negative("heat_per_shot", self.heat_per_shot)?;
        require_non_negative("cooldown_rate", self.cooldown_rate)?;
        require_positive("max_heat", self.max_heat)?;
        require_positive("overheat_duration", self.overheat_duration)?;
        require_non_negative(
            "overheat_cooldown_multiplier",
            self.overheat_cooldown_multiplier,
        )?;
        require_non_negative("multishot_heat_multiplier", self.multishot_heat_multiplier)?;
        require_positive("rear_heat_multiplier", self.rear_heat_multiplier)?;

        if self.max_level < 1 {
            return Err(ConfigValidationError::MaxLevelZero);
        }
        require_non_negative("damage_per_level", self.damage_per_level)?;
        require_non_negative("fire_rate_per_level", self.fire_rate_per_level)?;
        require_non_negative(
            "projectile_speed_per_level",
            self.projectile_speed_per_level,
        )?;
        require_non_negative("projectile_size_per_level", self.projectile_size_per_level)?;

        require_positive("rapid_fire_multiplier", self.rapid_fire_multiplier)?;
        require_positive("rapid_fire_duration", self.rapid_fire_duration)?;
        require_positive("power_rounds_multiplier", self.power_rounds_multiplier)?;
        require_positive("power_rounds_duration", self.power_rounds_duration)?;
        require_positive("high_velocity_multiplier", self.high_velocity_multiplier)?;
        require_positive("high_velocity_duration", self.high_velocity_duration)?;
        require_positive("heavy_caliber_multiplier", self.heavy_caliber_multiplier)?;
        require_positive("heavy_caliber_duration", self.heavy_caliber_duration)?;

        require_unit_range("pierce_damage_decay", self.pierce_damage_decay)?;
        require_non_negative("homing_range", self.homing_range)?;
        require_non_negative("homing_strength", self.homing_strength)?;
        require_non_negative("explosion_radius", self.explosion_radius)?;
        require_non_negative(
            "explosion_damage_multiplier",
            self.explosion_damage_multiplier,
        )?;
        require_non_negative("chain_range", self.chain_range)?;
        require_unit_range("chain_damage_decay", self.chain_damage_decay)?;

        Ok(())
    }

    /// Parse a TOML document and validate the result.
    ///
    /// This is the only way external documents enter the engine; an invalid
    /// document never produces a usable `WeaponConfig`.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: WeaponConfig =
            toml::from_str(contents).map_err(|e| ConfigValidationError::Parse {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}

/// Startup system: attempt to load `assets/weapon.toml` and overwrite the
/// `WeaponConfig` resource with the validated result.
///
/// Missing file → compiled defaults stay in place (not an error).
/// Parse or validation failure → the file is rejected wholesale, the defaults
/// stay in force, and a `⚠` diagnostic names the offending field.
pub fn load_weapon_config(mut config: ResMut<WeaponConfig>) {
    let path = "assets/weapon.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match WeaponConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded weapon config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Rejected {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        WeaponConfig::default()
            .validate()
            .expect("compiled defaults must satisfy every invariant");
    }

    #[test]
    fn zero_duration_is_rejected_by_field_name() {
        let mut config = WeaponConfig::default();
        config.overheat_duration = 0.0;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigValidationError::NonPositive {
                field: "overheat_duration",
                value: 0.0
            }
        );
    }

    #[test]
    fn decreasing_thresholds_are_rejected() {
        let mut config = WeaponConfig::default();
        config.triple_shot_level = 1; // below double_shot_level (2)
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigValidationError::DecreasingPatternThreshold { .. }
        ));
    }

    #[test]
    fn max_level_zero_is_rejected() {
        let mut config = WeaponConfig::default();
        config.max_level = 0;
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigValidationError::MaxLevelZero
        );
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = WeaponConfig::from_toml_str(
            "base_damage = 20.0\nmax_heat = 50.0\nrear_enabled = true\n",
        )
        .expect("partial override must parse and validate");
        assert_eq!(config.base_damage, 20.0);
        assert_eq!(config.max_heat, 50.0);
        assert!(config.rear_enabled);
        // Untouched keys keep compiled defaults.
        assert_eq!(config.heat_per_shot, HEAT_PER_SHOT);
        assert_eq!(config.max_level, MAX_POWER_LEVEL);
    }

    #[test]
    fn invalid_toml_value_never_yields_a_config() {
        let result = WeaponConfig::from_toml_str("max_heat = -5.0\n");
        assert_eq!(
            result.unwrap_err(),
            ConfigValidationError::NonPositive {
                field: "max_heat",
                value: -5.0
            }
        );
    }

    #[test]
    fn garbage_toml_reports_parse_error() {
        let result = WeaponConfig::from_toml_str("max_heat = [not a number");
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::Parse { .. }
        ));
    }

    #[test]
    fn manual_pattern_deserializes_from_name() {
        let config =
            WeaponConfig::from_toml_str("auto_upgrade_pattern = false\nmanual_pattern = \"Triple\"\n")
                .expect("pattern name must deserialize");
        assert!(!config.auto_upgrade_pattern);
        assert_eq!(config.manual_pattern, FirePattern::Triple);
    }
}
