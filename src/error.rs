//! Engine-specific error types.
//!
//! The only fatal error in the crate is a configuration document that fails
//! validation: the engine refuses to start with (or switch to) an invalid
//! [`crate::config::WeaponConfig`].  Runtime "failures" — a fire request
//! rejected because of overheat or insufficient heat budget — are expected
//! outcomes, not errors; they are modelled as
//! [`crate::weapon::BlockReason`] values instead.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::{require_positive, ConfigResult};
//!
//! fn validate(&self) -> ConfigResult<()> {
//!     require_positive("max_heat", self.max_heat)?;
//!     Ok(())
//! }
//! ```

use std::fmt;

/// A weapon configuration document violated one of its invariants.
///
/// Each variant names the offending field so callers can report precisely
/// which value to fix.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// A field that must be strictly positive was zero or negative.
    /// Covers durations, base stats, capacities, and multipliers.
    NonPositive {
        /// Config field name (snake_case, as it appears in the TOML document).
        field: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// A field that must be zero-or-greater was negative.
    /// Covers rates and additive cost factors.
    Negative {
        /// Config field name.
        field: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// A fractional decay field was outside `[0, 1]`.
    OutOfUnitRange {
        /// Config field name.
        field: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// `max_level` must allow at least level 1.
    MaxLevelZero,

    /// Pattern unlock levels must be non-decreasing with tier
    /// (Double ≤ Triple ≤ Quad ≤ X5).
    DecreasingPatternThreshold {
        /// Lower-tier field name.
        lower_field: &'static str,
        /// Unlock level configured for the lower tier.
        lower: u32,
        /// Higher-tier field name.
        upper_field: &'static str,
        /// Unlock level configured for the higher tier.
        upper: u32,
    },

    /// The TOML document could not be parsed at all.
    Parse {
        /// Parser diagnostic, already human-readable.
        message: String,
    },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValidationError::NonPositive { field, value } => {
                write!(f, "'{}' = {} must be > 0", field, value)
            }
            ConfigValidationError::Negative { field, value } => {
                write!(f, "'{}' = {} must be >= 0", field, value)
            }
            ConfigValidationError::OutOfUnitRange { field, value } => {
                write!(f, "'{}' = {} must be within [0, 1]", field, value)
            }
            ConfigValidationError::MaxLevelZero => {
                write!(f, "'max_level' must be at least 1")
            }
            ConfigValidationError::DecreasingPatternThreshold {
                lower_field,
                lower,
                upper_field,
                upper,
            } => write!(
                f,
                "pattern unlock levels must be non-decreasing with tier: \
                 '{}' = {} exceeds '{}' = {}",
                lower_field, lower, upper_field, upper
            ),
            ConfigValidationError::Parse { message } => {
                write!(f, "weapon config parse failure: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Convenience alias: a `Result` using `ConfigValidationError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigValidationError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `value` is not strictly positive.
pub fn require_positive(field: &'static str, value: f32) -> ConfigResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigValidationError::NonPositive { field, value })
    }
}

/// Returns an error if `value` is negative.
pub fn require_non_negative(field: &'static str, value: f32) -> ConfigResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigValidationError::Negative { field, value })
    }
}

/// Returns an error if a fractional decay `value` lies outside `[0, 1]`.
pub fn require_unit_range(field: &'static str, value: f32) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigValidationError::OutOfUnitRange { field, value })
    }
}

/// Returns an error if a pair of pattern unlock levels decreases with tier.
pub fn require_ordered_thresholds(
    lower_field: &'static str,
    lower: u32,
    upper_field: &'static str,
    upper: u32,
) -> ConfigResult<()> {
    if lower <= upper {
        Ok(())
    } else {
        Err(ConfigValidationError::DecreasingPatternThreshold {
            lower_field,
            lower,
            upper_field,
            upper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_helper_accepts_and_rejects() {
        assert!(require_positive("max_heat", 100.0).is_ok());
        let err = require_positive("max_heat", 0.0).unwrap_err();
        assert_eq!(
            err,
            ConfigValidationError::NonPositive {
                field: "max_heat",
                value: 0.0
            }
        );
    }

    #[test]
    fn non_negative_helper_allows_zero() {
        assert!(require_non_negative("heat_per_shot", 0.0).is_ok());
        assert!(require_non_negative("heat_per_shot", -0.1).is_err());
    }

    #[test]
    fn unit_range_helper_bounds_inclusive() {
        assert!(require_unit_range("chain_damage_decay", 0.0).is_ok());
        assert!(require_unit_range("chain_damage_decay", 1.0).is_ok());
        assert!(require_unit_range("chain_damage_decay", 1.01).is_err());
    }

    #[test]
    fn threshold_helper_requires_non_decreasing() {
        assert!(require_ordered_thresholds("double_shot_level", 2, "triple_shot_level", 4).is_ok());
        assert!(require_ordered_thresholds("double_shot_level", 4, "triple_shot_level", 4).is_ok());
        assert!(
            require_ordered_thresholds("double_shot_level", 5, "triple_shot_level", 4).is_err()
        );
    }

    #[test]
    fn display_names_the_offending_field() {
        let err = ConfigValidationError::NonPositive {
            field: "overheat_duration",
            value: -1.0,
        };
        assert!(err.to_string().contains("overheat_duration"));
    }
}
