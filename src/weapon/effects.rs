//! Special projectile behaviours, snapshotted per fire event.
//!
//! Effects are orthogonal toggles: any combination of pierce, homing,
//! explosive, ricochet, and chain lightning may ride on the same projectile.
//! The snapshot is taken once when a volley resolves and travels with each
//! [`crate::weapon::FireSpec`]; a configuration change after the fact never
//! alters a projectile already in flight.

use crate::config::WeaponConfig;

/// Pass-through behaviour: the projectile survives `count` target hits,
/// losing `damage_decay` of its damage per target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PierceParams {
    pub count: u32,
    pub damage_decay: f32,
}

impl PierceParams {
    /// Damage dealt to the `hit`-th pierced target (0 = first impact).
    pub fn damage_at_hit(&self, base_damage: u32, hit: u32) -> u32 {
        compounded_damage(base_damage, self.damage_decay, hit)
    }
}

/// Target-seeking behaviour: acquisition radius and steering strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingParams {
    pub range: f32,
    pub strength: f32,
}

/// Area damage on impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionParams {
    pub radius: f32,
    /// Splash damage as a fraction of the direct-hit damage.
    pub damage_multiplier: f32,
}

/// Wall-bounce behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RicochetParams {
    pub bounces: u32,
}

/// Arcing behaviour: after the initial hit the damage jumps to up to `jumps`
/// further targets within `range`, compounding `damage_decay` per jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainParams {
    pub range: f32,
    pub jumps: u32,
    pub damage_decay: f32,
}

impl ChainParams {
    /// Damage dealt at the `jump`-th target in the arc sequence (0 = the
    /// initial hit).  Compounds multiplicatively: decay 0.3 on base 100
    /// yields 100, 70, 49, …
    pub fn damage_at_jump(&self, base_damage: u32, jump: u32) -> u32 {
        compounded_damage(base_damage, self.damage_decay, jump)
    }
}

fn compounded_damage(base_damage: u32, decay: f32, step: u32) -> u32 {
    let kept = (1.0 - decay).powi(step as i32);
    (base_damage as f32 * kept).round() as u32
}

/// Immutable record of every special effect enabled at fire time.
///
/// `None` fields are effects that were disabled when the volley resolved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpecialEffectsSnapshot {
    pub pierce: Option<PierceParams>,
    pub homing: Option<HomingParams>,
    pub explosion: Option<ExplosionParams>,
    pub ricochet: Option<RicochetParams>,
    pub chain: Option<ChainParams>,
}

impl SpecialEffectsSnapshot {
    /// Capture the currently enabled effects and their parameters.
    ///
    /// Called once per fire event; the returned value is an owned copy, so
    /// later changes to `config` cannot reach an already-fired snapshot.
    pub fn compose(config: &WeaponConfig) -> Self {
        Self {
            pierce: config.pierce_enabled.then(|| PierceParams {
                count: config.pierce_count,
                damage_decay: config.pierce_damage_decay,
            }),
            homing: config.homing_enabled.then(|| HomingParams {
                range: config.homing_range,
                strength: config.homing_strength,
            }),
            explosion: config.explosion_enabled.then(|| ExplosionParams {
                radius: config.explosion_radius,
                damage_multiplier: config.explosion_damage_multiplier,
            }),
            ricochet: config.ricochet_enabled.then(|| RicochetParams {
                bounces: config.ricochet_bounces,
            }),
            chain: config.chain_enabled.then(|| ChainParams {
                range: config.chain_range,
                jumps: config.chain_jumps,
                damage_decay: config.chain_damage_decay,
            }),
        }
    }

    /// Whether any effect is active on this snapshot.
    pub fn any_active(&self) -> bool {
        self.pierce.is_some()
            || self.homing.is_some()
            || self.explosion.is_some()
            || self.ricochet.is_some()
            || self.chain.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_effects_compose_to_empty() {
        let config = WeaponConfig::default();
        let snapshot = SpecialEffectsSnapshot::compose(&config);
        assert!(!snapshot.any_active());
        assert_eq!(snapshot, SpecialEffectsSnapshot::default());
    }

    #[test]
    fn enabled_effects_carry_their_parameters() {
        let mut config = WeaponConfig::default();
        config.pierce_enabled = true;
        config.chain_enabled = true;
        let snapshot = SpecialEffectsSnapshot::compose(&config);

        let pierce = snapshot.pierce.unwrap();
        assert_eq!(pierce.count, config.pierce_count);
        let chain = snapshot.chain.unwrap();
        assert_eq!(chain.jumps, config.chain_jumps);
        // Effects coexist; nothing is mutually exclusive.
        assert!(snapshot.homing.is_none());
        assert!(snapshot.any_active());
    }

    #[test]
    fn snapshot_outlives_config_changes() {
        let mut config = WeaponConfig::default();
        config.chain_enabled = true;
        config.chain_jumps = 3;
        let snapshot = SpecialEffectsSnapshot::compose(&config);

        // A tuning change after the volley resolved must not reach the
        // in-flight snapshot.
        config.chain_jumps = 99;
        config.chain_enabled = false;
        assert_eq!(snapshot.chain.unwrap().jumps, 3);
    }

    #[test]
    fn chain_damage_compounds_per_jump() {
        let chain = ChainParams {
            range: 160.0,
            jumps: 3,
            damage_decay: 0.3,
        };
        // base 100, decay 0.3: hit sequence 100, 70, 49.
        assert_eq!(chain.damage_at_jump(100, 0), 100);
        assert_eq!(chain.damage_at_jump(100, 1), 70);
        assert_eq!(chain.damage_at_jump(100, 2), 49);
    }

    #[test]
    fn pierce_damage_decays_per_target() {
        let pierce = PierceParams {
            count: 3,
            damage_decay: 0.25,
        };
        assert_eq!(pierce.damage_at_hit(80, 0), 80);
        assert_eq!(pierce.damage_at_hit(80, 1), 60);
        assert_eq!(pierce.damage_at_hit(80, 2), 45);
    }
}
