//! Fire-request resolution: the per-tick decision of whether a volley fires
//! and exactly what it contains.
//!
//! [`WeaponEngine`] owns the mutable weapon state (power level, heat,
//! modifier stack) and orchestrates the pure pieces around it.  Resolution
//! order per request:
//!
//! 1. Overheated → [`BlockReason::Overheated`], nothing else is computed.
//! 2. Price every mount firing this tick (forward volley, rear cannon) and
//!    sum the heat costs.
//! 3. Budget check-then-apply in a single atomic step — over budget →
//!    [`BlockReason::InsufficientHeatBudget`] with no partial cost applied.
//! 4. Build one [`FireSpec`] per projectile: level-scaled stats, modifier
//!    multipliers, symmetric spread fan, effects snapshot.
//! 5. Forward projectiles first, rear last.
//!
//! Directions are expressed in the ship's local frame (forward = +Y, the
//! convention the spawner collaborator converts into world space).

use crate::config::{RearSyncMode, WeaponConfig};
use crate::weapon::effects::SpecialEffectsSnapshot;
use crate::weapon::heat::{shot_cost, HeatState, HeatStatus};
use crate::weapon::level::{
    clamp_level, pattern_for_level, scaled_damage, scaled_fire_interval, scaled_size,
    scaled_speed, FirePattern,
};
use crate::weapon::modifiers::{ModifierKind, ModifierStack, StatCategory};
use crate::weapon::state::{FireIntent, WeaponHudState};
use bevy::prelude::*;

use crate::constants::MIN_FIRE_INTERVAL;

// ── Output types ──────────────────────────────────────────────────────────────

/// Fully resolved parameters for one spawned projectile.
///
/// Produced fresh per fire event; owned by the spawner collaborator after
/// emission.  `offset` and `direction` are in the ship's local frame
/// (forward = +Y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireSpec {
    /// Damage in integer damage units, all multipliers applied.
    pub damage: u32,
    /// Muzzle speed (world units / second).
    pub speed: f32,
    /// Projectile radius (world units).
    pub size: f32,
    /// Seconds before the spawner despawns the projectile.
    pub lifetime: f32,
    /// Spawn offset from the ship origin.
    pub offset: Vec2,
    /// Unit travel direction.
    pub direction: Vec2,
    /// True for the rear-cannon projectile.
    pub rear: bool,
    /// Special behaviours captured at fire time.
    pub effects: SpecialEffectsSnapshot,
}

/// Why a fire request produced no shot this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The overheat lockout window is running.
    Overheated,
    /// The summed volley cost exceeds the remaining heat headroom.
    InsufficientHeatBudget,
}

/// Outcome of one fire request.
#[derive(Debug, Clone, PartialEq)]
pub enum FireResult {
    /// The volley fired; forward projectiles first, rear last.  An intent
    /// that nets no barrels (rear requested while the rear cannon is
    /// disabled) resolves to an empty volley with no heat cost.
    Fired(Vec<FireSpec>),
    /// No shot this tick; the caller re-asserts intent next tick if desired.
    Blocked(BlockReason),
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// The weapon resolution engine: power level, heat, and modifier state for
/// one weapon instance.
///
/// Single-writer: systems mutate this resource exclusively through its
/// methods, one tick at a time.  Multiple independent weapons (multiple
/// players) are simply multiple `WeaponEngine` values with no shared state.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WeaponEngine {
    level: u32,
    heat: HeatState,
    modifiers: ModifierStack,
}

impl Default for WeaponEngine {
    fn default() -> Self {
        Self {
            level: 1,
            heat: HeatState::default(),
            modifiers: ModifierStack::default(),
        }
    }
}

impl WeaponEngine {
    /// Fresh engine at power level 1 with zero heat and no modifiers.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Per-tick upkeep ───────────────────────────────────────────────────────

    /// Advance heat decay and modifier expiry by `dt` seconds.
    ///
    /// Must run before any fire resolution in the same tick: a modifier
    /// expiring exactly now must not apply to this tick's shot, and the
    /// headroom check must see post-decay heat.
    pub fn tick(&mut self, config: &WeaponConfig, dt: f32) {
        self.heat.tick(config, dt);
        self.modifiers.tick(dt);
    }

    // ── External events ───────────────────────────────────────────────────────

    /// Shift the power level by `delta`, clamped into `[1, max_level]`.
    pub fn level_up(&mut self, config: &WeaponConfig, delta: i32) {
        let shifted = self.level as i64 + delta as i64;
        self.level = clamp_level(config, shifted.clamp(1, u32::MAX as i64) as u32);
    }

    /// Jump to `level`, clamped into `[1, max_level]`.
    pub fn set_level(&mut self, config: &WeaponConfig, level: u32) {
        self.level = clamp_level(config, level);
    }

    /// Apply (or refresh) a time-limited modifier.
    pub fn apply_modifier(&mut self, config: &WeaponConfig, kind: ModifierKind) {
        self.modifiers.apply(kind, config);
    }

    // ── Read-only queries ─────────────────────────────────────────────────────

    /// Current power level (1-indexed).
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Pattern the next volley will use.
    #[inline]
    pub fn pattern(&self, config: &WeaponConfig) -> FirePattern {
        pattern_for_level(config, self.level)
    }

    /// Heat state, read-only (HUD gauge, tests).
    #[inline]
    pub fn heat(&self) -> &HeatState {
        &self.heat
    }

    /// Modifier stack, read-only.
    #[inline]
    pub fn modifiers(&self) -> &ModifierStack {
        &self.modifiers
    }

    /// Effective seconds between forward volleys: level scaling plus the
    /// fire-rate modifier, floored at the engine minimum.  The external
    /// input/cooldown layer paces forward fire requests with this value.
    pub fn effective_fire_interval(&self, config: &WeaponConfig) -> f32 {
        let scaled = scaled_fire_interval(config, self.level);
        (scaled * self.modifiers.multiplier_for(StatCategory::FireRate)).max(MIN_FIRE_INTERVAL)
    }

    /// Effective rear-cannon interval, or `None` while the rear cannon is
    /// disabled.  Only meaningful to the external rear-cooldown collaborator
    /// in Independent mode.
    pub fn effective_rear_fire_interval(&self, config: &WeaponConfig) -> Option<f32> {
        config.rear_enabled.then(|| {
            (self.effective_fire_interval(config) * config.rear_fire_interval_multiplier)
                .max(MIN_FIRE_INTERVAL)
        })
    }

    /// The narrow read-only diagnostic snapshot for HUD display.
    pub fn hud(&self, config: &WeaponConfig) -> WeaponHudState {
        WeaponHudState {
            level: self.level,
            max_level: config.max_level,
            pattern: self.pattern(config),
            heat_ratio: self.heat.heat_ratio(config),
            overheated: self.heat.status() == HeatStatus::Overheated,
            overheat_remaining: self.heat.overheat_remaining(),
            fire_interval: self.effective_fire_interval(config),
            rear_fire_interval: self.effective_rear_fire_interval(config),
            active_modifiers: self.modifiers.active_count(),
        }
    }

    // ── Fire resolution ───────────────────────────────────────────────────────

    /// Resolve one fire request against the current state.
    ///
    /// See the module docs for the step ordering.  The caller guarantees
    /// [`Self::tick`] already ran this tick.
    pub fn resolve_fire(&mut self, config: &WeaponConfig, intent: FireIntent) -> FireResult {
        if self.heat.status() == HeatStatus::Overheated {
            return FireResult::Blocked(BlockReason::Overheated);
        }

        let fires_forward = intent.wants_forward;
        let fires_rear = config.rear_enabled
            && match config.rear_sync {
                RearSyncMode::SyncedWithForward => fires_forward,
                RearSyncMode::Independent => intent.wants_rear,
            };
        if !fires_forward && !fires_rear {
            return FireResult::Fired(Vec::new());
        }

        let pattern = self.pattern(config);
        let mut cost = 0.0;
        if fires_forward {
            cost += shot_cost(config, pattern, false);
        }
        if fires_rear {
            cost += shot_cost(config, FirePattern::Single, true);
        }
        // Single check-then-apply for the whole tick: the forward volley can
        // never be accepted with the rear shot silently pushing heat over
        // budget afterwards.
        if !self.heat.try_consume(config, cost) {
            return FireResult::Blocked(BlockReason::InsufficientHeatBudget);
        }

        let base_damage = scaled_damage(config, self.level);
        let damage_multiplier = self.modifiers.multiplier_for(StatCategory::Damage);
        let speed =
            scaled_speed(config, self.level) * self.modifiers.multiplier_for(StatCategory::Speed);
        let size =
            scaled_size(config, self.level) * self.modifiers.multiplier_for(StatCategory::Size);
        let effects = SpecialEffectsSnapshot::compose(config);

        let mut specs = Vec::new();
        if fires_forward {
            let count = pattern.projectile_count();
            let spread = pattern.spread_deg(config);
            for barrel in 0..count {
                let centered = barrel as f32 - (count as f32 - 1.0) / 2.0;
                let angle_deg = if count > 1 {
                    -spread / 2.0 + spread * barrel as f32 / (count as f32 - 1.0)
                } else {
                    0.0
                };
                let rad = angle_deg.to_radians();
                specs.push(FireSpec {
                    damage: multiplied_damage(base_damage, damage_multiplier),
                    speed,
                    size,
                    lifetime: config.projectile_lifetime,
                    offset: Vec2::new(centered * config.lateral_spacing, config.muzzle_offset),
                    // Local +Y rotated by the fan angle.
                    direction: Vec2::new(-rad.sin(), rad.cos()),
                    rear: false,
                    effects,
                });
            }
        }
        if fires_rear {
            specs.push(FireSpec {
                damage: multiplied_damage(
                    base_damage,
                    damage_multiplier * config.rear_damage_multiplier,
                ),
                speed,
                size,
                lifetime: config.projectile_lifetime,
                offset: Vec2::NEG_Y * config.rear_offset,
                direction: Vec2::NEG_Y,
                rear: true,
                effects,
            });
        }

        FireResult::Fired(specs)
    }
}

/// Apply a damage multiplier to an integer damage value, rounding half-up.
fn multiplied_damage(damage: u32, multiplier: f32) -> u32 {
    (damage as f32 * multiplier).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WeaponConfig {
        WeaponConfig::default()
    }

    fn forward_intent() -> FireIntent {
        FireIntent {
            wants_forward: true,
            wants_rear: false,
        }
    }

    fn fired_specs(result: FireResult) -> Vec<FireSpec> {
        match result {
            FireResult::Fired(specs) => specs,
            FireResult::Blocked(reason) => panic!("expected a volley, got Blocked({reason:?})"),
        }
    }

    #[test]
    fn single_pattern_fires_one_straight_projectile() {
        let config = config();
        let mut engine = WeaponEngine::new();
        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));

        assert_eq!(specs.len(), 1);
        let spec = specs[0];
        assert_eq!(spec.damage, 12);
        assert!(!spec.rear);
        assert!((spec.direction - Vec2::Y).length() < 1e-6);
        assert_eq!(spec.offset, Vec2::new(0.0, config.muzzle_offset));
        assert_eq!(spec.lifetime, config.projectile_lifetime);
    }

    #[test]
    fn triple_pattern_spreads_symmetrically_with_center_shot() {
        let config = config();
        let mut engine = WeaponEngine::new();
        engine.set_level(&config, config.triple_shot_level);
        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));

        assert_eq!(specs.len(), 3);
        // Odd count: the middle projectile fires straight ahead.
        assert!((specs[1].direction - Vec2::Y).length() < 1e-6);
        assert_eq!(specs[1].offset.x, 0.0);
        // Edges mirror each other about the centre line.
        assert!((specs[0].direction.x + specs[2].direction.x).abs() < 1e-6);
        assert!((specs[0].direction.y - specs[2].direction.y).abs() < 1e-6);
        assert!((specs[0].offset.x + specs[2].offset.x).abs() < 1e-6);
    }

    #[test]
    fn even_count_has_no_straight_projectile() {
        let config = config();
        let mut engine = WeaponEngine::new();
        engine.set_level(&config, config.double_shot_level);
        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));

        assert_eq!(specs.len(), 2);
        assert!(specs[0].direction.x.abs() > 1e-6);
        assert!((specs[0].direction.x + specs[1].direction.x).abs() < 1e-6);
    }

    #[test]
    fn rear_cannon_fires_backward_with_reduced_damage() {
        let mut config = config();
        config.rear_enabled = true;
        config.rear_sync = RearSyncMode::SyncedWithForward;
        let mut engine = WeaponEngine::new();

        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));
        assert_eq!(specs.len(), 2);

        // Rear projectile is last, flies along -Y from the rear offset.
        let rear = specs.last().unwrap();
        assert!(rear.rear);
        assert!((rear.direction - Vec2::NEG_Y).length() < 1e-6);
        assert_eq!(rear.offset, Vec2::NEG_Y * config.rear_offset);
        let expected = (12.0 * config.rear_damage_multiplier).round() as u32;
        assert_eq!(rear.damage, expected);
    }

    #[test]
    fn independent_rear_fires_only_on_rear_intent() {
        let mut config = config();
        config.rear_enabled = true;
        config.rear_sync = RearSyncMode::Independent;
        let mut engine = WeaponEngine::new();

        // Forward only: no rear projectile.
        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));
        assert_eq!(specs.len(), 1);

        // Rear trigger reported ready by the external cooldown layer.
        let specs = fired_specs(engine.resolve_fire(
            &config,
            FireIntent {
                wants_forward: false,
                wants_rear: true,
            },
        ));
        assert_eq!(specs.len(), 1);
        assert!(specs[0].rear);
    }

    #[test]
    fn rear_intent_with_rear_disabled_nets_an_empty_volley() {
        let config = config();
        let mut engine = WeaponEngine::new();
        let heat_before = engine.heat().value();
        let specs = fired_specs(engine.resolve_fire(
            &config,
            FireIntent {
                wants_forward: false,
                wants_rear: true,
            },
        ));
        assert!(specs.is_empty());
        assert_eq!(engine.heat().value(), heat_before);
    }

    #[test]
    fn overheated_engine_blocks_before_anything_else() {
        let config = config();
        let mut engine = WeaponEngine::new();
        // Drive heat to the cap in one volley-sized consume.
        assert!(engine.heat.try_consume(&config, config.max_heat));

        let result = engine.resolve_fire(&config, forward_intent());
        assert_eq!(result, FireResult::Blocked(BlockReason::Overheated));
    }

    #[test]
    fn over_budget_volley_applies_no_partial_cost() {
        let mut config = config();
        config.rear_enabled = true;
        config.rear_sync = RearSyncMode::SyncedWithForward;
        // Leave room for the forward shot alone but not forward + rear.
        let forward = shot_cost(&config, FirePattern::Single, false);
        let mut engine = WeaponEngine::new();
        assert!(engine
            .heat
            .try_consume(&config, config.max_heat - forward - 0.01));
        let heat_before = engine.heat().value();

        let result = engine.resolve_fire(&config, forward_intent());
        assert_eq!(
            result,
            FireResult::Blocked(BlockReason::InsufficientHeatBudget)
        );
        // All-or-nothing: the affordable forward half was not applied either.
        assert_eq!(engine.heat().value(), heat_before);
    }

    #[test]
    fn damage_modifier_multiplies_resolved_damage() {
        let config = config();
        let mut engine = WeaponEngine::new();
        engine.apply_modifier(&config, ModifierKind::PowerRounds);
        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));
        let expected = (12.0 * config.power_rounds_multiplier).round() as u32;
        assert_eq!(specs[0].damage, expected);
    }

    #[test]
    fn expired_modifier_does_not_reach_the_same_ticks_shot() {
        let config = config();
        let mut engine = WeaponEngine::new();
        engine.apply_modifier(&config, ModifierKind::PowerRounds);

        // The tick that lands exactly on expiry runs before resolution; the
        // shot resolved afterwards must use unmodified damage.
        engine.tick(&config, config.power_rounds_duration);
        let specs = fired_specs(engine.resolve_fire(&config, forward_intent()));
        assert_eq!(specs[0].damage, 12);
    }

    #[test]
    fn identical_state_resolves_identical_specs() {
        let config = config();
        let mut engine = WeaponEngine::new();
        engine.set_level(&config, 4);
        engine.apply_modifier(&config, ModifierKind::HighVelocity);

        let first = fired_specs(engine.resolve_fire(&config, forward_intent()));
        // A zero-length tick between requests: no decay, no expiry.
        engine.tick(&config, 0.0);
        let second = fired_specs(engine.resolve_fire(&config, forward_intent()));

        // Identical in every field; only heat headroom was consumed.
        assert_eq!(first, second);
    }

    #[test]
    fn rate_modifier_shortens_the_effective_interval() {
        let config = config();
        let mut engine = WeaponEngine::new();
        let base = engine.effective_fire_interval(&config);
        engine.apply_modifier(&config, ModifierKind::RapidFire);
        let boosted = engine.effective_fire_interval(&config);
        assert!((boosted - base * config.rapid_fire_multiplier).abs() < 1e-6);
        assert!(boosted >= MIN_FIRE_INTERVAL);
    }

    #[test]
    fn hud_snapshot_reports_engine_state() {
        let mut config = config();
        config.rear_enabled = true;
        let mut engine = WeaponEngine::new();
        engine.set_level(&config, config.triple_shot_level);
        engine.apply_modifier(&config, ModifierKind::RapidFire);

        let hud = engine.hud(&config);
        assert_eq!(hud.level, config.triple_shot_level);
        assert_eq!(hud.pattern, FirePattern::Triple);
        assert_eq!(hud.heat_ratio, 0.0);
        assert!(!hud.overheated);
        assert_eq!(hud.active_modifiers, 1);
        assert!(hud.rear_fire_interval.is_some());
    }

    #[test]
    fn level_events_clamp_into_range() {
        let config = config();
        let mut engine = WeaponEngine::new();
        engine.level_up(&config, -5);
        assert_eq!(engine.level(), 1);
        engine.level_up(&config, 200);
        assert_eq!(engine.level(), config.max_level);
        engine.set_level(&config, 0);
        assert_eq!(engine.level(), 1);
        engine.set_level(&config, 3);
        assert_eq!(engine.level(), 3);
    }
}
