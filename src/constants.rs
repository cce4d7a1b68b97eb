//! Centralised weapon-tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::WeaponConfig`] mirrors every constant in this file as its
//! compile-time default; `assets/weapon.toml` can override any subset at
//! startup.
//!
//! ## Tuning guidance
//!
//! Each constant includes the tested range and the observable consequence of
//! changing it.  After editing, run the scripted scenarios
//! (`VOLLEY_SCENARIO=sustained_overheat cargo run`, etc.) to confirm firing
//! behaviour has not regressed.

// ── Base Projectile Stats ─────────────────────────────────────────────────────

/// Damage dealt by a single unmodified projectile at power level 1.
///
/// Scales with power level (`DAMAGE_PER_LEVEL`) and damage modifiers.
/// Tested range: 8.0–20.0.  At 12.0 a level-4 shot lands 16 damage.
pub const BASE_DAMAGE: f32 = 12.0;

/// Seconds between consecutive forward volleys at power level 1.
///
/// This is an *interval* — smaller is faster.  The external input/cooldown
/// layer paces fire requests with this value (read via the HUD snapshot);
/// the engine itself resolves at most one volley per tick.
pub const BASE_FIRE_INTERVAL: f32 = 0.22;

/// Hard floor for the effective fire interval (seconds).
///
/// Level scaling and rapid-fire modifiers multiply the interval down; this
/// floor guarantees it never reaches zero or goes negative regardless of
/// config values.
pub const MIN_FIRE_INTERVAL: f32 = 0.05;

/// Muzzle speed of a projectile at power level 1 (world units / second).
pub const BASE_PROJECTILE_SPEED: f32 = 520.0;

/// Visual/collision radius of a projectile at power level 1 (world units).
pub const BASE_PROJECTILE_SIZE: f32 = 4.0;

/// Seconds a projectile lives before the spawner despawns it.
pub const PROJECTILE_LIFETIME: f32 = 1.6;

// ── Fire Patterns ─────────────────────────────────────────────────────────────

/// Power level at which the Double pattern unlocks (auto-upgrade mode).
///
/// Pattern unlock levels must be non-decreasing with tier; config validation
/// rejects documents that violate this.
pub const DOUBLE_SHOT_LEVEL: u32 = 2;

/// Power level at which the Triple pattern unlocks (auto-upgrade mode).
pub const TRIPLE_SHOT_LEVEL: u32 = 4;

/// Power level at which the Quad pattern unlocks (auto-upgrade mode).
pub const QUAD_SHOT_LEVEL: u32 = 7;

/// Power level at which the X5 pattern unlocks (auto-upgrade mode).
pub const X5_SHOT_LEVEL: u32 = 9;

/// Full fan arc of the Double pattern (degrees, edge to edge).
pub const DOUBLE_SPREAD_DEG: f32 = 6.0;

/// Full fan arc of the Triple pattern (degrees).
pub const TRIPLE_SPREAD_DEG: f32 = 14.0;

/// Full fan arc of the Quad pattern (degrees).
pub const QUAD_SPREAD_DEG: f32 = 22.0;

/// Full fan arc of the X5 pattern (degrees).
pub const X5_SPREAD_DEG: f32 = 30.0;

/// Forward distance from the ship origin to the muzzle spawn point.
pub const MUZZLE_OFFSET: f32 = 14.0;

/// Side-to-side spacing between barrels of a multi-shot volley (world units).
pub const LATERAL_SPACING: f32 = 6.0;

/// Whether patterns unlock automatically from power level thresholds.
/// When `false`, `manual_pattern` from the config is used unconditionally.
pub const AUTO_UPGRADE_PATTERN: bool = true;

// ── Rear Weapon ───────────────────────────────────────────────────────────────

/// Whether the rear cannon exists at all.  Off by default; enabled via config.
pub const REAR_ENABLED: bool = false;

/// Damage multiplier applied to the rear projectile relative to a forward one.
pub const REAR_DAMAGE_MULTIPLIER: f32 = 0.6;

/// Fire-interval multiplier for the rear cannon's independent timer.
/// > 1.0 means the rear cannon fires slower than the forward battery.
pub const REAR_FIRE_INTERVAL_MULTIPLIER: f32 = 1.5;

/// Distance behind the ship origin at which the rear projectile spawns.
pub const REAR_OFFSET: f32 = 10.0;

// ── Heat ──────────────────────────────────────────────────────────────────────

/// Heat added by one single-pattern forward shot.
///
/// Tested range: 0.4–2.0.  At 0.8 with `MAX_HEAT` 100 an uninterrupted
/// single-shot stream overheats on the 125th shot.
pub const HEAT_PER_SHOT: f32 = 0.8;

/// Heat drained per second while the weapon is Cool.
///
/// Raise for more forgiving sustained fire; lower to force burst discipline.
pub const COOLDOWN_RATE: f32 = 14.0;

/// Heat capacity.  Reaching this value triggers the Overheated lockout.
pub const MAX_HEAT: f32 = 100.0;

/// Seconds the weapon stays locked out after overheating.
pub const OVERHEAT_DURATION: f32 = 2.0;

/// Multiplier on `COOLDOWN_RATE` while Overheated.
///
/// Below 1.0 recovery is slower during the lockout; the penalty makes
/// overheating cost more than the lockout window alone.
pub const OVERHEAT_COOLDOWN_MULTIPLIER: f32 = 0.5;

/// Extra heat per additional projectile in a multi-shot volley, as a fraction
/// of `HEAT_PER_SHOT`.  A Triple volley costs `1 + 2 × this` single shots.
pub const MULTISHOT_HEAT_MULTIPLIER: f32 = 0.85;

/// Heat multiplier for a rear-cannon shot relative to a forward single shot.
pub const REAR_HEAT_MULTIPLIER: f32 = 1.25;

// ── Power Level Scaling ───────────────────────────────────────────────────────

/// Highest reachable power level (1-indexed, inclusive).
pub const MAX_POWER_LEVEL: u32 = 10;

/// Fractional damage gained per level above 1.
/// `damage = BASE_DAMAGE × (1 + DAMAGE_PER_LEVEL × (level − 1))`.
pub const DAMAGE_PER_LEVEL: f32 = 0.1;

/// Fractional fire-interval reduction per level above 1.
/// The result is floored at `MIN_FIRE_INTERVAL`.
pub const FIRE_RATE_PER_LEVEL: f32 = 0.06;

/// Flat projectile-speed gain per level above 1 (world units / second).
pub const PROJECTILE_SPEED_PER_LEVEL: f32 = 28.0;

/// Fractional projectile-size gain per level above 1.
pub const PROJECTILE_SIZE_PER_LEVEL: f32 = 0.05;

// ── Modifiers (time-limited pickups) ──────────────────────────────────────────

/// Rapid-fire: fire-interval multiplier (below 1.0 = faster).
pub const RAPID_FIRE_MULTIPLIER: f32 = 0.5;
/// Seconds a rapid-fire pickup stays active; re-collection refreshes, never stacks.
pub const RAPID_FIRE_DURATION: f32 = 6.0;

/// Power rounds: damage multiplier.
pub const POWER_ROUNDS_MULTIPLIER: f32 = 2.0;
/// Seconds a power-rounds pickup stays active.
pub const POWER_ROUNDS_DURATION: f32 = 8.0;

/// High velocity: projectile-speed multiplier.
pub const HIGH_VELOCITY_MULTIPLIER: f32 = 1.5;
/// Seconds a high-velocity pickup stays active.
pub const HIGH_VELOCITY_DURATION: f32 = 8.0;

/// Heavy caliber: projectile-size multiplier.
pub const HEAVY_CALIBER_MULTIPLIER: f32 = 1.75;
/// Seconds a heavy-caliber pickup stays active.
pub const HEAVY_CALIBER_DURATION: f32 = 7.0;

// ── Special Effects ───────────────────────────────────────────────────────────
//
// All effects default to disabled; the numeric parameters below take effect
// once the matching `*_enabled` config flag is switched on.  Enabled effects
// are orthogonal — any combination may ride on the same projectile.

/// Targets a piercing projectile passes through before despawning.
pub const PIERCE_COUNT: u32 = 3;

/// Fractional damage lost per pierced target (0.25 → 75 % kept per hit).
pub const PIERCE_DAMAGE_DECAY: f32 = 0.25;

/// Radius within which a homing projectile acquires a target (world units).
pub const HOMING_RANGE: f32 = 240.0;

/// Steering strength of a homing projectile (turn rate, rad/s).
pub const HOMING_STRENGTH: f32 = 4.5;

/// Blast radius of an explosive projectile (world units).
pub const EXPLOSION_RADIUS: f32 = 48.0;

/// Splash damage as a fraction of the projectile's direct-hit damage.
pub const EXPLOSION_DAMAGE_MULTIPLIER: f32 = 0.5;

/// Wall bounces a ricochet projectile survives.
pub const RICOCHET_BOUNCES: u32 = 2;

/// Max distance chain lightning arcs to the next target (world units).
pub const CHAIN_RANGE: f32 = 160.0;

/// Targets hit after the initial one.
pub const CHAIN_JUMPS: u32 = 3;

/// Fractional damage lost per jump (0.3 → hit sequence 100, 70, 49).
pub const CHAIN_DAMAGE_DECAY: f32 = 0.3;
