//! Weapon module: the deterministic fire-resolution engine.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `FireIntent` resource, inbound/outbound messages, HUD snapshot |
//! | [`level`] | Power-level scaling: patterns, damage/rate/speed/size formulas |
//! | [`modifiers`] | Time-limited multiplicative stat modifiers |
//! | [`heat`] | Heat accumulation and the overheat lockout state machine |
//! | [`effects`] | Special-effect toggles snapshotted per fire event |
//! | [`resolver`] | `WeaponEngine`: per-tick fire decision and `FireSpec` output |
//! | [`systems`] | The chained per-tick Bevy pipeline |
//!
//! All public items are re-exported at this level so the rest of the crate
//! can use flat `crate::weapon::*` imports without knowing the sub-module
//! layout.

pub mod effects;
pub mod heat;
pub mod level;
pub mod modifiers;
pub mod resolver;
pub mod state;
pub mod systems;

// ── Flat re-exports (backward-compatible API surface) ─────────────────────────

pub use effects::{
    ChainParams, ExplosionParams, HomingParams, PierceParams, RicochetParams,
    SpecialEffectsSnapshot,
};
pub use heat::{shot_cost, HeatState, HeatStatus};
pub use level::{
    clamp_level, pattern_for_level, scaled_damage, scaled_fire_interval, scaled_size,
    scaled_speed, FirePattern,
};
pub use modifiers::{ActiveModifier, ModifierKind, ModifierStack, StatCategory};
pub use resolver::{BlockReason, FireResult, FireSpec, WeaponEngine};
pub use state::{
    ApplyModifier, FireBlocked, FireIntent, PowerLevelCommand, VolleyFired, WeaponHudState,
};
pub use systems::{
    fire_intent_clear_system, fire_resolution_system, modifier_apply_system,
    power_level_command_system, weapon_tick_system,
};

use crate::config::WeaponConfig;
use bevy::prelude::*;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the engine resources, its message types, and the chained
/// per-tick pipeline.
///
/// The [`WeaponConfig`] resource starts at compiled defaults; the binary adds
/// [`crate::config::load_weapon_config`] at startup to overlay
/// `assets/weapon.toml`.  Headless tests add just this plugin and drive
/// [`FireIntent`] directly.
pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeaponConfig>()
            .init_resource::<WeaponEngine>()
            .init_resource::<FireIntent>()
            .add_message::<PowerLevelCommand>()
            .add_message::<ApplyModifier>()
            .add_message::<VolleyFired>()
            .add_message::<FireBlocked>()
            .add_systems(
                Update,
                (
                    weapon_tick_system,
                    power_level_command_system,
                    modifier_apply_system,
                    fire_resolution_system,
                    fire_intent_clear_system,
                )
                    .chain(),
            );
    }
}
