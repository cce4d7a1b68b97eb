//! Per-tick weapon engine systems.
//!
//! ## Pipeline (runs chained, in order, every `Update` frame)
//!
//! 1. [`weapon_tick_system`] — heat decay + modifier expiry.  Runs first so
//!    a modifier expiring "this tick" never applies to this tick's shot and
//!    the headroom check sees post-decay heat.
//! 2. [`power_level_command_system`] — applies queued level events.
//! 3. [`modifier_apply_system`] — applies queued modifier pickups.
//! 4. [`fire_resolution_system`] — resolves the tick's [`FireIntent`] into
//!    [`VolleyFired`] / [`FireBlocked`] messages.
//! 5. [`fire_intent_clear_system`] — resets the intent for the next frame.
//!
//! Input systems (owned by the external input layer) write `FireIntent`
//! before this pipeline runs; tests populate the resource directly.

use crate::config::WeaponConfig;
use crate::weapon::resolver::{FireResult, WeaponEngine};
use crate::weapon::state::{
    ApplyModifier, FireBlocked, FireIntent, PowerLevelCommand, VolleyFired,
};
use bevy::prelude::*;

// ── Step 1: Upkeep ────────────────────────────────────────────────────────────

/// Advance heat decay and modifier expiry by this frame's delta.
pub fn weapon_tick_system(
    mut engine: ResMut<WeaponEngine>,
    config: Res<WeaponConfig>,
    time: Res<Time>,
) {
    engine.tick(&config, time.delta_secs());
}

// ── Step 2: Level events ──────────────────────────────────────────────────────

/// Apply queued [`PowerLevelCommand`] messages from progression collaborators.
///
/// Delivered between upkeep and fire resolution so a level-up collected this
/// frame counts for this frame's shot.
pub fn power_level_command_system(
    mut engine: ResMut<WeaponEngine>,
    config: Res<WeaponConfig>,
    mut commands: MessageReader<PowerLevelCommand>,
) {
    for command in commands.read() {
        match *command {
            PowerLevelCommand::LevelUp(delta) => engine.level_up(&config, delta),
            PowerLevelCommand::SetLevel(level) => engine.set_level(&config, level),
        }
    }
}

// ── Step 3: Modifier events ───────────────────────────────────────────────────

/// Apply queued [`ApplyModifier`] messages from pickup collaborators.
pub fn modifier_apply_system(
    mut engine: ResMut<WeaponEngine>,
    config: Res<WeaponConfig>,
    mut modifiers: MessageReader<ApplyModifier>,
) {
    for message in modifiers.read() {
        engine.apply_modifier(&config, message.kind);
    }
}

// ── Step 4: Fire resolution ───────────────────────────────────────────────────

/// Resolve this tick's [`FireIntent`] into outbound messages.
///
/// At most one volley per tick.  An idle intent produces nothing; a resolved
/// empty volley (rear requested while the rear cannon is disabled) is also
/// silent — there is nothing to spawn and nothing to report.
pub fn fire_resolution_system(
    mut engine: ResMut<WeaponEngine>,
    config: Res<WeaponConfig>,
    intent: Res<FireIntent>,
    mut fired: MessageWriter<VolleyFired>,
    mut blocked: MessageWriter<FireBlocked>,
) {
    if !intent.any() {
        return;
    }
    match engine.resolve_fire(&config, *intent) {
        FireResult::Fired(specs) => {
            if !specs.is_empty() {
                fired.write(VolleyFired { specs });
            }
        }
        FireResult::Blocked(reason) => {
            blocked.write(FireBlocked { reason });
        }
    }
}

// ── Step 5: Clear ─────────────────────────────────────────────────────────────

/// Reset [`FireIntent`] so the next frame starts from a clean slate.
///
/// Must run after [`fire_resolution_system`]; input systems re-assert intent
/// each frame.
pub fn fire_intent_clear_system(mut intent: ResMut<FireIntent>) {
    *intent = FireIntent::default();
}
