//! Weapon engine resources and the message surface to its collaborators.
//!
//! The engine talks to the rest of the game exclusively through the types in
//! this file: an intent resource written by the input layer, inbound command
//! messages from progression/pickup collaborators, and outbound result
//! messages consumed by the projectile spawner and UI/audio feedback.  There
//! is no event bus and no back-door into engine internals — diagnostics go
//! through the read-only [`WeaponHudState`] snapshot.

use crate::weapon::level::FirePattern;
use crate::weapon::modifiers::ModifierKind;
use crate::weapon::resolver::{BlockReason, FireSpec};
use bevy::prelude::*;

// ── Input abstraction ─────────────────────────────────────────────────────────

/// Aggregated firing intent for the current tick, derived from all input
/// sources.
///
/// Input systems write to this resource each frame after it is cleared;
/// `fire_resolution_system` reads it and resolves at most one volley.  Tests
/// can populate this directly to drive the engine without a real input
/// device.
///
/// `wants_rear` is only meaningful in the rear cannon's Independent mode: the
/// external rear-cooldown collaborator sets it when the rear trigger
/// condition is satisfied.  In SyncedWithForward mode the rear cannon simply
/// follows `wants_forward`.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireIntent {
    pub wants_forward: bool,
    pub wants_rear: bool,
}

impl FireIntent {
    /// Whether any trigger is held this tick.
    #[inline]
    pub fn any(self) -> bool {
        self.wants_forward || self.wants_rear
    }
}

// ── Inbound messages ──────────────────────────────────────────────────────────

/// Power-level change request from a progression collaborator.
///
/// Both variants clamp into `[1, max_level]`; out-of-range values are
/// corrected silently, never rejected.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerLevelCommand {
    /// Shift the level by a signed delta (pickups, death penalties).
    LevelUp(i32),
    /// Jump straight to a level (save restore, debug).
    SetLevel(u32),
}

/// Request to apply (or refresh) a time-limited modifier.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyModifier {
    pub kind: ModifierKind,
}

// ── Outbound messages ─────────────────────────────────────────────────────────

/// A resolved volley: one [`FireSpec`] per projectile, forward barrels first,
/// rear last.  Consumed by the projectile-spawning collaborator, which owns
/// the specs from here on.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct VolleyFired {
    pub specs: Vec<FireSpec>,
}

/// A fire request that produced no shot this tick.  Consumed by UI/audio
/// feedback (e.g. the overheat warning buzzer).  Re-asserting intent next
/// tick is the only retry mechanism.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireBlocked {
    pub reason: BlockReason,
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Read-only snapshot of the engine state for HUD display and external
/// pacing.
///
/// This is the engine's entire diagnostic surface: heat gauge, lockout flag,
/// current pattern and level, and the effective fire intervals the external
/// cooldown layer paces itself with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponHudState {
    /// Current power level (1-indexed).
    pub level: u32,
    /// Configured level ceiling.
    pub max_level: u32,
    /// Pattern the next volley will use.
    pub pattern: FirePattern,
    /// Heat as a fraction of capacity, `0.0..=1.0`.
    pub heat_ratio: f32,
    /// True while the overheat lockout is running.
    pub overheated: bool,
    /// Seconds of lockout left; zero when not overheated.
    pub overheat_remaining: f32,
    /// Effective seconds between forward volleys (level scaling and rate
    /// modifiers applied, floored at the engine minimum).
    pub fire_interval: f32,
    /// Effective rear-cannon interval; `None` when the rear cannon is
    /// disabled.
    pub rear_fire_interval: Option<f32>,
    /// Number of active stat modifiers.
    pub active_modifiers: usize,
}
