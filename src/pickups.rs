//! Pickup-to-effect dispatch: collected pickups become engine inputs.
//!
//! ## Flow
//!
//! 1. A world/collision collaborator (not part of this crate) detects the
//!    player touching a pickup and emits [`PickupCollected`] with the
//!    pickup's kind.
//! 2. [`apply_pickup_system`] dispatches each collected kind through one
//!    closed `match` into the engine's explicit inputs:
//!    modifier pickups → [`ApplyModifier`], power cells →
//!    [`PowerLevelCommand::LevelUp`].
//! 3. [`PickupTally`] counts collections per run for the HUD.
//!
//! The kind set is a deliberately closed variant: adding a pickup means
//! extending [`PickupKind`] and the single dispatch `match`, which the
//! compiler then checks exhaustively.  There is no open-ended pickup
//! subtyping and no reflection.

use crate::weapon::{ApplyModifier, ModifierKind, PowerLevelCommand};
use bevy::prelude::*;

// ── Messages & Resources ──────────────────────────────────────────────────────

/// Every pickup the game can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    /// Time-limited fire-interval buff.
    RapidFire,
    /// Time-limited damage buff.
    PowerRounds,
    /// Time-limited projectile-speed buff.
    HighVelocity,
    /// Time-limited projectile-size buff.
    HeavyCaliber,
    /// Permanent +1 power level.
    PowerCell,
}

/// A pickup the player just collected, reported by the world collaborator.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupCollected {
    pub kind: PickupKind,
}

/// Pickups collected this run (HUD display).
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PickupTally {
    pub collected: u32,
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Forward each collected pickup to the engine input it maps onto.
///
/// Runs before the weapon pipeline so a pickup collected this frame takes
/// effect on this frame's shot.
pub fn apply_pickup_system(
    mut collected: MessageReader<PickupCollected>,
    mut tally: ResMut<PickupTally>,
    mut modifiers: MessageWriter<ApplyModifier>,
    mut levels: MessageWriter<PowerLevelCommand>,
) {
    for pickup in collected.read() {
        tally.collected += 1;
        match pickup.kind {
            PickupKind::RapidFire => {
                modifiers.write(ApplyModifier {
                    kind: ModifierKind::RapidFire,
                });
            }
            PickupKind::PowerRounds => {
                modifiers.write(ApplyModifier {
                    kind: ModifierKind::PowerRounds,
                });
            }
            PickupKind::HighVelocity => {
                modifiers.write(ApplyModifier {
                    kind: ModifierKind::HighVelocity,
                });
            }
            PickupKind::HeavyCaliber => {
                modifiers.write(ApplyModifier {
                    kind: ModifierKind::HeavyCaliber,
                });
            }
            PickupKind::PowerCell => {
                levels.write(PowerLevelCommand::LevelUp(1));
            }
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickupTally>()
            .add_message::<PickupCollected>()
            .add_systems(
                Update,
                // The dispatched messages must land before the weapon pipeline
                // consumes them this same frame.
                apply_pickup_system.before(crate::weapon::power_level_command_system),
            );
    }
}
