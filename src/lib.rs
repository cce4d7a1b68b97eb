//! Volley — deterministic weapon resolution engine for a projectile shooter.
//!
//! Given a power level, a set of time-limited modifiers, an accumulating heat
//! value, and a bundle of special-effect toggles, the engine decides each
//! tick whether a shot may be fired and what its exact parameters are.  Input
//! capture, rendering, collision, and enemy AI are external collaborators:
//! they feed the engine a [`weapon::FireIntent`] plus level/modifier
//! messages, and consume the [`weapon::VolleyFired`] / [`weapon::FireBlocked`]
//! messages it emits.

pub mod config;
pub mod constants;
pub mod error;
pub mod pickups;
pub mod testing;
pub mod weapon;
