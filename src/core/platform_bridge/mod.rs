//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges a window backend (winit, or a test double) with the game.
//
// This module defines the contract between platform implementations and
// the game loop, so backends can be swapped without touching game code.
//
// Components:
// - `interface`: `Platform` trait, event types and errors (the contract)
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod interface;

#[cfg(test)]
pub(crate) mod scripted;

//=== Public API ==========================================================

pub use interface::{Platform, PlatformError, PlatformEvent, WindowConfig};
