//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lumen2d::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Game loop
pub use crate::game::{Game, GameBuilder, GameError};
pub use crate::platform::WinitPlatform;

// Context, events and listeners
pub use crate::core::{Context, Event, EventKind, GameState, KeyCode, ListenerResult};

// Drawing
pub use crate::core::{Color, Letterbox, Surface, Vec2};

// Resources
pub use crate::core::{AssetError, LoadPolicy, ResourceManager, Texture};

// Backend seam
pub use crate::core::{Platform, PlatformError};
