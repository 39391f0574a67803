//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the engine.
//
// Dependency order:
//   math → surface → letterbox
//   event → context (+ resources) → listeners
//   frame_clock, platform_bridge
//
// Notes:
// Nothing in here depends on winit or softbuffer. The game loop in
// `crate::game` wires these pieces to a `platform_bridge::Platform`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod context;
pub mod event;
pub mod frame_clock;
pub mod letterbox;
pub mod listeners;
pub mod math;
pub mod platform_bridge;
pub mod resources;
pub mod surface;

//=== Re-exports ==========================================================

pub use context::{Context, GameState};
pub use event::{Event, EventKind, KeyCode};
pub use frame_clock::FrameClock;
pub use letterbox::Letterbox;
pub use listeners::{DispatchOutcome, EventRegistry, Listener, ListenerResult};
pub use math::{Color, Vec2};
pub use platform_bridge::{Platform, PlatformError, PlatformEvent, WindowConfig};
pub use resources::{AssetError, LoadPolicy, LoadReport, ResourceManager, Texture, TextureId};
pub use surface::Surface;
