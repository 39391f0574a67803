//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Game-to-platform contract (trait, events and errors).
//
// The game never touches windowing types directly: it asks a `Platform`
// to open a window, drains `PlatformEvent` batches once per frame, and
// hands it a finished frame to present.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::event::KeyCode;
use crate::core::math::Vec2;
use crate::core::surface::Surface;

//=== WindowConfig ========================================================

/// Window parameters passed to [`Platform::open`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,

    /// Requested inner size in pixels.
    pub size: Vec2,

    pub resizable: bool,
}

//=== PlatformEvent =======================================================

/// Native window events, already stripped of backend types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Window close requested by user or OS.
    CloseRequested,

    /// Key pressed (`pressed == true`) or released.
    Key { key: KeyCode, pressed: bool },

    /// Window inner size changed (pixels).
    Resized(Vec2),
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Window could not be created.
    WindowCreation(String),

    /// Presentation surface could not be created, resized or presented.
    Surface(String),

    /// Operation requires an open window.
    NotOpen,
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
            Self::Surface(e) => write!(f, "Surface error: {}", e),
            Self::NotOpen => write!(f, "Window is not open"),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Platform ============================================================

/// Window backend driven by [`crate::Game`].
///
/// All calls happen on the game-loop thread, in this order:
/// `open` once, then per frame `poll_events` → `present` / `set_title`,
/// and finally `shutdown`.
pub trait Platform {
    /// Creates the window and returns its actual inner size.
    fn open(&mut self, config: &WindowConfig) -> Result<Vec2, PlatformError>;

    /// Appends every event received since the previous call to `events`.
    fn poll_events(&mut self, events: &mut Vec<PlatformEvent>);

    /// Shows `frame`, whose size matches the last reported window size.
    fn present(&mut self, frame: &Surface) -> Result<(), PlatformError>;

    fn set_title(&mut self, title: &str);

    /// Releases the window and all backend resources.
    fn shutdown(&mut self);
}

//=========================================================================
// Unit Tests
//=========================================================================
