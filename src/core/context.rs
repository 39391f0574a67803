//=========================================================================
// Game Context
//=========================================================================
//
// Shared data handed to listeners and draw callbacks.
//
// Replaces process-wide singletons: the game owns exactly one context and
// lends it out (`&mut Context`) while dispatching events or drawing.
//
// Contains:
// - resources: texture cache
// - state: lifecycle state (listeners may request quit)
// - clear_color: color the canvas is cleared to each frame
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::math::Color;
use super::resources::ResourceManager;

//=== GameState ===========================================================

/// Lifecycle of a [`crate::Game`].
///
/// ```text
/// Uninitialized ──init()──> Running ──quit()──> Stopped ──end_frame()──> Terminated
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Uninitialized,
    Running,
    Stopped,
    Terminated,
}

//=== Context =============================================================

/// Application data shared with listeners and the draw callback.
pub struct Context {
    /// Texture cache.
    pub resources: ResourceManager,

    state: GameState,
    clear_color: Color,
}

impl Context {
    pub(crate) fn new(resources: ResourceManager, clear_color: Color) -> Self {
        Self {
            resources,
            state: GameState::Uninitialized,
            clear_color,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    /// True while the frame loop should keep going.
    pub fn should_run(&self) -> bool {
        self.state == GameState::Running
    }

    /// Requests the frame loop to stop.
    ///
    /// Only a running game moves to `Stopped`; other states are left alone.
    pub fn quit(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Stopped;
        }
    }

    //--- Presentation -----------------------------------------------------

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        self.clear_color = color;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
