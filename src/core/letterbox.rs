//=========================================================================
// Letterbox Scaler
//=========================================================================
//
// Fits the fixed-resolution canvas inside an arbitrarily sized window
// while preserving the canvas aspect ratio.
//
//   screen_ratio = h / w          game_ratio = ch / cw
//
//   screen_ratio < game_ratio  →  window is relatively wider
//                                 fit height: th = h,  tw = h / game_ratio
//   otherwise                  →  fit width:  tw = w,  th = w * game_ratio
//
//   offset = ((tw, th) - (w, h)) / 2      (blit origin = -offset)
//
// Exact f32 target sizes are kept so the aspect invariant holds within
// float tolerance; pixel sizes are derived by flooring.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::math::Vec2;

//=== Letterbox ===========================================================

/// Result of fitting the canvas definition into a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    window: Vec2,
    target: Vec2,
    offset: Vec2,
}

impl Letterbox {
    /// Computes the letterbox for `window` given the canvas `definition`.
    ///
    /// Degenerate inputs (any non-positive dimension) yield an empty
    /// letterbox: zero target size and zero offset.
    pub fn fit(window: Vec2, definition: Vec2) -> Self {
        let (Some(screen_ratio), Some(game_ratio)) = (window.aspect(), definition.aspect()) else {
            return Self::empty(window);
        };
        if !window.is_positive() || game_ratio <= 0.0 {
            return Self::empty(window);
        }

        let target = if screen_ratio < game_ratio {
            Vec2::new(window.y / game_ratio, window.y)
        } else {
            Vec2::new(window.x, window.x * game_ratio)
        };

        Self {
            window,
            target,
            offset: (target - window) / 2.0,
        }
    }

    fn empty(window: Vec2) -> Self {
        Self {
            window,
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Window size this letterbox was computed for.
    pub fn window(&self) -> Vec2 {
        self.window
    }

    /// Exact scaled canvas size.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Centering offset; non-positive on both axes for a valid fit.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Scaled canvas size in whole pixels (floored).
    pub fn target_pixels(&self) -> (u32, u32) {
        let t = self.target.floor();
        (t.x.max(0.0) as u32, t.y.max(0.0) as u32)
    }

    /// Top-left corner at which the scaled canvas is blitted (`-offset`).
    pub fn origin(&self) -> (i32, i32) {
        let o = (-self.offset).round();
        (o.x as i32, o.y as i32)
    }

    /// True when there is nothing to present (zero-area target).
    pub fn is_empty(&self) -> bool {
        let (w, h) = self.target_pixels();
        w == 0 || h == 0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
