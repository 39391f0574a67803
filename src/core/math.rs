//=========================================================================
// Geometry & Color Primitives
//=========================================================================
//
// Plain value types shared by every other module.
//
// - `Vec2`: f32 2D vector used for sizes, positions and offsets
// - `Color`: 8-bit RGBA color with a small named palette
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

//=== Vec2 ================================================================

/// 2D vector with `f32` components.
///
/// Used both as a point and as a size (`x` = width, `y` = height).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Builds a size vector from integer pixel dimensions.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// `y / x`, or `None` when `x` is not strictly positive.
    pub fn aspect(self) -> Option<f32> {
        if self.x > 0.0 {
            Some(self.y / self.x)
        } else {
            None
        }
    }

    /// True when both components are strictly positive.
    pub fn is_positive(self) -> bool {
        self.x > 0.0 && self.y > 0.0
    }

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

//=== Color ===============================================================

/// RGBA color, 8 bits per channel, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    //--- Palette ----------------------------------------------------------

    pub const RED: Self = Self::rgb(245, 90, 66);
    pub const ORANGE: Self = Self::rgb(245, 170, 66);
    pub const YELLOW: Self = Self::rgb(245, 252, 71);
    pub const GREEN: Self = Self::rgb(92, 252, 71);
    pub const BLUE: Self = Self::rgb(71, 177, 252);
    pub const PURPLE: Self = Self::rgb(189, 71, 252);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(42, 42, 42);
    pub const LIGHT_GRAY: Self = Self::rgb(142, 142, 142);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    //--- Construction -----------------------------------------------------

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    //--- Conversion -------------------------------------------------------

    /// Packs into `0x00RRGGBB`, the layout softbuffer presents.
    pub const fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    //--- Blending ---------------------------------------------------------

    /// Source-over composition of `self` onto `dst`.
    ///
    /// The destination is treated as opaque for the result's alpha, which is
    /// what every surface in the engine ultimately is once presented.
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let a = a as u32;
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
                Color {
                    r: mix(self.r, dst.r),
                    g: mix(self.g, dst.g),
                    b: mix(self.b, dst.b),
                    a: dst.a.max(self.a),
                }
            }
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Channel-wise modulation; alpha is kept from `self`.
impl Mul for Color {
    type Output = Color;
    fn mul(self, rhs: Color) -> Color {
        let m = |a: u8, b: u8| ((a as u32 * b as u32 + 127) / 255) as u8;
        Color {
            r: m(self.r, rhs.r),
            g: m(self.g, rhs.g),
            b: m(self.b, rhs.b),
            a: self.a,
        }
    }
}

/// Brightness scaling, saturating at 0 and 255.
impl Mul<f32> for Color {
    type Output = Color;
    fn mul(self, rhs: f32) -> Color {
        let s = |c: u8| (c as f32 * rhs).round().clamp(0.0, 255.0) as u8;
        Color {
            r: s(self.r),
            g: s(self.g),
            b: s(self.b),
            a: self.a,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Vec2
    //=====================================================================

    #[test]
    fn vec2_arithmetic() {
        let a = Vec2::new(4.0, 6.0);
        let b = Vec2::new(1.0, 2.0);
        assert_eq!(a + b, Vec2::new(5.0, 8.0));
        assert_eq!(a - b, Vec2::new(3.0, 4.0));
        assert_eq!(a * 0.5, Vec2::new(2.0, 3.0));
        assert_eq!(a / 2.0, Vec2::new(2.0, 3.0));
        assert_eq!(-b, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn aspect_guards_zero_width() {
        assert_eq!(Vec2::new(0.0, 10.0).aspect(), None);
        assert_eq!(Vec2::new(128.0, 64.0).aspect(), Some(0.5));
    }

    //=====================================================================
    // Color
    //=====================================================================

    #[test]
    fn xrgb_packing() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_xrgb(), 0x0012_3456);
        assert_eq!(Color::rgba(255, 255, 255, 0).to_xrgb(), 0x00FF_FFFF);
    }

    #[test]
    fn over_respects_alpha_extremes() {
        let dst = Color::BLUE;
        assert_eq!(Color::RED.over(dst), Color::RED);
        assert_eq!(Color::TRANSPARENT.over(dst), dst);
    }

    #[test]
    fn over_mixes_half_alpha() {
        let src = Color::rgba(255, 0, 0, 128);
        let out = src.over(Color::BLACK);
        assert_eq!(out.r, 128);
        assert_eq!(out.g, 0);
        assert_eq!(out.a, 255);
    }

    #[test]
    fn modulation() {
        assert_eq!(Color::WHITE * Color::RED, Color::RED);
        assert_eq!(Color::WHITE * 0.0, Color::BLACK);
        assert_eq!(Color::rgb(200, 100, 10) * 2.0, Color::rgb(255, 200, 20));
    }
}
