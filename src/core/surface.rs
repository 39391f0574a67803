//=========================================================================
// Surface
//=========================================================================
//
// Owned RGBA pixel buffer.
//
// One type serves every pixel store in the engine:
//   canvas (fixed definition) → letterbox (scaled) → window frame (presented)
// and the decoded pixels of each texture.
//
// Coordinates are integer pixels with the origin at the top-left corner.
// All drawing operations clip silently against the surface bounds.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::math::{Color, Vec2};

//=== Surface =============================================================

/// Row-major RGBA pixel buffer with a fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

/// Overlapping rectangle of a blit, in destination and source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clip {
    dst_x: usize,
    dst_y: usize,
    src_x: usize,
    src_y: usize,
    width: usize,
    height: usize,
}

impl Surface {
    //--- Construction -----------------------------------------------------

    /// Creates a surface filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps an existing pixel vector.
    ///
    /// Returns `None` when `pixels.len()` does not match `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    //--- Accessors --------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::from_size(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrites one pixel (no blending). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    //--- Drawing ----------------------------------------------------------

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Composites `src` onto this surface with its top-left at `(x, y)`.
    pub fn blit(&mut self, src: &Surface, x: i32, y: i32) {
        let Some(clip) = self.clip(src, x, y) else {
            return;
        };

        let dst_w = self.width as usize;
        let src_w = src.width as usize;
        for row in 0..clip.height {
            let d = (clip.dst_y + row) * dst_w + clip.dst_x;
            let s = (clip.src_y + row) * src_w + clip.src_x;
            for (dst, &pixel) in self.pixels[d..d + clip.width]
                .iter_mut()
                .zip(&src.pixels[s..s + clip.width])
            {
                *dst = pixel.over(*dst);
            }
        }
    }

    /// Like [`Surface::blit`] but copies pixels verbatim, alpha included.
    pub fn copy_from(&mut self, src: &Surface, x: i32, y: i32) {
        let Some(clip) = self.clip(src, x, y) else {
            return;
        };

        let dst_w = self.width as usize;
        let src_w = src.width as usize;
        for row in 0..clip.height {
            let d = (clip.dst_y + row) * dst_w + clip.dst_x;
            let s = (clip.src_y + row) * src_w + clip.src_x;
            self.pixels[d..d + clip.width].copy_from_slice(&src.pixels[s..s + clip.width]);
        }
    }

    /// Intersection of `src` placed at `(x, y)` with this surface.
    ///
    /// Computed in i64 so extreme positions cannot overflow.
    fn clip(&self, src: &Surface, x: i32, y: i32) -> Option<Clip> {
        let (x, y) = (i64::from(x), i64::from(y));
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (y + i64::from(src.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some(Clip {
            dst_x: x0 as usize,
            dst_y: y0 as usize,
            src_x: (x0 - x) as usize,
            src_y: (y0 - y) as usize,
            width: (x1 - x0) as usize,
            height: (y1 - y0) as usize,
        })
    }

    /// Nearest-neighbour scale of this whole surface into `dst`.
    ///
    /// `dst` keeps its own size; the source is stretched to cover it.
    pub fn scale_into(&self, dst: &mut Surface) {
        if self.is_empty() || dst.is_empty() {
            return;
        }

        let sw = self.width as u64;
        let sh = self.height as u64;
        let dw = dst.width as u64;
        let dh = dst.height as u64;

        // Column lookup is shared by every row.
        let columns: Vec<usize> = (0..dw).map(|dx| (dx * sw / dw) as usize).collect();

        for dy in 0..dh {
            let sy = (dy * sh / dh) as usize;
            let src_row = &self.pixels[sy * sw as usize..(sy + 1) * sw as usize];
            let dst_row = &mut dst.pixels[dy as usize * dw as usize..(dy as usize + 1) * dw as usize];
            for (d, &sx) in dst_row.iter_mut().zip(&columns) {
                *d = src_row[sx];
            }
        }
    }

    /// Returns a new surface of the given size holding a scaled copy.
    pub fn scaled(&self, width: u32, height: u32) -> Surface {
        let mut out = Surface::new(width, height);
        self.scale_into(&mut out);
        out
    }

    /// Filled axis-aligned rectangle, alpha blended.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x as i64 + width as i64).min(self.width as i64) as i32;
        let y1 = (y as i64 + height as i64).min(self.height as i64) as i32;
        for py in y0..y1 {
            for px in x0..x1 {
                let i = py as usize * self.width as usize + px as usize;
                self.pixels[i] = color.over(self.pixels[i]);
            }
        }
    }

    /// Filled circle centred on `(cx, cy)`, alpha blended.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        let r = radius as i32;
        let r2 = (r as i64) * (r as i64);
        for py in (cy - r).max(0)..(cy + r + 1).min(self.height as i32) {
            for px in (cx - r).max(0)..(cx + r + 1).min(self.width as i32) {
                let dx = (px - cx) as i64;
                let dy = (py - cy) as i64;
                if dx * dx + dy * dy <= r2 {
                    let i = py as usize * self.width as usize + px as usize;
                    self.pixels[i] = color.over(self.pixels[i]);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
