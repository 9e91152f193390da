//! Rendering primitives shared by the engine and its hosts.
//!
//! The engine never draws pixels itself. Everything goes through the
//! [`Surface`] trait, which hosts implement for whatever backs their canvas.
//! [`raster::PixelSurface`] is a software implementation used by the CLI and
//! the test suite.

pub mod layout;
pub mod paint;
pub mod raster;

use serde::{Deserialize, Serialize};

use crate::{Result, Viewport};

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const BLACK: Rgba = Rgba(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba(0, 0, 0, 0);

    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

/// An integer rectangle in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (x as i64) >= self.x as i64
            && (x as i64) < self.right()
            && (y as i64) >= self.y as i64
            && (y as i64) < self.bottom()
    }
}

/// A 2D drawing target.
///
/// Panel surfaces are allocated through [`Surface::create`] and the host's
/// presented canvas is passed by `&mut` to the render methods. Sketches may
/// draw into a surface through any backend-specific API; the engine itself
/// only clears, fills, composites and prints one line of text.
pub trait Surface: Sized {
    /// Allocate an offscreen surface with the given dimensions.
    fn create(viewport: Viewport) -> Result<Self>;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgba);

    /// Fill `rect` (clipped to the surface) with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw `src` scaled to fill `dest`, clipped to this surface.
    fn draw_surface(&mut self, src: &Self, dest: Rect);

    /// Draw a single line of text centered on `(cx, cy)`.
    fn fill_text(&mut self, text: &str, cx: i32, cy: i32, color: Rgba);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10, 20, 5, 5);
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 24));
        assert!(!r.contains(15, 20));
        assert!(!r.contains(10, 25));
        assert!(!r.contains(9, 22));
    }

    #[test]
    fn rgba_serializes_as_array() {
        let json = serde_json::to_string(&Rgba(1, 2, 3, 4)).unwrap();
        assert_eq!(json, "[1,2,3,4]");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba(1, 2, 3, 4));
    }
}
