//! Software RGBA surface
//!
//! `PixelSurface` is the reference [`Surface`] implementation: an in-memory
//! row-major RGBA8 buffer with nearest-neighbour scaling and a tiny 5x7
//! bitmap font. It is what the CLI renders into and what golden tests hash.

use sha2::{Digest, Sha256};

use crate::rendering::{Rect, Rgba, Surface};
use crate::{Error, Result, Viewport};

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_W + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::SurfaceError(format!(
                "surface dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| Error::SurfaceError(format!("{}x{} surface is too large", width, height)))?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgba(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&color.to_array());
    }

    /// Hex SHA-256 over the dimensions and pixel data.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.data);
        hex::encode(hasher.finalize())
    }

    /// True when every pixel inside `rect` (clipped) equals `color`.
    pub fn region_is(&self, rect: Rect, color: Rgba) -> bool {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return true;
        };
        (y0..y1).all(|y| (x0..x1).all(|x| self.pixel(x, y) == Some(color)))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Visible part of `rect` as `(x0, y0, x1, y1)`, exclusive on the far edges.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = (rect.x as i64).clamp(0, self.width as i64);
        let y0 = (rect.y as i64).clamp(0, self.height as i64);
        let x1 = rect.right().clamp(0, self.width as i64);
        let y1 = rect.bottom().clamp(0, self.height as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn text_scale(&self) -> u32 {
        (self.width.min(self.height) / 100).max(1)
    }
}

impl Surface for PixelSurface {
    fn create(viewport: Viewport) -> Result<Self> {
        PixelSurface::new(viewport.width, viewport.height)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgba) {
        let px = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let px = color.to_array();
        for y in y0..y1 {
            let start = self.offset(x0, y);
            let end = self.offset(x1 - 1, y) + 4;
            for chunk in self.data[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    fn draw_surface(&mut self, src: &Self, dest: Rect) {
        if dest.is_empty() {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dest) else {
            return;
        };
        for y in y0..y1 {
            let dy = (y as i64 - dest.y as i64) as u64;
            let sy = (dy * src.height as u64 / dest.height as u64) as u32;
            for x in x0..x1 {
                let dx = (x as i64 - dest.x as i64) as u64;
                let sx = (dx * src.width as u64 / dest.width as u64) as u32;
                let s = src.offset(sx, sy);
                let d = self.offset(x, y);
                self.data[d..d + 4].copy_from_slice(&src.data[s..s + 4]);
            }
        }
    }

    fn fill_text(&mut self, text: &str, cx: i32, cy: i32, color: Rgba) {
        let scale = self.text_scale();
        let count = text.chars().count() as u32;
        if count == 0 {
            return;
        }
        let text_w = (count * GLYPH_ADVANCE - 1) * scale;
        let text_h = GLYPH_H * scale;
        let left = cx as i64 - (text_w / 2) as i64;
        let top = cy as i64 - (text_h / 2) as i64;

        for (n, ch) in text.chars().enumerate() {
            let rows = glyph(ch);
            let gx = left + (n as u32 * GLYPH_ADVANCE * scale) as i64;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                        continue;
                    }
                    let rect = Rect {
                        x: (gx + (col * scale) as i64) as i32,
                        y: (top + (row as u32 * scale) as i64) as i32,
                        width: scale,
                        height: scale,
                    };
                    self.fill_rect(rect, color);
                }
            }
        }
    }
}

/// 5x7 glyph rows, most significant of the low five bits is the leftmost column.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '/' => [0x01, 0x02, 0x02, 0x04, 0x08, 0x08, 0x10],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        ' ' => [0x00; 7],
        // Hollow box for anything the font lacks
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(PixelSurface::new(0, 10), Err(Error::SurfaceError(_))));
        assert!(PixelSurface::create(Viewport { width: 4, height: 0 }).is_err());
    }

    #[test]
    fn new_surface_starts_transparent() {
        let s = PixelSurface::new(3, 2).unwrap();
        assert!(s.region_is(Rect::new(0, 0, 3, 2), Rgba::TRANSPARENT));
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut s = PixelSurface::new(4, 4).unwrap();
        s.clear(Rgba::BLACK);
        s.fill_rect(Rect::new(-2, 2, 4, 10), Rgba::WHITE);
        assert_eq!(s.pixel(0, 2), Some(Rgba::WHITE));
        assert_eq!(s.pixel(1, 3), Some(Rgba::WHITE));
        assert_eq!(s.pixel(2, 2), Some(Rgba::BLACK));
        assert_eq!(s.pixel(0, 1), Some(Rgba::BLACK));
    }

    #[test]
    fn draw_surface_scales_nearest_neighbour() {
        let mut src = PixelSurface::new(2, 1).unwrap();
        src.set_pixel(0, 0, Rgba::opaque(255, 0, 0));
        src.set_pixel(1, 0, Rgba::opaque(0, 0, 255));

        let mut dst = PixelSurface::new(8, 4).unwrap();
        dst.clear(Rgba::BLACK);
        dst.draw_surface(&src, Rect::new(2, 1, 4, 2));

        assert!(dst.region_is(Rect::new(2, 1, 2, 2), Rgba::opaque(255, 0, 0)));
        assert!(dst.region_is(Rect::new(4, 1, 2, 2), Rgba::opaque(0, 0, 255)));
        assert!(dst.region_is(Rect::new(0, 0, 8, 1), Rgba::BLACK));
        assert!(dst.region_is(Rect::new(6, 1, 2, 3), Rgba::BLACK));
    }

    #[test]
    fn text_is_drawn_near_center() {
        let mut s = PixelSurface::new(100, 40).unwrap();
        s.clear(Rgba::BLACK);
        s.fill_text("1 / 3", 50, 20, Rgba::WHITE);
        assert!(!s.region_is(Rect::new(30, 10, 40, 20), Rgba::BLACK));
        assert!(s.region_is(Rect::new(0, 0, 20, 40), Rgba::BLACK));
        assert!(s.region_is(Rect::new(80, 0, 20, 40), Rgba::BLACK));
    }

    #[test]
    fn digest_depends_on_pixels_and_shape() {
        let a = PixelSurface::new(2, 2).unwrap();
        let b = PixelSurface::new(4, 1).unwrap();
        let mut c = a.clone();
        assert_eq!(a.digest(), c.digest());
        assert_ne!(a.digest(), b.digest());
        c.set_pixel(1, 1, Rgba::WHITE);
        assert_ne!(a.digest(), c.digest());
        assert_eq!(a.digest().len(), 64);
    }
}
