//! The drawing contract between the scene renderer and a backend
//!
//! Coordinates are pixels on a square surface of `grid_size * cell_size`.
//! A backend only has to fill rectangles and place text.

use crate::game::Rgb;

/// A color with straight (non-premultiplied) alpha in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb(rgb: Rgb, alpha: f32) -> Self {
        Self {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
            a: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb(self.r, self.g, self.b)
    }

    /// Linear interpolation of every channel, alpha included
    pub fn mix(&self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composite this color over an opaque backdrop
    pub fn over(&self, backdrop: Rgb) -> Rgb {
        let blend = |src: u8, dst: u8| {
            (src as f32 * self.a + dst as f32 * (1.0 - self.a)).round() as u8
        };
        Rgb(
            blend(self.r, backdrop.0),
            blend(self.g, backdrop.1),
            blend(self.b, backdrop.2),
        )
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

pub trait Surface {
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba);

    /// Fill with a diagonal gradient from the top-left to the bottom-right
    /// corner. Backends without gradients get the midpoint color.
    fn fill_gradient(&mut self, rect: PixelRect, from: Rgba, to: Rgba) {
        self.fill_rect(rect, from.mix(to, 0.5));
    }

    /// Draw text centered on the given point
    fn fill_text(&mut self, x: u32, y: u32, text: &str, color: Rgba);
}
