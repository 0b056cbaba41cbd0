use crate::game::{ColorPair, FoodKind, Rgb, Snapshot, SnakeProfile};

use super::surface::{PixelRect, Rgba, Surface};

pub const BACKGROUND: Rgba = Rgba::opaque(0x0a, 0x0a, 0x0a);
pub const GRID_LINE: Rgba = Rgba::opaque(0x1a, 0x1a, 0x1a);
pub const REGULAR_FOOD: Rgba = Rgba::opaque(0x27, 0x75, 0xca);
pub const GOLDEN_FOOD: Rgba = Rgba::opaque(0xf7, 0x93, 0x1a);

const DEFAULT_HEAD: ColorPair = [Rgb(59, 130, 246), Rgb(139, 92, 246)];
const DEFAULT_BODY: ColorPair = [Rgb(59, 130, 246), Rgb(6, 182, 212)];

/// Head and body gradients of the snake being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakePalette {
    pub head: ColorPair,
    pub body: ColorPair,
}

impl Default for SnakePalette {
    fn default() -> Self {
        Self {
            head: DEFAULT_HEAD,
            body: DEFAULT_BODY,
        }
    }
}

impl SnakePalette {
    pub fn for_profile(profile: &SnakeProfile) -> Self {
        Self {
            head: profile.head_colors.unwrap_or(DEFAULT_HEAD),
            body: profile.body_colors.unwrap_or(DEFAULT_BODY),
        }
    }
}

pub fn food_glyph(kind: FoodKind) -> (&'static str, Rgba) {
    match kind {
        FoodKind::Regular => ("$", REGULAR_FOOD),
        FoodKind::Golden => ("\u{20BF}", GOLDEN_FOOD),
    }
}

/// Opacity of segment `index`: 1.0 at the head, fading towards 0.5 at the tail
pub fn segment_opacity(index: usize, len: usize) -> f32 {
    1.0 - (index as f32 / len.max(1) as f32) * 0.5
}

/// Draws a snapshot onto any [`Surface`]; holds nothing but its colors
pub struct SceneRenderer {
    palette: SnakePalette,
    cell_size: u32,
}

impl SceneRenderer {
    pub fn new(palette: SnakePalette, cell_size: u32) -> Self {
        Self { palette, cell_size }
    }

    /// Side of the square drawing surface for a `grid_size` board, in pixels
    pub fn surface_side(&self, grid_size: usize) -> u32 {
        grid_size as u32 * self.cell_size
    }

    pub fn draw<S: Surface>(&self, snapshot: &Snapshot, surface: &mut S) {
        let cell = self.cell_size;
        let side = self.surface_side(snapshot.grid_size);

        surface.fill_rect(PixelRect::new(0, 0, side, side), BACKGROUND);

        for i in 0..=snapshot.grid_size as u32 {
            surface.fill_rect(PixelRect::new(i * cell, 0, 1, side), GRID_LINE);
            surface.fill_rect(PixelRect::new(0, i * cell, side, 1), GRID_LINE);
        }

        let food = snapshot.food.position;
        if food.x >= 0 && food.y >= 0 {
            let (glyph, color) = food_glyph(snapshot.food.kind);
            surface.fill_text(
                food.x as u32 * cell + cell / 2,
                food.y as u32 * cell + cell / 2,
                glyph,
                color,
            );
        }

        let len = snapshot.body.len();
        for (index, segment) in snapshot.body.iter().enumerate() {
            if segment.x < 0 || segment.y < 0 {
                continue;
            }

            let opacity = segment_opacity(index, len);
            let pair = if index == 0 {
                self.palette.head
            } else {
                self.palette.body
            };

            let rect = PixelRect::new(
                segment.x as u32 * cell + 1,
                segment.y as u32 * cell + 1,
                cell.saturating_sub(2),
                cell.saturating_sub(2),
            );
            surface.fill_gradient(
                rect,
                Rgba::from_rgb(pair[0], opacity),
                Rgba::from_rgb(pair[1], opacity),
            );
        }
    }
}
