use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::game::Rgb;

use super::surface::{PixelRect, Rgba, Surface};

/// What one grid cell shows in the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalCell {
    pub background: Rgb,
    pub glyph: Option<(String, Rgb)>,
    /// Set when a grid line passes through the cell
    pub grid: Option<Rgb>,
}

impl Default for TerminalCell {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            glyph: None,
            grid: None,
        }
    }
}

/// A [`Surface`] at cell resolution: one terminal cell pair per grid cell.
///
/// A rectangle paints every cell whose center pixel it covers. Rectangles
/// too thin to cover any center (grid lines) only leave a grid mark on the
/// cells they touch.
pub struct TerminalSurface {
    grid_size: usize,
    cell_size: u32,
    cells: Vec<TerminalCell>,
}

impl TerminalSurface {
    pub fn new(grid_size: usize, cell_size: u32) -> Self {
        Self {
            grid_size,
            cell_size: cell_size.max(1),
            cells: vec![TerminalCell::default(); grid_size * grid_size],
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> &TerminalCell {
        &self.cells[row * self.grid_size + col]
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> &mut TerminalCell {
        &mut self.cells[row * self.grid_size + col]
    }

    fn center(&self, index: usize) -> u32 {
        index as u32 * self.cell_size + self.cell_size / 2
    }

    /// Cell index range a pixel span touches, clipped to the grid
    fn touched(&self, start: u32, extent: u32) -> Option<(usize, usize)> {
        let first = (start / self.cell_size) as usize;
        if first >= self.grid_size || extent == 0 {
            return None;
        }
        let last = ((start + extent - 1) / self.cell_size) as usize;
        Some((first, last.min(self.grid_size - 1)))
    }

    /// Two terminal columns per cell so cells come out roughly square
    pub fn lines(&self) -> Vec<Line<'static>> {
        (0..self.grid_size)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..self.grid_size)
                    .map(|col| {
                        let cell = self.cell(col, row);
                        let style = Style::default().bg(to_color(cell.background));
                        match (&cell.glyph, cell.grid) {
                            (Some((text, color)), _) => {
                                Span::styled(format!("{text} "), style.fg(to_color(*color)))
                            }
                            (None, Some(grid)) => Span::styled("· ", style.fg(to_color(grid))),
                            (None, None) => Span::styled("  ", style),
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, rect: PixelRect, color: Rgba) {
        let mut covered = false;

        for row in 0..self.grid_size {
            for col in 0..self.grid_size {
                if rect.contains(self.center(col), self.center(row)) {
                    let cell = self.cell_mut(col, row);
                    cell.background = color.over(cell.background);
                    cell.glyph = None;
                    cell.grid = None;
                    covered = true;
                }
            }
        }

        if covered {
            return;
        }

        let (Some((col_start, col_end)), Some((row_start, row_end))) = (
            self.touched(rect.x, rect.width),
            self.touched(rect.y, rect.height),
        ) else {
            return;
        };

        for row in row_start..=row_end {
            for col in col_start..=col_end {
                let cell = self.cell_mut(col, row);
                cell.grid = Some(color.over(cell.background));
            }
        }
    }

    fn fill_text(&mut self, x: u32, y: u32, text: &str, color: Rgba) {
        let col = (x / self.cell_size) as usize;
        let row = (y / self.cell_size) as usize;
        if col >= self.grid_size || row >= self.grid_size {
            return;
        }

        let cell = self.cell_mut(col, row);
        cell.glyph = Some((text.to_string(), color.over(cell.background)));
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
