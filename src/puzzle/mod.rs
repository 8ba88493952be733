//! Tile-swap picture puzzle.
//!
//! [`PuzzleEngine`] owns one [`TileGrid`] and turns pointer clicks into swaps:
//! the first click selects a cell, the second swaps the two tiles and briefly
//! locks the engine so a burst of clicks cannot resolve more than one swap.
//! The lock is a deadline on the frame clock rather than a timer callback, so
//! it disappears together with the engine.

use rand::Rng;

use crate::config::GameConfig;
use crate::surface::{Rect, Surface};

mod grid;

pub use grid::{Cell, Tile, TileGrid};

/// Where the click handler currently stands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Idle,
    Selected(Cell),
    /// Clicks are dropped until the frame clock reaches `until`.
    Swapping { until: f64 },
}

/// Result of feeding one click to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Swap-lock active; the click was dropped.
    Ignored,
    Selected(Cell),
    Swapped { solved: bool },
}

pub struct PuzzleEngine {
    grid: TileGrid,
    interaction: Interaction,
    border_width: f64,
    border_color: &'static str,
    swap_lock_ms: f64,
}

impl PuzzleEngine {
    /// Creates a solved puzzle; call [`PuzzleEngine::reset`] to shuffle it.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            grid: TileGrid::new(config.rows, config.cols, config.tile_size),
            interaction: Interaction::Idle,
            border_width: config.border_width,
            border_color: config.border_color,
            swap_lock_ms: config.swap_lock_ms,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Rebuilds the grid, shuffling it unless it should stay solved, and drops
    /// any pending selection or lock.
    pub fn reset<R: Rng + ?Sized>(&mut self, solved: bool, rng: &mut R) {
        self.grid = TileGrid::new(self.grid.rows(), self.grid.cols(), self.grid.tile_size());
        if !solved {
            self.grid.shuffle(rng);
        }
        self.interaction = Interaction::Idle;
    }

    /// Releases the swap-lock once its deadline has passed.
    pub fn tick(&mut self, now: f64) {
        if let Interaction::Swapping { until } = self.interaction {
            if now >= until {
                self.interaction = Interaction::Idle;
            }
        }
    }

    /// Handles a click at grid-local pixel coordinates.
    ///
    /// # Panics
    /// If `(x, y)` is outside the grid; callers filter with [`TileGrid::cell_at`].
    pub fn handle_pointer<S: Surface + ?Sized>(
        &mut self,
        x: f64,
        y: f64,
        now: f64,
        surface: &mut S,
    ) -> ClickOutcome {
        self.tick(now);
        let cell = self
            .grid
            .cell_at(x, y)
            .unwrap_or_else(|| panic!("click ({x}, {y}) outside puzzle grid"));

        match self.interaction {
            Interaction::Swapping { .. } => {
                log::debug!("click on {cell:?} dropped during swap-lock");
                ClickOutcome::Ignored
            }
            Interaction::Idle => {
                self.interaction = Interaction::Selected(cell);
                ClickOutcome::Selected(cell)
            }
            Interaction::Selected(first) => {
                self.interaction = Interaction::Swapping {
                    until: now + self.swap_lock_ms,
                };
                let (ia, ib) = self.grid.swap(first, cell);
                self.draw_tile(surface, ia, 1.0, 0.0, 0.0, true);
                if ib != ia {
                    self.draw_tile(surface, ib, 1.0, 0.0, 0.0, true);
                }
                let solved = self.grid.is_solved();
                log::debug!("swapped {first:?} <-> {cell:?}, solved={solved}");
                ClickOutcome::Swapped { solved }
            }
        }
    }

    /// Full redraw at native size.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(Rect::new(
            0.0,
            0.0,
            self.grid.pixel_width() as f64,
            self.grid.pixel_height() as f64,
        ));
        for index in 0..self.grid.len() {
            self.draw_tile(surface, index, 1.0, 0.0, 0.0, false);
        }
    }

    /// Draws the whole grid fitted and centered inside the given box, keeping
    /// the aspect ratio.
    pub fn render_preview<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        let grid_w = self.grid.pixel_width() as f64;
        let grid_h = self.grid.pixel_height() as f64;
        let scale = (width / grid_w).min(height / grid_h);
        let offset_x = x + (width - grid_w * scale) / 2.0;
        let offset_y = y + (height - grid_h * scale) / 2.0;
        for index in 0..self.grid.len() {
            self.draw_tile(surface, index, scale, offset_x, offset_y, false);
        }
    }

    fn draw_tile<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        index: usize,
        scale: f64,
        offset_x: f64,
        offset_y: f64,
        clear_first: bool,
    ) {
        let tile = &self.grid.tiles()[index];
        let pos = self.grid.positions()[index];
        let size = self.grid.tile_size() as f64 * scale;
        let dst = Rect::square(
            offset_x + pos.col as f64 * size,
            offset_y + pos.row as f64 * size,
            size,
        );
        if clear_first {
            surface.clear_rect(dst);
        }
        surface.draw_bitmap(tile.source_rect(), dst);
        surface.stroke_rect(dst, self.border_width * scale, self.border_color);
    }
}
