//! Fixed game parameters.
//!
//! Everything tunable lives in one [`GameConfig`] so the browser runner, the
//! scenes and the tests read the same numbers. The defaults are the shipped
//! game; tests build smaller variants with struct update syntax.

/// Character physics constants for the main scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerConfig {
    pub start_x: f64,
    /// Resting y coordinate (top edge of the character when standing).
    pub ground_y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal pixels per frame while a movement key is held.
    pub speed: f64,
    pub gravity: f64,
    /// Initial vertical velocity of a jump (negative is up).
    pub jump_strength: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 50.0,
            ground_y: 300.0,
            width: 50.0,
            height: 50.0,
            speed: 5.0,
            gravity: 0.5,
            jump_strength: -10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Edge length of one square tile, in both source-image and puzzle-canvas pixels.
    pub tile_size: u32,
    pub border_width: f64,
    pub border_color: &'static str,
    /// Milliseconds the engine ignores clicks after a swap.
    pub swap_lock_ms: f64,
    /// Delay between solving a puzzle and surfacing the notification.
    pub notify_delay_ms: f64,
    /// Leave the puzzle scene automatically once the notification fired.
    pub return_after_solve: bool,
    /// Canvas size of the main scene; puzzle scenes derive theirs from the grid.
    pub main_width: u32,
    pub main_height: u32,
    pub window_padding: f64,
    pub window_frame_color: &'static str,
    pub ground_color: &'static str,
    pub ground_thickness: f64,
    pub player_color: &'static str,
    pub player: PlayerConfig,
    pub canvas_id: &'static str,
    pub status_id: &'static str,
    pub heading_id: &'static str,
    pub image_src: &'static str,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            tile_size: 300,
            border_width: 8.0,
            border_color: "#FF69B4",
            swap_lock_ms: 150.0,
            notify_delay_ms: 100.0,
            return_after_solve: true,
            main_width: 900,
            main_height: 450,
            window_padding: 10.0,
            window_frame_color: "#DDA0DD",
            ground_color: "#8B4513",
            ground_thickness: 10.0,
            player_color: "#FF5733",
            player: PlayerConfig::default(),
            canvas_id: "gameCanvas",
            status_id: "game-status",
            heading_id: "welcome",
            image_src: "img_2.jpg",
        }
    }
}

impl GameConfig {
    /// Native pixel size of a puzzle scene (grid width, grid height).
    pub fn puzzle_size(&self) -> (u32, u32) {
        (
            self.tile_size * self.cols as u32,
            self.tile_size * self.rows as u32,
        )
    }

    pub fn main_size(&self) -> (u32, u32) {
        (self.main_width, self.main_height)
    }
}
