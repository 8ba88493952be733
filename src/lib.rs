//! Puzzle Windows core crate.
//!
//! A character walks along the ground of the main scene past three windows;
//! pressing Enter in front of one opens its 3x3 tile-swap picture puzzle.
//! Solved puzzles stay solved for the session and show the whole picture in
//! their window. The puzzle engine and scene logic are plain Rust and run in
//! host tests; `start_game()` wires them to the page.

use wasm_bindgen::prelude::*;

pub mod canvas;
pub mod config;
pub mod game;
pub mod input;
pub mod main_scene;
pub mod puzzle;
pub mod scene;
pub mod surface;

pub use config::GameConfig;
pub use game::Game;
pub use puzzle::{Cell, ClickOutcome, Interaction, PuzzleEngine, TileGrid};
pub use scene::{Notification, PuzzleId, Scene, SceneStateMachine};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // Already initialised when the module is instantiated twice.
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start(GameConfig::default())
}

/// JSON view of the running session (scene, solved flags, status text), or
/// `None` before the game has booted.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn session_snapshot_json() -> Option<String> {
    let snapshot = game::session_snapshot()?;
    match serde_json::to_string(&snapshot) {
        Ok(json) => Some(json),
        Err(err) => {
            log::warn!("snapshot serialization failed: {err}");
            None
        }
    }
}
