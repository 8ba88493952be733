//! Scene coordination: which scene is active, which puzzles are solved, and
//! the status text shown under the canvas.
//!
//! The three [`PuzzleEngine`]s live here so every transition can reset the
//! right grid and apply the scene's canvas size in one place.

use rand::Rng;

use crate::config::GameConfig;
use crate::puzzle::{ClickOutcome, PuzzleEngine};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PuzzleId {
    One,
    Two,
    Three,
}

impl PuzzleId {
    pub const ALL: [PuzzleId; 3] = [PuzzleId::One, PuzzleId::Two, PuzzleId::Three];

    pub fn index(self) -> usize {
        match self {
            PuzzleId::One => 0,
            PuzzleId::Two => 1,
            PuzzleId::Three => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PuzzleId::One => "One",
            PuzzleId::Two => "Two",
            PuzzleId::Three => "Three",
        }
    }

    /// Window under horizontal position `x` of a play area `width` wide. The
    /// area is split into three equal bands; band edges belong to the left band.
    pub fn from_band(x: f64, width: f64) -> Self {
        let band = width / 3.0;
        if x <= band {
            PuzzleId::One
        } else if x <= band * 2.0 {
            PuzzleId::Two
        } else {
            PuzzleId::Three
        }
    }

    fn title(self) -> String {
        format!("Puzzle {}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Scene {
    Main,
    Puzzle(PuzzleId),
}

/// One-shot message surfaced to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    PuzzleSolved(PuzzleId),
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::PuzzleSolved(_) => "Puzzle Solved!",
        }
    }
}

/// Serializable view of the session, exported to JS behind the `serde_json` feature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SessionSnapshot {
    pub scene: Scene,
    pub solved: [bool; 3],
    pub status: String,
    pub heading: String,
}

pub const PROMPT_UNSOLVED: &str = "Solve the puzzle for next stage";
pub const COMPLETION_MESSAGE: &str = "Congratulations! You finished the game!";

/// Status line for the main scene given how many puzzles are solved.
pub fn main_status(solved_count: usize) -> String {
    match solved_count {
        0 => "Solve the puzzles!".to_string(),
        1 => "1 puzzle solved!".to_string(),
        n if n >= PuzzleId::ALL.len() => COMPLETION_MESSAGE.to_string(),
        n => format!("{n} puzzles solved!"),
    }
}

pub struct SceneStateMachine {
    scene: Scene,
    puzzles: [PuzzleEngine; 3],
    solved: [bool; 3],
    status: String,
    heading: String,
    /// Notification due at the given timestamp.
    pending: Option<(f64, Notification)>,
    main_size: (u32, u32),
    puzzle_size: (u32, u32),
    notify_delay_ms: f64,
    return_after_solve: bool,
}

impl SceneStateMachine {
    /// Starts in the main scene with all three puzzles shuffled for the window previews.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut puzzles = [
            PuzzleEngine::new(config),
            PuzzleEngine::new(config),
            PuzzleEngine::new(config),
        ];
        for puzzle in &mut puzzles {
            puzzle.reset(false, rng);
        }
        Self {
            scene: Scene::Main,
            puzzles,
            solved: [false; 3],
            status: main_status(0),
            heading: "Welcome!".to_string(),
            pending: None,
            main_size: config.main_size(),
            puzzle_size: config.puzzle_size(),
            notify_delay_ms: config.notify_delay_ms,
            return_after_solve: config.return_after_solve,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn puzzle(&self, id: PuzzleId) -> &PuzzleEngine {
        &self.puzzles[id.index()]
    }

    pub fn is_solved(&self, id: PuzzleId) -> bool {
        self.solved[id.index()]
    }

    pub fn solved_count(&self) -> usize {
        self.solved.iter().filter(|s| **s).count()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn main_size(&self) -> (u32, u32) {
        self.main_size
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scene: self.scene,
            solved: self.solved,
            status: self.status.clone(),
            heading: self.heading.clone(),
        }
    }

    /// Confirm pressed in the main scene: enter the window the character
    /// stands in front of. Returns the entered puzzle, `None` outside Main.
    pub fn confirm_in_main<S, R>(&mut self, player_x: f64, surface: &mut S, rng: &mut R) -> Option<PuzzleId>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        if self.scene != Scene::Main {
            return None;
        }
        let id = PuzzleId::from_band(player_x, self.main_size.0 as f64);
        self.enter_puzzle(id, surface, rng);
        Some(id)
    }

    /// Confirm pressed inside a puzzle: back to Main, only once that puzzle is solved.
    pub fn confirm_in_puzzle<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        match self.scene {
            Scene::Puzzle(id) if self.is_solved(id) => {
                self.return_to_main(surface);
                true
            }
            _ => false,
        }
    }

    pub fn enter_puzzle<S, R>(&mut self, id: PuzzleId, surface: &mut S, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let solved = self.is_solved(id);
        self.heading = id.title();
        self.status = if solved {
            format!("{} Solved, Press enter to continue", self.heading)
        } else {
            PROMPT_UNSOLVED.to_string()
        };
        self.scene = Scene::Puzzle(id);
        self.puzzles[id.index()].reset(solved, rng);
        surface.resize(self.puzzle_size.0, self.puzzle_size.1);
        log::info!("entered puzzle {} (solved={solved})", id.name());
    }

    pub fn return_to_main<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.status = main_status(self.solved_count());
        self.scene = Scene::Main;
        surface.resize(self.main_size.0, self.main_size.1);
        log::info!("back to main scene: {}", self.status);
    }

    /// Pointer click in the active puzzle. Out-of-bounds clicks and clicks on
    /// an already solved puzzle are ignored and yield `None`.
    pub fn click<S: Surface + ?Sized>(
        &mut self,
        x: f64,
        y: f64,
        now: f64,
        surface: &mut S,
    ) -> Option<ClickOutcome> {
        let Scene::Puzzle(id) = self.scene else {
            return None;
        };
        if self.is_solved(id) {
            return None;
        }
        let puzzle = &mut self.puzzles[id.index()];
        puzzle.grid().cell_at(x, y)?;
        let outcome = puzzle.handle_pointer(x, y, now, surface);
        if outcome == (ClickOutcome::Swapped { solved: true }) {
            self.mark_solved(id, now);
        }
        Some(outcome)
    }

    fn mark_solved(&mut self, id: PuzzleId, now: f64) {
        self.solved[id.index()] = true;
        self.status = format!("{} Solved", id.title());
        self.pending = Some((now + self.notify_delay_ms, Notification::PuzzleSolved(id)));
        log::info!("puzzle {} solved ({} of 3)", id.name(), self.solved_count());
    }

    /// Advances timers: the active puzzle's swap-lock and the pending
    /// notification, which is returned once when due.
    pub fn tick<S: Surface + ?Sized>(&mut self, now: f64, surface: &mut S) -> Option<Notification> {
        if let Scene::Puzzle(id) = self.scene {
            self.puzzles[id.index()].tick(now);
        }
        let (due, notification) = self.pending?;
        if now < due {
            return None;
        }
        self.pending = None;
        let Notification::PuzzleSolved(id) = notification;
        if self.return_after_solve && self.scene == Scene::Puzzle(id) {
            self.return_to_main(surface);
        }
        Some(notification)
    }

    /// Draws the active puzzle at native size. Main is drawn by the main scene.
    pub fn render_puzzle<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Scene::Puzzle(id) = self.scene {
            self.puzzles[id.index()].render(surface);
        }
    }
}
