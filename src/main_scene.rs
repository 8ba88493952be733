//! Platforming area: the character, the ground and the three puzzle windows.

use crate::config::{GameConfig, PlayerConfig};
use crate::input::KeyState;
use crate::scene::{PuzzleId, SceneStateMachine};
use crate::surface::{Rect, Surface};

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub velocity_y: f64,
    pub grounded: bool,
}

pub struct MainScene {
    player: Player,
    physics: PlayerConfig,
    window_padding: f64,
    window_frame_color: &'static str,
    ground_color: &'static str,
    ground_thickness: f64,
    player_color: &'static str,
    border_width: f64,
}

impl MainScene {
    pub fn new(config: &GameConfig) -> Self {
        let physics = config.player;
        Self {
            player: Player {
                x: physics.start_x,
                y: physics.ground_y,
                velocity_y: 0.0,
                grounded: true,
            },
            physics,
            window_padding: config.window_padding,
            window_frame_color: config.window_frame_color,
            ground_color: config.ground_color,
            ground_thickness: config.ground_thickness,
            player_color: config.player_color,
            border_width: config.border_width,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Starts a jump; ignored while airborne.
    pub fn jump(&mut self) {
        if self.player.grounded {
            self.player.velocity_y = self.physics.jump_strength;
            self.player.grounded = false;
        }
    }

    /// One physics step inside a play area `width` pixels wide.
    pub fn update(&mut self, keys: &KeyState, width: f64) {
        let p = &mut self.player;
        let phys = &self.physics;
        if keys.right {
            p.x = (p.x + phys.speed).min(width - phys.width);
        }
        if keys.left {
            p.x = (p.x - phys.speed).max(0.0);
        }
        if !p.grounded {
            p.velocity_y += phys.gravity;
            p.y += p.velocity_y;
        }
        if p.y >= phys.ground_y {
            p.y = phys.ground_y;
            p.velocity_y = 0.0;
            p.grounded = true;
        }
    }

    /// Window box for the puzzle `id` on a surface of the given size.
    pub fn window_rect(&self, id: PuzzleId, width: f64, height: f64) -> Rect {
        let pad = self.window_padding;
        Rect::new(
            width / 3.0 * id.index() as f64 + pad,
            pad,
            width / 3.0 - 2.0 * pad,
            height / 1.5,
        )
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, scenes: &SceneStateMachine) {
        let width = surface.width() as f64;
        let height = surface.height() as f64;
        surface.clear();

        let ground_top = self.physics.ground_y + self.physics.height;
        surface.fill_rect(
            Rect::new(0.0, ground_top, width, self.ground_thickness),
            self.ground_color,
        );

        let (bw, bh) = surface.bitmap_size();
        for id in PuzzleId::ALL {
            let window = self.window_rect(id, width, height);
            surface.stroke_rect(window, self.border_width / 4.0, self.window_frame_color);
            if scenes.is_solved(id) {
                surface.draw_bitmap(Rect::new(0.0, 0.0, bw as f64, bh as f64), window);
            } else {
                scenes
                    .puzzle(id)
                    .render_preview(surface, window.x, window.y, window.w, window.h);
            }
        }

        surface.fill_rect(
            Rect::new(
                self.player.x,
                self.player.y,
                self.physics.width,
                self.physics.height,
            ),
            self.player_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{Op, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn held(left: bool, right: bool) -> KeyState {
        KeyState {
            left,
            right,
            ..KeyState::default()
        }
    }

    #[test]
    fn walking_is_clamped_to_play_area() {
        let mut scene = MainScene::new(&GameConfig::default());
        for _ in 0..20 {
            scene.update(&held(true, false), 900.0);
        }
        assert_eq!(scene.player().x, 0.0);
        for _ in 0..400 {
            scene.update(&held(false, true), 900.0);
        }
        assert_eq!(scene.player().x, 850.0);
    }

    #[test]
    fn jump_rises_then_lands_on_ground() {
        let mut scene = MainScene::new(&GameConfig::default());
        scene.jump();
        assert!(!scene.player().grounded);
        scene.update(&KeyState::default(), 900.0);
        assert_eq!(scene.player().y, 290.5);
        // Airborne jumps are ignored.
        scene.jump();
        assert_eq!(scene.player().velocity_y, -9.5);
        for _ in 0..60 {
            scene.update(&KeyState::default(), 900.0);
        }
        assert!(scene.player().grounded);
        assert_eq!(scene.player().y, 300.0);
        assert_eq!(scene.player().velocity_y, 0.0);
    }

    #[test]
    fn render_draws_previews_for_unsolved_windows() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let scenes = SceneStateMachine::new(&config, &mut rng);
        let scene = MainScene::new(&config);
        let mut s = RecordingSurface::new(900, 450);
        scene.render(&mut s, &scenes);
        assert_eq!(s.ops[0], Op::Clear(Rect::new(0.0, 0.0, 900.0, 450.0)));
        // Nine preview tiles per window.
        assert_eq!(s.bitmaps().len(), 27);
        assert_eq!(
            s.ops.last(),
            Some(&Op::Fill(Rect::new(50.0, 300.0, 50.0, 50.0), "#FF5733".to_string()))
        );
        let window = scene.window_rect(PuzzleId::Three, 900.0, 450.0);
        assert_eq!(window, Rect::new(610.0, 10.0, 280.0, 300.0));
    }

    #[test]
    fn window_frame_is_drawn_under_its_contents() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let scenes = SceneStateMachine::new(&config, &mut rng);
        let scene = MainScene::new(&config);
        let mut s = RecordingSurface::new(900, 450);
        scene.render(&mut s, &scenes);
        for id in PuzzleId::ALL {
            let window = scene.window_rect(id, 900.0, 450.0);
            let frame_at = s
                .ops
                .iter()
                .position(|op| matches!(op, Op::Stroke(r, _, _) if *r == window))
                .expect("window frame stroked");
            // The nine preview tiles of this window follow its frame.
            let tiles_before = s.ops[..frame_at]
                .iter()
                .filter(|op| matches!(op, Op::Bitmap { .. }))
                .count();
            assert_eq!(tiles_before, id.index() * 9);
        }
    }
}
