/// Keys the game reacts to. Everything else is dropped at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Confirm,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Key::Left),
            "d" | "D" | "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Jump),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// Discrete input delivered by the browser callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Click at canvas-relative pixel coordinates.
    PointerClick { x: f64, y: f64 },
}

/// Held state of every game key. Movement is polled each frame; jump and
/// confirm are only tracked so auto-repeated keydowns can be told apart from
/// fresh presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub confirm: bool,
}

impl KeyState {
    pub fn set(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.left = down,
            Key::Right => self.right = down,
            Key::Jump => self.jump = down,
            Key::Confirm => self.confirm = down,
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Jump => self.jump,
            Key::Confirm => self.confirm,
        }
    }

    /// Marks `key` as down and reports whether this is a new press rather
    /// than a repeat of one still held.
    pub fn press(&mut self, key: Key) -> bool {
        let fresh = !self.is_held(key);
        self.set(key, true);
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_map_to_game_keys() {
        assert_eq!(Key::from_dom("d"), Some(Key::Right));
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom(" "), Some(Key::Jump));
        assert_eq!(Key::from_dom("Enter"), Some(Key::Confirm));
        assert_eq!(Key::from_dom("Escape"), None);
    }

    #[test]
    fn key_state_tracks_press_and_release() {
        let mut keys = KeyState::default();
        keys.set(Key::Left, true);
        keys.set(Key::Confirm, true);
        assert!(keys.left && keys.confirm && !keys.right && !keys.jump);
        keys.set(Key::Left, false);
        assert!(!keys.left);
    }

    #[test]
    fn press_reports_repeats_until_release() {
        let mut keys = KeyState::default();
        assert!(keys.press(Key::Confirm));
        assert!(!keys.press(Key::Confirm));
        assert!(!keys.press(Key::Confirm));
        keys.set(Key::Confirm, false);
        assert!(keys.press(Key::Confirm));
    }
}
