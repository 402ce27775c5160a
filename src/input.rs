//! Keyboard and mouse state polled once per frame.
//!
//! Keys are tracked for the current and the previous frame so that a press
//! can be detected on its rising edge: down now, up last frame.

use std::collections::HashSet;

use ::glam::DVec2;
use serde::{Deserialize, Serialize};

/// Keys the demos react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    W,
    A,
    S,
    D,
    Q,
    E,
    I,
    J,
    K,
    L,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
}

/// A single input event. Cursor positions are in normalized device
/// coordinates, x and y in [-1, 1] with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    CursorMoved { x: f64, y: f64 },
    ButtonDown { button: MouseButton },
    ButtonUp { button: MouseButton },
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashSet<Key>,
    previous_keys: HashSet<Key>,
    buttons: HashSet<MouseButton>,
    previous_buttons: HashSet<MouseButton>,
    cursor: DVec2,
    previous_cursor: DVec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the current state into the previous frame. Call before applying
    /// the events of a new frame.
    pub fn begin_frame(&mut self) {
        self.previous_keys.clone_from(&self.keys);
        self.previous_buttons.clone_from(&self.buttons);
        self.previous_cursor = self.cursor;
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key } => {
                self.keys.insert(key);
            }
            InputEvent::KeyUp { key } => {
                self.keys.remove(&key);
            }
            InputEvent::CursorMoved { x, y } => {
                self.cursor = DVec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
            }
            InputEvent::ButtonDown { button } => {
                self.buttons.insert(button);
            }
            InputEvent::ButtonUp { button } => {
                self.buttons.remove(&button);
            }
        }
    }

    /// Is the key held this frame
    pub fn key(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Was the key held last frame
    pub fn key_previous(&self, key: Key) -> bool {
        self.previous_keys.contains(&key)
    }

    /// Rising edge: held this frame but not the last one
    pub fn pressed(&self, key: Key) -> bool {
        self.key(key) && !self.key_previous(key)
    }

    pub fn button(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.button(button) && !self.previous_buttons.contains(&button)
    }

    pub fn button_released(&self, button: MouseButton) -> bool {
        !self.button(button) && self.previous_buttons.contains(&button)
    }

    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    pub fn cursor_delta(&self) -> DVec2 {
        self.cursor - self.previous_cursor
    }

    /// -1, 0 or +1 from a pair of opposing keys
    pub fn axis(&self, negative: Key, positive: Key) -> f64 {
        (self.key(positive) as i32 - self.key(negative) as i32) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_fires_once() {
        let mut input = InputState::new();
        input.begin_frame();
        input.apply(InputEvent::KeyDown { key: Key::Space });
        assert!(input.pressed(Key::Space));

        // still held on the next frame: no new press
        input.begin_frame();
        assert!(input.key(Key::Space));
        assert!(!input.pressed(Key::Space));

        input.begin_frame();
        input.apply(InputEvent::KeyUp { key: Key::Space });
        assert!(!input.pressed(Key::Space));
        assert!(input.key_previous(Key::Space));

        input.begin_frame();
        input.apply(InputEvent::KeyDown { key: Key::Space });
        assert!(input.pressed(Key::Space));
    }

    #[test]
    fn cursor_and_buttons() {
        let mut input = InputState::new();
        input.begin_frame();
        input.apply(InputEvent::CursorMoved { x: 0.5, y: -0.25 });
        input.apply(InputEvent::ButtonDown { button: MouseButton::Left });
        assert!(input.button_pressed(MouseButton::Left));
        assert_eq!(input.cursor_delta(), DVec2::new(0.5, -0.25));

        input.begin_frame();
        input.apply(InputEvent::CursorMoved { x: 2.0, y: 0.0 });
        assert_eq!(input.cursor(), DVec2::new(1.0, 0.0));
        assert!(!input.button_pressed(MouseButton::Left));

        input.begin_frame();
        input.apply(InputEvent::ButtonUp { button: MouseButton::Left });
        assert!(input.button_released(MouseButton::Left));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown { key: Key::A });
        assert_eq!(input.axis(Key::A, Key::D), -1.0);
        input.apply(InputEvent::KeyDown { key: Key::D });
        assert_eq!(input.axis(Key::A, Key::D), 0.0);
    }

    #[test]
    fn events_from_toml() {
        #[derive(Deserialize)]
        struct Events {
            events: Vec<InputEvent>,
        }
        let parsed: Events = toml::from_str(
            r#"
            events = [
                { kind = "key_down", key = "space" },
                { kind = "cursor_moved", x = 0.1, y = 0.2 },
                { kind = "button_up", button = "left" },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(parsed.events[0], InputEvent::KeyDown { key: Key::Space });
        assert_eq!(parsed.events[1], InputEvent::CursorMoved { x: 0.1, y: 0.2 });
        assert_eq!(parsed.events[2], InputEvent::ButtonUp { button: MouseButton::Left });
    }
}
