// Input manager - turns winit events into actions, cursor position and clicks

use super::action::{default_bindings, Action, InputSource};
use super::player::PlayerInput;
use glam::Vec2;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// A mouse press in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub position: Vec2,
    /// Action bound to the pressed button, if any
    pub action: Option<Action>,
}

/// Main input manager
pub struct InputManager {
    /// Source to action lookup
    bindings: HashMap<InputSource, Action>,

    /// Held actions
    player: PlayerInput,

    /// Last known cursor position in arena coordinates
    cursor: Vec2,

    /// Presses not yet handed to the game
    clicks: Vec<Click>,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            player: PlayerInput::new(),
            cursor: Vec2::ZERO,
            clicks: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event; presses are queued as clicks
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let source = InputSource::mouse(button);
        if state == ElementState::Pressed {
            self.clicks.push(Click {
                position: self.cursor,
                action: self.bindings.get(&source).copied(),
            });
        }
        self.apply(source, state);
    }

    /// Track the cursor, already converted to arena coordinates
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
    }

    fn apply(&mut self, source: InputSource, state: ElementState) {
        if let Some(&action) = self.bindings.get(&source) {
            match state {
                ElementState::Pressed => self.player.press(action),
                ElementState::Released => self.player.release(action),
            }
        }
    }

    /// Held actions
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    /// Drain the clicks received since the last call
    pub fn take_clicks(&mut self) -> Vec<Click> {
        std::mem::take(&mut self.clicks)
    }

    /// Forget every held action and pending click
    pub fn reset(&mut self) {
        self.player.reset();
        self.clicks.clear();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
