// Input handling system
//
// Maps winit keyboard and mouse events to game actions for the single
// player.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `player`: Held state per action
// - `manager`: Event processing, cursor tracking and click queue
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, Action};
//
// let mut input_manager = InputManager::new();
//
// // In your event loop, process keyboard events
// input_manager.process_keyboard_event(&key_event);
//
// // Each tick, read held actions
// if input_manager.player().is_pressed(Action::MoveLeft) {
//     // Walk left
// }
// ```

pub mod action;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::Action;
pub use manager::{Click, InputManager};
pub use player::PlayerInput;
