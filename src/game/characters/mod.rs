// Character system
//
// This module contains everything that lives in the arena:
// - Shared character record (health, placement, animation, sound)
// - Per-action animation table and orientation
// - The hero with stamina and dashing
// - Enemy AI

pub mod animation;
pub mod character;
pub mod enemy;
pub mod hero;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use character::Character;
pub use enemy::Enemy;
pub use hero::Hero;
pub use state::Orientation;
