// Gameplay: characters, waves, menu, session and scene building

pub mod characters;
pub mod menu;
pub mod scene;
pub mod session;
pub mod wave;

use crate::engine::assets::FrameLookup;
use crate::engine::audio::SoundPlayer;

/// Engine services the simulation reaches for while updating
///
/// Passed explicitly into every operation that may start an animation or a
/// sound instead of living in globals.
pub struct Resources<'a> {
    pub frames: &'a dyn FrameLookup,
    pub audio: &'a mut dyn SoundPlayer,
}

impl<'a> Resources<'a> {
    pub fn new(frames: &'a dyn FrameLookup, audio: &'a mut dyn SoundPlayer) -> Self {
        Self { frames, audio }
    }
}
