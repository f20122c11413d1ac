// Character animation system

use log::debug;

use crate::engine::assets::{FrameHandle, FrameLookup};

/// A frame sequence for one (character, action) pair, plus its playback cursor
///
/// Frames are resolved once at construction by probing
/// `{character}_{action}_{index}` for index 0, 1, 2, ... until the first
/// missing name. An animation with no frames is valid: it never yields a frame
/// and never finishes.
#[derive(Debug, Clone)]
pub struct Animation {
    action_name: String,
    frames: Vec<FrameHandle>,
    /// Ticks each frame stays on screen
    tick_delay: u32,
    /// Informational only, playback never reads it
    #[allow(dead_code)]
    retain_last_frame: bool,
    looping: bool,
    priority: i32,
    current_index: usize,
    tick_counter: u32,
    finished: bool,
}

impl Animation {
    /// Resolve the frame sequence for `{character_name}_{action_name}_*`
    pub fn new(
        frames: &dyn FrameLookup,
        character_name: &str,
        action_name: &str,
        tick_delay: u32,
        retain_last_frame: bool,
        looping: bool,
        priority: i32,
    ) -> Self {
        let resolved: Vec<FrameHandle> = (0..)
            .map(|index| frames.frame(&format!("{}_{}_{}", character_name, action_name, index)))
            .take_while(Option::is_some)
            .flatten()
            .collect();

        if resolved.is_empty() {
            debug!("No frames found for {}_{}", character_name, action_name);
        } else {
            debug!(
                "Loaded {} frames for {}_{}",
                resolved.len(),
                character_name,
                action_name
            );
        }

        Self::with_frames(
            action_name,
            resolved,
            tick_delay,
            retain_last_frame,
            looping,
            priority,
        )
    }

    /// Build an animation from an already resolved frame list
    pub fn with_frames(
        action_name: &str,
        frames: Vec<FrameHandle>,
        tick_delay: u32,
        retain_last_frame: bool,
        looping: bool,
        priority: i32,
    ) -> Self {
        // A single-frame one-shot already sits on its last frame
        let finished = !looping && frames.len() == 1;
        Self {
            action_name: action_name.to_string(),
            frames,
            tick_delay: tick_delay.max(1),
            retain_last_frame,
            looping,
            priority,
            current_index: 0,
            tick_counter: 0,
            finished,
        }
    }

    /// Advance one tick and return the frame to display
    ///
    /// Must be called exactly once per tick while this animation is playing.
    pub fn advance(&mut self) -> Option<FrameHandle> {
        let last = self.frames.len().checked_sub(1)?;

        self.tick_counter += 1;
        if self.tick_counter >= self.tick_delay {
            self.tick_counter = 0;
            if self.current_index < last {
                self.current_index += 1;
            } else if self.looping {
                self.current_index = 0;
            }

            if !self.looping && self.current_index == last {
                self.finished = true;
            }
        }

        self.current_frame()
    }

    /// Frame under the cursor
    pub fn current_frame(&self) -> Option<FrameHandle> {
        self.frames.get(self.current_index).copied()
    }

    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// True once a non-looping animation has reached its last frame
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
