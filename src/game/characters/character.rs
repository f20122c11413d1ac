// Shared character record: health, placement, animation and sound state

use std::collections::VecDeque;

use glam::Vec2;
use log::debug;

use crate::engine::assets::{FrameHandle, FrameLookup};
use crate::engine::audio::{PlaybackId, SoundPlayer};
use crate::game::Resources;

use super::animation::Animation;
use super::state::{
    base_action_name, is_run_animation, CharacterAction, CharacterKind, Orientation,
};

/// Base record shared by the hero and every enemy
///
/// At any tick the displayed frame comes from the current animation when
/// there is one, otherwise from the looping idle animation while alive.
#[derive(Debug)]
pub struct Character {
    /// Asset prefix and display name (`knight`, `skeleton`)
    pub name: String,
    /// Hero or enemy
    pub kind: CharacterKind,
    /// Current health, never below zero
    pub health: i32,
    max_health: i32,
    alive: bool,
    /// Sprite centre in arena coordinates
    pub position: Vec2,
    /// Facing direction
    pub orientation: Orientation,

    // Animation
    idle_animation: Animation,
    current_animation: Option<Animation>,
    animation_queue: VecDeque<Animation>,
    /// Frame currently shown on screen
    image: Option<FrameHandle>,

    // Sound
    current_sound: Option<PlaybackId>,
}

impl Character {
    /// Create a character at full health facing right
    pub fn new(
        frames: &dyn FrameLookup,
        name: &str,
        kind: CharacterKind,
        max_health: i32,
        position: Vec2,
    ) -> Self {
        let base_image = frames.frame(name);

        let mut idle_animation =
            Self::build_animation(frames, name, kind, CharacterAction::Idle, Orientation::Right);
        if idle_animation.is_empty() {
            if let Some(frame) = base_image {
                debug!("Using fallback idle image for {}", name);
                let action = CharacterAction::Idle;
                idle_animation = Animation::with_frames(
                    "idle",
                    vec![frame],
                    action.tick_delay(),
                    action.retain_last_frame(),
                    action.looping(),
                    action.priority(),
                );
            }
        }

        Self {
            name: name.to_string(),
            kind,
            health: max_health,
            max_health,
            alive: true,
            position,
            orientation: Orientation::Right,
            idle_animation,
            current_animation: None,
            animation_queue: VecDeque::new(),
            image: base_image,
            current_sound: None,
        }
    }

    /// Resolve the animation for an action from the table in `state`
    fn build_animation(
        frames: &dyn FrameLookup,
        name: &str,
        kind: CharacterKind,
        action: CharacterAction,
        orientation: Orientation,
    ) -> Animation {
        Animation::new(
            frames,
            name,
            &action.animation_name(kind, orientation),
            action.tick_delay(),
            action.retain_last_frame(),
            action.looping(),
            action.priority(),
        )
    }

    /// Animation for `action` in the current orientation
    pub(crate) fn animation_for(
        &self,
        frames: &dyn FrameLookup,
        action: CharacterAction,
    ) -> Animation {
        Self::build_animation(frames, &self.name, self.kind, action, self.orientation)
    }

    fn play_animation_sound(&mut self, animation: &Animation, audio: &mut dyn SoundPlayer) {
        let action_name = animation.action_name();
        let sound_name = format!("{}_{}", self.name, base_action_name(action_name));
        self.current_sound = audio.play(&sound_name, is_run_animation(action_name));
    }

    fn stop_current_sound(&mut self, audio: &mut dyn SoundPlayer) {
        if let Some(sound) = self.current_sound.take() {
            audio.stop(sound);
        }
    }

    /// Make `animation` current, replacing whatever sound was playing
    pub fn set_animation(&mut self, animation: Animation, audio: &mut dyn SoundPlayer) {
        self.stop_current_sound(audio);
        self.play_animation_sound(&animation, audio);
        self.current_animation = Some(animation);
    }

    /// Start the looping run animation for the current orientation
    ///
    /// Ignored while a higher-priority animation plays or when already
    /// running the same way.
    pub fn run(&mut self, res: &mut Resources<'_>) {
        let action = CharacterAction::Run;
        let desired = action.animation_name(self.kind, self.orientation);

        if let Some(current) = &self.current_animation {
            if current.priority() > action.priority() || current.action_name() == desired {
                return;
            }
        }

        self.animation_queue.clear();
        let animation = self.animation_for(res.frames, action);
        self.set_animation(animation, res.audio);
        debug!("{} is now running with {}", self.name, desired);
    }

    /// Start the one-shot attack animation
    ///
    /// Purely visual commitment: whether anything is hit is decided by the
    /// hero or enemy wrapper.
    pub fn attack(&mut self, res: &mut Resources<'_>) {
        self.animation_queue.clear();
        let animation = self.animation_for(res.frames, CharacterAction::Attack);
        debug!("{} attacks with {}", self.name, animation.action_name());
        self.set_animation(animation, res.audio);
    }

    /// Enter the terminal dead state
    pub fn die(&mut self, res: &mut Resources<'_>) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.animation_queue.clear();
        self.stop_current_sound(res.audio);
        let animation = self.animation_for(res.frames, CharacterAction::Death);
        self.set_animation(animation, res.audio);
        debug!("{} is dying...", self.name);
    }

    /// Drop a run animation when movement input stops
    pub fn stop_running(&mut self, audio: &mut dyn SoundPlayer) {
        let running = self
            .current_animation
            .as_ref()
            .is_some_and(|anim| is_run_animation(anim.action_name()));
        if running {
            self.current_animation = None;
            self.animation_queue.clear();
            self.stop_current_sound(audio);
        }
    }

    /// Clear the current animation and its sound, reverting to idle
    pub fn clear_current_animation(&mut self, audio: &mut dyn SoundPlayer) {
        if self.current_animation.take().is_some() {
            self.stop_current_sound(audio);
        }
    }

    /// Drop queued animations
    pub fn clear_queue(&mut self) {
        self.animation_queue.clear();
    }

    /// Apply damage and a signed horizontal knockback, dying at zero health
    pub fn take_hit(&mut self, damage: i32, knockback: f32, res: &mut Resources<'_>) {
        self.health = (self.health - damage).max(0);
        self.position.x += knockback;
        if self.health <= 0 {
            self.die(res);
        }
    }

    /// Per-tick animation update
    pub fn update_animation(&mut self, audio: &mut dyn SoundPlayer) {
        if self.current_animation.is_none() {
            if let Some(next) = self.animation_queue.pop_front() {
                self.play_animation_sound(&next, audio);
                self.current_animation = Some(next);
            }
        }

        if let Some(animation) = self.current_animation.as_mut() {
            if let Some(frame) = animation.advance() {
                self.image = Some(frame);
            }
            // A one-shot without frames would never finish, so it ends immediately
            let done =
                animation.is_finished() || (animation.is_empty() && !animation.is_looping());
            if done {
                debug!("{} finished {}", self.name, animation.action_name());
                self.stop_current_sound(audio);
                self.current_animation = None;
            }
        } else if self.alive {
            if let Some(frame) = self.idle_animation.advance() {
                self.image = Some(frame);
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Horizontal distance to another character
    pub fn distance_x(&self, other: &Character) -> f32 {
        (self.position.x - other.position.x).abs()
    }

    /// Frame to draw this tick
    pub fn image(&self) -> Option<FrameHandle> {
        self.image
    }

    pub fn current_animation(&self) -> Option<&Animation> {
        self.current_animation.as_ref()
    }
}
