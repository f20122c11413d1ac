// Character actions, orientation and the per-action animation table

/// Which way a character is facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Left,
    #[default]
    Right,
}

impl Orientation {
    /// Suffix used in directional animation names (`run_left`, `dash_right`)
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Unit direction along x (+1 right, -1 left)
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Orientation that faces from `from_x` toward `to_x`
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if from_x < to_x {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Whether a point at `other_x` lies strictly in front of `x`
    pub fn is_in_front(&self, x: f32, other_x: f32) -> bool {
        match self {
            Self::Left => other_x < x,
            Self::Right => other_x > x,
        }
    }
}

/// Variant tag for the two kinds of characters sharing the base record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    Hero,
    Enemy,
}

/// Every action that drives a character animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterAction {
    Idle,
    Run,
    Attack,
    Death,
    Dash,
}

impl CharacterAction {
    /// Animation id for this action, as used in frame and sound names
    pub fn animation_name(&self, kind: CharacterKind, orientation: Orientation) -> String {
        match self {
            Self::Idle => "idle".to_string(),
            Self::Run => format!("run_{}", orientation.suffix()),
            Self::Attack => match kind {
                CharacterKind::Hero => format!("attack1_{}", orientation.suffix()),
                CharacterKind::Enemy => format!("attack_{}", orientation.suffix()),
            },
            Self::Death => "death".to_string(),
            Self::Dash => format!("dash_{}", orientation.suffix()),
        }
    }

    /// Ticks each frame stays on screen
    pub fn tick_delay(&self) -> u32 {
        match self {
            Self::Idle | Self::Death => 10,
            Self::Run | Self::Dash => 3,
            Self::Attack => 5,
        }
    }

    pub fn looping(&self) -> bool {
        matches!(self, Self::Idle | Self::Run | Self::Dash)
    }

    /// Higher priorities cannot be pre-empted by lower ones
    pub fn priority(&self) -> i32 {
        match self {
            Self::Idle => 0,
            Self::Run => 5,
            Self::Attack | Self::Death => 10,
            Self::Dash => 15,
        }
    }

    pub fn retain_last_frame(&self) -> bool {
        matches!(self, Self::Idle | Self::Attack | Self::Death)
    }
}

/// Strip a trailing `_left` / `_right` from an animation id
pub fn base_action_name(animation_name: &str) -> &str {
    animation_name
        .strip_suffix("_left")
        .or_else(|| animation_name.strip_suffix("_right"))
        .unwrap_or(animation_name)
}

/// Run animations loop their sound; everything else plays it once
pub fn is_run_animation(animation_name: &str) -> bool {
    animation_name.starts_with("run_")
}

pub fn is_attack_animation(animation_name: &str) -> bool {
    animation_name.starts_with("attack")
}
