// Character stats and arena constants
//
// Tuning is fixed at compile time; there is no difficulty setting.

/// Arena width (matches the background image)
pub const ARENA_WIDTH: f32 = 928.0;
/// Arena height
pub const ARENA_HEIGHT: f32 = 335.0;
/// Floor level where characters stand
pub const GAME_FLOOR: f32 = 255.0;
/// Skeleton sprites are shorter than the knight, so they stand a bit lower
pub const SKELETON_FLOOR_OFFSET: f32 = 23.0;

/// Combat and movement stats for one kind of character
#[derive(Debug, Clone, Copy)]
pub struct CharacterStats {
    // Health
    /// Starting and maximum health
    pub max_health: i32,

    // Melee
    /// Horizontal reach of an attack
    pub attack_range: f32,
    /// Damage per landed hit
    pub attack_damage: i32,
    /// Displacement applied to the target on hit
    pub knockback: f32,

    // Movement
    /// Units moved per tick while walking
    pub move_speed: f32,
}

/// The knight
pub const HERO_STATS: CharacterStats = CharacterStats {
    max_health: 100,
    attack_range: 50.0,
    attack_damage: 20,
    knockback: 10.0,
    move_speed: 2.0,
};

/// Skeleton enemies
pub const SKELETON_STATS: CharacterStats = CharacterStats {
    max_health: 50,
    attack_range: 50.0,
    attack_damage: 20,
    knockback: 10.0,
    move_speed: 1.0,
};

/// Stamina and dash tuning for the hero
#[derive(Debug, Clone, Copy)]
pub struct HeroAbilities {
    pub max_stamina: i32,
    /// Stamina gained per tick
    pub stamina_regen: i32,
    pub attack_cost: i32,
    pub dash_cost: i32,
    pub dash_distance: f32,
    /// Ticks the dash movement lasts
    pub dash_duration: u32,
    /// Ticks before another dash is allowed
    pub dash_cooldown: u32,
}

pub const HERO_ABILITIES: HeroAbilities = HeroAbilities {
    max_stamina: 100,
    stamina_regen: 1,
    attack_cost: 20,
    dash_cost: 20,
    dash_distance: 150.0,
    dash_duration: 10,
    dash_cooldown: 60,
};

/// Attack timing for enemy AI
#[derive(Debug, Clone, Copy)]
pub struct EnemyTiming {
    /// Cooldown after an attack animation plays out
    pub recovery_cooldown: u32,
    /// Cooldown after the hero interrupts an attack
    pub interrupt_cooldown: u32,
}

pub const SKELETON_TIMING: EnemyTiming = EnemyTiming {
    recovery_cooldown: 60,
    interrupt_cooldown: 30,
};
