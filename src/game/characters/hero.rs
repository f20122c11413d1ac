// The player-controlled knight: stamina, targeted attacks and dashing

use glam::Vec2;
use log::debug;

use crate::core::math::lerp;
use crate::engine::assets::FrameLookup;
use crate::game::Resources;

use super::character::Character;
use super::enemy::Enemy;
use super::state::{CharacterAction, CharacterKind};
use super::stats::{CharacterStats, HeroAbilities, HERO_ABILITIES, HERO_STATS};

/// The hero character
#[derive(Debug)]
pub struct Hero {
    pub base: Character,
    stats: CharacterStats,
    abilities: HeroAbilities,
    /// Spent by attacks and dashes, regenerates every tick
    pub stamina: i32,
    /// Ticks before another dash is allowed
    pub dash_cooldown: u32,
    is_dashing: bool,
    dash_start_x: f32,
    dash_target_x: f32,
    /// Ticks elapsed in the current dash
    dash_timer: u32,
}

impl Hero {
    /// The knight at `position`
    pub fn knight(frames: &dyn FrameLookup, position: Vec2) -> Self {
        Self::new(frames, "knight", HERO_STATS, HERO_ABILITIES, position)
    }

    pub fn new(
        frames: &dyn FrameLookup,
        name: &str,
        stats: CharacterStats,
        abilities: HeroAbilities,
        position: Vec2,
    ) -> Self {
        Self {
            base: Character::new(frames, name, CharacterKind::Hero, stats.max_health, position),
            stats,
            abilities,
            stamina: abilities.max_stamina,
            dash_cooldown: 0,
            is_dashing: false,
            dash_start_x: position.x,
            dash_target_x: position.x,
            dash_timer: 0,
        }
    }

    /// Swing at the nearest enemy in front, if stamina allows
    ///
    /// The animation always plays; the hit is resolved immediately rather
    /// than when the swing finishes.
    pub fn attack(&mut self, enemies: &mut [Enemy], res: &mut Resources<'_>) {
        if self.stamina < self.abilities.attack_cost {
            debug!("Not enough stamina to attack");
            return;
        }
        self.stamina -= self.abilities.attack_cost;
        self.base.attack(res);

        let Some(index) = self.find_target(enemies) else {
            return;
        };
        let target = &mut enemies[index];

        let knockback = self.stats.knockback * self.base.orientation.sign();
        debug!(
            "{} hit {} for {} HP with a knockback!",
            self.base.name, target.base.name, self.stats.attack_damage
        );
        target.base.take_hit(self.stats.attack_damage, knockback, res);
        if target.attacking {
            target.interrupt_attack(res);
        }
    }

    /// Index of the closest living enemy within reach in the facing direction
    ///
    /// Ties keep the first enemy found.
    fn find_target(&self, enemies: &[Enemy]) -> Option<usize> {
        let x = self.base.x();
        let orientation = self.base.orientation;
        let mut best: Option<(usize, f32)> = None;

        for (index, enemy) in enemies.iter().enumerate() {
            if !enemy.is_alive() || !orientation.is_in_front(x, enemy.base.x()) {
                continue;
            }
            let distance = (enemy.base.x() - x).abs();
            if distance > self.stats.attack_range {
                continue;
            }
            if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }

        best.map(|(index, _)| index)
    }

    /// Start a dash in the facing direction, if allowed
    pub fn dash(&mut self, res: &mut Resources<'_>) {
        if self.dash_cooldown > 0 || self.is_dashing || self.stamina < self.abilities.dash_cost {
            return;
        }
        self.stamina -= self.abilities.dash_cost;

        self.dash_start_x = self.base.x();
        self.dash_target_x =
            self.dash_start_x + self.abilities.dash_distance * self.base.orientation.sign();
        self.dash_timer = 0;
        self.is_dashing = true;

        self.base.clear_queue();
        let animation = self.base.animation_for(res.frames, CharacterAction::Dash);
        self.base.set_animation(animation, res.audio);
        debug!(
            "{} started a dash to the {}",
            self.base.name,
            self.base.orientation.suffix()
        );
    }

    /// Move one tick along the dash; ends the dash once its duration is up
    pub fn advance_dash(&mut self, res: &mut Resources<'_>) {
        if !self.is_dashing {
            return;
        }

        self.dash_timer += 1;
        let progress = self.dash_timer as f32 / self.abilities.dash_duration as f32;
        self.base.position.x = lerp(self.dash_start_x, self.dash_target_x, progress.min(1.0));

        if self.dash_timer >= self.abilities.dash_duration {
            self.is_dashing = false;
            self.dash_cooldown = self.abilities.dash_cooldown;
            self.base.clear_current_animation(res.audio);
        }
    }

    /// Regain stamina up to the maximum
    pub fn regenerate_stamina(&mut self) {
        self.stamina =
            (self.stamina + self.abilities.stamina_regen).min(self.abilities.max_stamina);
    }

    /// Count the dash cooldown down by one tick
    pub fn tick_cooldowns(&mut self) {
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
    }

    pub fn is_dashing(&self) -> bool {
        self.is_dashing
    }

    pub fn is_alive(&self) -> bool {
        self.base.is_alive()
    }

    pub fn max_stamina(&self) -> i32 {
        self.abilities.max_stamina
    }

    pub fn move_speed(&self) -> f32 {
        self.stats.move_speed
    }
}
