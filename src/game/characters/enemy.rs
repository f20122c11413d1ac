// Skeleton enemies and their approach / attack AI

use glam::Vec2;
use log::debug;

use crate::engine::assets::FrameLookup;
use crate::game::Resources;

use super::character::Character;
use super::state::{is_attack_animation, CharacterKind, Orientation};
use super::stats::{CharacterStats, EnemyTiming, SKELETON_STATS, SKELETON_TIMING};

/// An AI-controlled melee enemy
///
/// The AI cycles through approaching, a committed attack (animation in flight,
/// damage pending) and recovering (cooldown running). Damage from a
/// committed attack is resolved once, from the distance at the moment the
/// attack animation ends.
#[derive(Debug)]
pub struct Enemy {
    pub base: Character,
    stats: CharacterStats,
    timing: EnemyTiming,
    /// Ticks until the next attack may start
    pub attack_cooldown: u32,
    /// An attack animation is playing and its damage is still pending
    pub attacking: bool,
}

impl Enemy {
    /// Spawn a skeleton at `position`
    pub fn skeleton(frames: &dyn FrameLookup, position: Vec2) -> Self {
        Self::new(frames, "skeleton", SKELETON_STATS, SKELETON_TIMING, position)
    }

    pub fn new(
        frames: &dyn FrameLookup,
        name: &str,
        stats: CharacterStats,
        timing: EnemyTiming,
        position: Vec2,
    ) -> Self {
        Self {
            base: Character::new(frames, name, CharacterKind::Enemy, stats.max_health, position),
            stats,
            timing,
            attack_cooldown: 0,
            attacking: false,
        }
    }

    /// Commit to an attack; damage resolves when the animation ends
    pub fn attack(&mut self, res: &mut Resources<'_>) {
        self.attacking = true;
        self.base.attack(res);
    }

    /// Cancel a committed attack without resolving its damage
    pub fn interrupt_attack(&mut self, res: &mut Resources<'_>) {
        if !self.attacking {
            return;
        }
        debug!("{}'s attack got interrupted", self.base.name);
        self.attacking = false;
        self.base.clear_queue();
        let in_attack = self
            .base
            .current_animation()
            .is_some_and(|anim| is_attack_animation(anim.action_name()));
        if in_attack {
            self.base.clear_current_animation(res.audio);
        }
        self.attack_cooldown = self.timing.interrupt_cooldown;
    }

    /// One AI step against the single target
    pub fn update_ai(&mut self, target: &mut Character, res: &mut Resources<'_>) {
        if !self.base.is_alive() || !target.is_alive() {
            return;
        }

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);

        let distance = self.base.distance_x(target);

        if self.attacking {
            if self.base.current_animation().is_some() {
                // Attack still in flight
                return;
            }
            if distance <= self.stats.attack_range {
                let knockback = self.stats.knockback * self.base.orientation.sign();
                debug!(
                    "{} hit {} for {} HP!",
                    self.base.name, target.name, self.stats.attack_damage
                );
                target.take_hit(self.stats.attack_damage, knockback, res);
            } else {
                debug!("{}'s attack missed", self.base.name);
            }
            self.attacking = false;
            self.attack_cooldown = self.timing.recovery_cooldown;
            return;
        }

        if distance > self.stats.attack_range {
            self.base.orientation = Orientation::toward(self.base.x(), target.x());
            self.base.position.x += self.stats.move_speed * self.base.orientation.sign();
            self.base.run(res);
        } else if self.attack_cooldown == 0 {
            self.attack(res);
        }
    }

    pub fn is_alive(&self) -> bool {
        self.base.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::RecordingAudio;
    use crate::game::characters::animation::test_frames::FrameTable;

    fn frames() -> FrameTable {
        FrameTable::default()
            .with_frame("knight")
            .with_frame("skeleton")
            .with_sequence("knight_death", 3)
            .with_sequence("skeleton_idle", 4)
            .with_sequence("skeleton_run_left", 4)
            .with_sequence("skeleton_run_right", 4)
            .with_sequence("skeleton_attack_left", 4)
            .with_sequence("skeleton_attack_right", 4)
    }

    fn hero_at(frames: &FrameTable, x: f32) -> Character {
        Character::new(frames, "knight", CharacterKind::Hero, 100, Vec2::new(x, 255.0))
    }

    /// Ticks from commitment until the attack animation clears (4 frames, delay 5)
    const ATTACK_TICKS: usize = 15;

    fn tick(
        enemy: &mut Enemy,
        hero: &mut Character,
        frames: &FrameTable,
        audio: &mut RecordingAudio,
    ) {
        let mut res = Resources::new(frames, audio);
        enemy.update_ai(hero, &mut res);
        enemy.base.update_animation(res.audio);
    }

    #[test]
    fn test_enemy_approaches_out_of_range_target() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 100.0);
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(300.0, 278.0));

        tick(&mut enemy, &mut hero, &frames, &mut audio);

        assert_eq!(enemy.base.x(), 299.0);
        assert_eq!(enemy.base.orientation, Orientation::Left);
        assert_eq!(enemy.base.current_animation().unwrap().action_name(), "run_left");
        assert!(!enemy.attacking);
    }

    #[test]
    fn test_enemy_commits_to_attack_in_range() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 464.0);
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(430.0, 278.0));

        tick(&mut enemy, &mut hero, &frames, &mut audio);

        assert!(enemy.attacking);
        assert_eq!(enemy.attack_cooldown, 0);
        assert_eq!(
            enemy.base.current_animation().unwrap().action_name(),
            "attack_right"
        );
        // Nothing resolves while the animation plays
        assert_eq!(hero.health, 100);
    }

    #[test]
    fn test_completed_attack_hits_once_with_knockback() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 464.0);
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(430.0, 278.0));

        // Commit, then let the animation play out
        for _ in 0..ATTACK_TICKS {
            tick(&mut enemy, &mut hero, &frames, &mut audio);
        }
        assert_eq!(hero.health, 100);
        assert!(enemy.base.current_animation().is_none());

        // Resolution tick
        tick(&mut enemy, &mut hero, &frames, &mut audio);
        assert_eq!(hero.health, 80);
        assert_eq!(hero.x(), 474.0);
        assert!(!enemy.attacking);
        assert_eq!(enemy.attack_cooldown, 60);

        // Recovery: no second hit until the cooldown runs out
        for _ in 0..59 {
            tick(&mut enemy, &mut hero, &frames, &mut audio);
            assert_eq!(hero.health, 80);
        }
    }

    #[test]
    fn test_attack_misses_when_target_left_range() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 464.0);
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(430.0, 278.0));

        for _ in 0..ATTACK_TICKS {
            tick(&mut enemy, &mut hero, &frames, &mut audio);
        }
        hero.position.x = 600.0;
        tick(&mut enemy, &mut hero, &frames, &mut audio);

        assert_eq!(hero.health, 100);
        assert!(!enemy.attacking);
        assert_eq!(enemy.attack_cooldown, 60);
    }

    #[test]
    fn test_interrupt_cancels_damage() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 464.0);
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(430.0, 278.0));

        for _ in 0..5 {
            tick(&mut enemy, &mut hero, &frames, &mut audio);
        }
        assert!(enemy.attacking);

        let mut res = Resources::new(&frames, &mut audio);
        enemy.interrupt_attack(&mut res);
        assert!(!enemy.attacking);
        assert!(enemy.base.current_animation().is_none());
        assert_eq!(enemy.attack_cooldown, 30);

        for _ in 0..29 {
            tick(&mut enemy, &mut hero, &frames, &mut audio);
        }
        assert_eq!(hero.health, 100);
        assert!(!enemy.attacking);
    }

    #[test]
    fn test_interrupt_without_commitment_is_noop() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(430.0, 278.0));
        enemy.attack_cooldown = 12;

        let mut res = Resources::new(&frames, &mut audio);
        enemy.interrupt_attack(&mut res);
        assert_eq!(enemy.attack_cooldown, 12);
    }

    #[test]
    fn test_lethal_hit_kills_target() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 464.0);
        hero.health = 20;
        let mut enemy = Enemy::skeleton(&frames, Vec2::new(430.0, 278.0));

        for _ in 0..ATTACK_TICKS + 2 {
            tick(&mut enemy, &mut hero, &frames, &mut audio);
        }

        assert_eq!(hero.health, 0);
        assert!(!hero.is_alive());
        assert_eq!(hero.current_animation().unwrap().action_name(), "death");
    }

    #[test]
    fn test_ai_idles_when_target_dead() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = hero_at(&frames, 900.0);
        let mut res = Resources::new(&frames, &mut audio);
        hero.die(&mut res);

        let mut enemy = Enemy::skeleton(&frames, Vec2::new(100.0, 278.0));
        enemy.attack_cooldown = 5;
        enemy.update_ai(&mut hero, &mut res);

        assert_eq!(enemy.base.x(), 100.0);
        assert_eq!(enemy.attack_cooldown, 5);
    }
}
