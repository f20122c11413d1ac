// Enemy waves: roster refills with a growing head count

use glam::Vec2;
use log::info;

use crate::engine::assets::FrameLookup;
use crate::game::characters::stats::{ARENA_WIDTH, GAME_FLOOR, SKELETON_FLOOR_OFFSET};
use crate::game::characters::{Enemy, Hero};

/// Enemies per wave number
pub const ENEMIES_PER_WAVE: usize = 2;
/// Distance kept from the arena edges when spawning
pub const SPAWN_MARGIN: i32 = 50;
/// Minimum horizontal distance between a new enemy and the hero
pub const MIN_HERO_DISTANCE: f32 = 100.0;

/// Places skeletons for each wave
#[derive(Debug)]
pub struct WaveSpawner {
    rng: fastrand::Rng,
}

impl WaveSpawner {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Spawner with a fixed seed for reproducible placement
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Replace the roster with `ENEMIES_PER_WAVE * wave` fresh skeletons
    pub fn spawn_wave(
        &mut self,
        wave: u32,
        hero_x: f32,
        frames: &dyn FrameLookup,
        roster: &mut Vec<Enemy>,
    ) {
        roster.clear();

        let count = ENEMIES_PER_WAVE * wave as usize;
        let y = GAME_FLOOR + SKELETON_FLOOR_OFFSET;
        for _ in 0..count {
            let x = self.spawn_x(hero_x);
            roster.push(Enemy::skeleton(frames, Vec2::new(x, y)));
        }

        info!("Wave {} spawned with {} skeletons", wave, count);
    }

    /// Uniform x inside the margins, far enough from the hero
    fn spawn_x(&mut self, hero_x: f32) -> f32 {
        let max_x = ARENA_WIDTH as i32 - SPAWN_MARGIN;
        loop {
            let x = self.rng.i32(SPAWN_MARGIN..=max_x) as f32;
            if (x - hero_x).abs() >= MIN_HERO_DISTANCE {
                return x;
            }
        }
    }
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self::new()
    }
}

/// The hero survived and every enemy of a non-empty roster is dead
pub fn is_cleared(hero: &Hero, roster: &[Enemy]) -> bool {
    hero.is_alive() && !roster.is_empty() && roster.iter().all(|enemy| !enemy.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::RecordingAudio;
    use crate::game::characters::animation::test_frames::FrameTable;
    use crate::game::Resources;

    fn frames() -> FrameTable {
        FrameTable::default().with_frame("knight").with_frame("skeleton")
    }

    #[test]
    fn test_first_wave_keeps_distance_from_hero() {
        let frames = frames();
        let mut spawner = WaveSpawner::with_seed(7);
        let mut roster = Vec::new();

        spawner.spawn_wave(1, 464.0, &frames, &mut roster);

        assert_eq!(roster.len(), 2);
        for enemy in &roster {
            let x = enemy.base.x();
            assert!((x - 464.0).abs() >= 100.0, "x = {}", x);
            assert!((50.0..=878.0).contains(&x), "x = {}", x);
            assert_eq!(enemy.base.position.y, 278.0);
            assert_eq!(enemy.base.name, "skeleton");
        }
    }

    #[test]
    fn test_count_scales_with_wave_and_replaces_roster() {
        let frames = frames();
        let mut spawner = WaveSpawner::with_seed(42);
        let mut roster = Vec::new();

        spawner.spawn_wave(1, 464.0, &frames, &mut roster);
        spawner.spawn_wave(4, 464.0, &frames, &mut roster);

        assert_eq!(roster.len(), 8);
        assert!(roster.iter().all(Enemy::is_alive));
    }

    #[test]
    fn test_placement_holds_near_arena_edge() {
        let frames = frames();
        let mut spawner = WaveSpawner::with_seed(3);
        let mut roster = Vec::new();

        for wave in 1..=10 {
            spawner.spawn_wave(wave, 60.0, &frames, &mut roster);
            for enemy in &roster {
                assert!(enemy.base.x() >= 160.0);
                assert!(enemy.base.x() <= 878.0);
            }
        }
    }

    #[test]
    fn test_same_seed_same_placement() {
        let frames = frames();
        let mut first = Vec::new();
        let mut second = Vec::new();

        WaveSpawner::with_seed(99).spawn_wave(3, 464.0, &frames, &mut first);
        WaveSpawner::with_seed(99).spawn_wave(3, 464.0, &frames, &mut second);

        let xs = |roster: &[Enemy]| roster.iter().map(|e| e.base.x()).collect::<Vec<_>>();
        assert_eq!(xs(&first), xs(&second));
    }

    #[test]
    fn test_is_cleared() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut hero = Hero::knight(&frames, Vec2::new(464.0, 255.0));
        let mut roster = Vec::new();

        assert!(!is_cleared(&hero, &roster));

        WaveSpawner::with_seed(1).spawn_wave(1, 464.0, &frames, &mut roster);
        assert!(!is_cleared(&hero, &roster));

        let mut res = Resources::new(&frames, &mut audio);
        roster[0].base.die(&mut res);
        assert!(!is_cleared(&hero, &roster));
        roster[1].base.die(&mut res);
        assert!(is_cleared(&hero, &roster));

        hero.base.die(&mut res);
        assert!(!is_cleared(&hero, &roster));
    }
}
