// Game session: screen state, wave progression and player input
//
// Owned by the shell and advanced one fixed tick at a time. Drawing reads it
// through `Scene::build` and never mutates it.

use glam::Vec2;
use log::{debug, info};

use crate::engine::assets::FrameLookup;
use crate::engine::audio::PlaybackId;
use crate::engine::input::{Action, Click, PlayerInput};
use crate::game::characters::stats::{ARENA_WIDTH, GAME_FLOOR};
use crate::game::characters::{Enemy, Hero, Orientation};
use crate::game::menu::{Menu, MenuAction};
use crate::game::wave::{is_cleared, WaveSpawner};
use crate::game::Resources;

/// Background music sound name
pub const SOUNDTRACK: &str = "soundtrack";

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Menu,
    Playing,
}

#[derive(Debug)]
pub struct GameSession {
    state: ScreenState,
    music_on: bool,
    wave: u32,
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    spawner: WaveSpawner,
    menu: Menu,
    music: Option<PlaybackId>,
}

impl GameSession {
    /// Menu screen, wave 1 already spawned around a centred hero
    pub fn new(frames: &dyn FrameLookup, mut spawner: WaveSpawner) -> Self {
        let hero = Hero::knight(frames, Vec2::new(ARENA_WIDTH / 2.0, GAME_FLOOR));
        let mut enemies = Vec::new();
        spawner.spawn_wave(1, hero.base.x(), frames, &mut enemies);

        Self {
            state: ScreenState::Menu,
            music_on: true,
            wave: 1,
            hero,
            enemies,
            spawner,
            menu: Menu::new(),
            music: None,
        }
    }

    /// Advance the simulation by one tick
    pub fn update(&mut self, input: &PlayerInput, res: &mut Resources<'_>) {
        if self.state != ScreenState::Playing {
            return;
        }

        self.hero.tick_cooldowns();

        if self.hero.is_alive() {
            if self.hero.is_dashing() {
                self.hero.advance_dash(res);
            } else {
                self.apply_movement(input, res);
                if input.is_pressed(Action::Dash) {
                    self.hero.dash(res);
                }
            }
            self.hero.regenerate_stamina();
        }

        self.hero.base.update_animation(res.audio);
        for enemy in &mut self.enemies {
            enemy.update_ai(&mut self.hero.base, res);
            enemy.base.update_animation(res.audio);
        }

        if is_cleared(&self.hero, &self.enemies) {
            self.wave += 1;
            self.spawner
                .spawn_wave(self.wave, self.hero.base.x(), res.frames, &mut self.enemies);
        }
    }

    fn apply_movement(&mut self, input: &PlayerInput, res: &mut Resources<'_>) {
        let direction = if input.is_pressed(Action::MoveLeft) {
            Some(Orientation::Left)
        } else if input.is_pressed(Action::MoveRight) {
            Some(Orientation::Right)
        } else {
            None
        };

        match direction {
            Some(orientation) => {
                let hero = &mut self.hero;
                hero.base.orientation = orientation;
                hero.base.position.x += hero.move_speed() * orientation.sign();
                hero.base.run(res);
            }
            None => self.hero.base.stop_running(res.audio),
        }
    }

    /// Handle a mouse click, returning the menu action it triggered
    ///
    /// `Exit` is left to the caller, which owns the window.
    pub fn click(&mut self, click: Click, res: &mut Resources<'_>) -> Option<MenuAction> {
        match self.state {
            ScreenState::Menu => {
                let action = self.menu.hit_test(click.position)?;
                self.apply_menu_action(action, res);
                Some(action)
            }
            ScreenState::Playing => {
                if click.action == Some(Action::Attack) && self.hero.is_alive() {
                    self.hero.attack(&mut self.enemies, res);
                }
                None
            }
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction, res: &mut Resources<'_>) {
        info!("Menu action: {:?}", action);
        match action {
            MenuAction::Start => {
                self.state = ScreenState::Playing;
                if self.music_on {
                    self.start_music(res);
                }
            }
            MenuAction::ToggleMusic => {
                if self.music_on {
                    self.stop_music(res);
                    self.music_on = false;
                } else {
                    if self.state == ScreenState::Playing {
                        self.start_music(res);
                    }
                    self.music_on = true;
                }
            }
            MenuAction::Exit => {}
        }
    }

    fn start_music(&mut self, res: &mut Resources<'_>) {
        self.stop_music(res);
        self.music = res.audio.play(SOUNDTRACK, true);
        if self.music.is_none() {
            debug!("Playing without music");
        }
    }

    fn stop_music(&mut self, res: &mut Resources<'_>) {
        if let Some(music) = self.music.take() {
            res.audio.stop(music);
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}
