// Scene building: read-only projection of the session into draw commands

use glam::{Vec2, Vec4};

use crate::core::math::{ratio, Rect};
use crate::engine::assets::FrameLookup;
use crate::engine::renderer::{Anchor, DrawCommand};
use crate::game::characters::stats::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::game::characters::Character;
use crate::game::session::{GameSession, ScreenState};

pub const WINDOW_TITLE: &str = "Knight Arena";
/// Frame drawn behind everything
pub const BACKGROUND: &str = "background";

const BAR_WIDTH: f32 = 200.0;
const BAR_HEIGHT: f32 = 20.0;
const BAR_MARGIN: f32 = 10.0;
const BAR_SPACING: f32 = 5.0;
const LABEL_SIZE: f32 = 30.0;
const GAME_OVER_SIZE: f32 = 60.0;

pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const GRAY: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);
pub const GREEN: Vec4 = Vec4::new(0.0, 0.8, 0.0, 1.0);
pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
/// Translucent red wash over the arena once the hero is dead
pub const GAME_OVER_TINT: Vec4 = Vec4::new(0.6, 0.0, 0.0, 0.35);

/// Everything needed to present one frame
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Back to front
    pub commands: Vec<DrawCommand>,
    /// Status line for the window title
    pub title: String,
}

impl Scene {
    /// Project the session into draw commands
    pub fn build(session: &GameSession, frames: &dyn FrameLookup) -> Self {
        let mut scene = Self::default();

        if let Some(background) = frames.frame(BACKGROUND) {
            scene.commands.push(DrawCommand::Sprite {
                frame: background,
                position: Vec2::ZERO,
                anchor: Anchor::TopLeft,
            });
        }

        match session.state() {
            ScreenState::Playing => scene.push_playing(session),
            ScreenState::Menu => scene.push_menu(session),
        }

        scene
    }

    fn push_playing(&mut self, session: &GameSession) {
        let hero = &session.hero;

        self.push_character(&hero.base);
        for enemy in &session.enemies {
            self.push_character(&enemy.base);
        }

        let x = ARENA_WIDTH - BAR_WIDTH - BAR_MARGIN;
        let health_bar = Rect::new(x, BAR_MARGIN, BAR_WIDTH, BAR_HEIGHT);
        let stamina_y = BAR_MARGIN + BAR_HEIGHT + BAR_SPACING;
        let stamina_bar = Rect::new(x, stamina_y, BAR_WIDTH, BAR_HEIGHT);
        self.push_bar(
            health_bar,
            ratio(hero.base.health, hero.base.max_health()),
            GREEN,
        );
        self.push_bar(stamina_bar, ratio(hero.stamina, hero.max_stamina()), BLUE);

        let wave = format!("Wave: {}", session.wave());
        self.push_text(&wave, Vec2::splat(BAR_MARGIN), Anchor::TopLeft, LABEL_SIZE, WHITE);

        if hero.is_alive() {
            self.title = format!("{} | {}", WINDOW_TITLE, wave);
        } else {
            self.commands.push(DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
                color: GAME_OVER_TINT,
            });
            let centre = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT) * 0.5;
            self.push_text("GAME OVER", centre, Anchor::Center, GAME_OVER_SIZE, RED);
            self.title = format!("{} | {} | GAME OVER", WINDOW_TITLE, wave);
        }
    }

    fn push_menu(&mut self, session: &GameSession) {
        for button in session.menu().buttons() {
            self.commands.push(DrawCommand::FillRect {
                rect: button.rect,
                color: GRAY,
            });
            self.commands.push(DrawCommand::OutlineRect {
                rect: button.rect,
                color: WHITE,
            });
            self.push_text(
                button.action.label(session.music_on()),
                button.rect.center(),
                Anchor::Center,
                LABEL_SIZE,
                WHITE,
            );
        }

        let labels: Vec<&str> = session
            .menu()
            .buttons()
            .iter()
            .map(|button| button.action.label(session.music_on()))
            .collect();
        self.title = format!("{} | {}", WINDOW_TITLE, labels.join(" / "));
    }

    fn push_character(&mut self, character: &Character) {
        if let Some(frame) = character.image() {
            self.commands.push(DrawCommand::Sprite {
                frame,
                position: character.position,
                anchor: Anchor::Center,
            });
        }
    }

    fn push_text(&mut self, text: &str, position: Vec2, anchor: Anchor, size: f32, color: Vec4) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            anchor,
            size,
            color,
        });
    }

    fn push_bar(&mut self, rect: Rect, fill: f32, color: Vec4) {
        // Whole units, like the outline
        let filled = rect.with_width_fraction((rect.size.x * fill).floor() / rect.size.x);
        self.commands.push(DrawCommand::OutlineRect { rect, color: WHITE });
        self.commands.push(DrawCommand::FillRect {
            rect: filled,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::RecordingAudio;
    use crate::engine::input::{Action, Click};
    use crate::game::characters::animation::test_frames::FrameTable;
    use crate::game::wave::WaveSpawner;
    use crate::game::Resources;

    fn frames() -> FrameTable {
        FrameTable::default()
            .with_frame("background")
            .with_frame("knight")
            .with_frame("skeleton")
    }

    fn start(session: &mut GameSession, frames: &FrameTable, audio: &mut RecordingAudio) {
        let mut res = Resources::new(frames, audio);
        session.click(
            Click {
                position: Vec2::new(464.0, 120.0),
                action: Some(Action::Attack),
            },
            &mut res,
        );
    }

    fn fills(scene: &Scene) -> Vec<(Rect, Vec4)> {
        scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    fn texts(scene: &Scene) -> Vec<(&str, Vec2, Anchor, f32, Vec4)> {
        scene
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text {
                    text,
                    position,
                    anchor,
                    size,
                    color,
                } => Some((text.as_str(), *position, *anchor, *size, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_menu_scene() {
        let frames = frames();
        let session = GameSession::new(&frames, WaveSpawner::with_seed(1));

        let scene = Scene::build(&session, &frames);

        assert_eq!(
            scene.commands[0],
            DrawCommand::Sprite {
                frame: frames.handle("background"),
                position: Vec2::ZERO,
                anchor: Anchor::TopLeft,
            }
        );
        // Fill, outline and label per button, no characters
        assert_eq!(scene.commands.len(), 10);
        assert!(scene.title.contains("Music: On"));
    }

    #[test]
    fn test_menu_buttons_are_labelled_at_their_centres() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut session = GameSession::new(&frames, WaveSpawner::with_seed(1));

        let scene = Scene::build(&session, &frames);
        let labels = texts(&scene);
        let buttons = session.menu().buttons();
        let toggle = buttons[1].rect.center();

        assert_eq!(labels.len(), 3);
        for ((text, position, anchor, size, color), expected) in
            labels.iter().zip(["Start", "Music: On", "Exit"])
        {
            assert_eq!(*text, expected);
            assert_eq!(*anchor, Anchor::Center);
            assert_eq!(*size, LABEL_SIZE);
            assert_eq!(*color, WHITE);
            assert!(buttons.iter().any(|button| button.rect.center() == *position));
        }

        // Toggle label follows the music flag
        let mut res = Resources::new(&frames, &mut audio);
        session.click(
            Click {
                position: toggle,
                action: Some(Action::Attack),
            },
            &mut res,
        );
        let scene = Scene::build(&session, &frames);
        assert_eq!(texts(&scene)[1].0, "Music: Off");
    }

    #[test]
    fn test_playing_scene_draws_characters_and_bars() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut session = GameSession::new(&frames, WaveSpawner::with_seed(1));
        start(&mut session, &frames, &mut audio);
        session.hero.base.health = 50;
        session.hero.stamina = 25;

        let scene = Scene::build(&session, &frames);

        let sprites = scene
            .commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Sprite { anchor: Anchor::Center, .. }))
            .count();
        assert_eq!(sprites, 3);

        let fills = fills(&scene);
        assert_eq!(fills[0], (Rect::new(718.0, 10.0, 100.0, 20.0), GREEN));
        assert_eq!(fills[1], (Rect::new(718.0, 35.0, 50.0, 20.0), BLUE));
        assert_eq!(scene.title, "Knight Arena | Wave: 1");
        assert_eq!(
            texts(&scene),
            vec![("Wave: 1", Vec2::new(10.0, 10.0), Anchor::TopLeft, LABEL_SIZE, WHITE)]
        );
    }

    #[test]
    fn test_game_over_overlay() {
        let frames = frames();
        let mut audio = RecordingAudio::default();
        let mut session = GameSession::new(&frames, WaveSpawner::with_seed(1));
        start(&mut session, &frames, &mut audio);
        let mut res = Resources::new(&frames, &mut audio);
        session.hero.base.take_hit(100, 0.0, &mut res);

        let scene = Scene::build(&session, &frames);

        assert!(scene.title.ends_with("GAME OVER"));
        let fills = fills(&scene);
        assert_eq!(fills[0].0.size.x, 0.0);
        assert_eq!(fills.last().map(|(_, color)| *color), Some(GAME_OVER_TINT));

        let texts = texts(&scene);
        assert_eq!(texts.len(), 2);
        assert_eq!(
            texts[1],
            ("GAME OVER", Vec2::new(464.0, 167.5), Anchor::Center, GAME_OVER_SIZE, RED)
        );
        // Drawn over the tint
        assert!(matches!(scene.commands.last(), Some(DrawCommand::Text { .. })));
    }

    #[test]
    fn test_missing_background_is_skipped() {
        let frames = FrameTable::default().with_frame("knight");
        let session = GameSession::new(&frames, WaveSpawner::with_seed(1));

        let scene = Scene::build(&session, &frames);

        assert!(!scene
            .commands
            .iter()
            .any(|command| matches!(command, DrawCommand::Sprite { .. })));
    }
}
