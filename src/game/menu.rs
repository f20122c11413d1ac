// Main menu buttons

use glam::Vec2;

use crate::core::math::Rect;
use crate::game::characters::stats::ARENA_WIDTH;

pub const BUTTON_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// What a menu button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    ToggleMusic,
    Exit,
}

impl MenuAction {
    /// Text shown for the button
    pub fn label(&self, music_on: bool) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::ToggleMusic if music_on => "Music: On",
            Self::ToggleMusic => "Music: Off",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuButton {
    pub action: MenuAction,
    pub rect: Rect,
}

/// The three stacked buttons, centred horizontally
#[derive(Debug, Clone)]
pub struct Menu {
    buttons: [MenuButton; 3],
}

impl Menu {
    pub fn new() -> Self {
        let x = ARENA_WIDTH / 2.0 - BUTTON_WIDTH / 2.0;
        let button = |action, y| MenuButton {
            action,
            rect: Rect::new(x, y, BUTTON_WIDTH, BUTTON_HEIGHT),
        };

        Self {
            buttons: [
                button(MenuAction::Start, 100.0),
                button(MenuAction::ToggleMusic, 160.0),
                button(MenuAction::Exit, 220.0),
            ],
        }
    }

    pub fn buttons(&self) -> &[MenuButton] {
        &self.buttons
    }

    /// Action of the button under `point`, if any
    pub fn hit_test(&self, point: Vec2) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|button| button.rect.contains(point))
            .map(|button| button.action)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_each_button() {
        let menu = Menu::new();

        assert_eq!(menu.hit_test(Vec2::new(464.0, 120.0)), Some(MenuAction::Start));
        assert_eq!(menu.hit_test(Vec2::new(364.0, 160.0)), Some(MenuAction::ToggleMusic));
        assert_eq!(menu.hit_test(Vec2::new(563.0, 259.0)), Some(MenuAction::Exit));
    }

    #[test]
    fn test_hit_test_misses() {
        let menu = Menu::new();

        // Gaps between buttons and outside the column
        assert_eq!(menu.hit_test(Vec2::new(464.0, 145.0)), None);
        assert_eq!(menu.hit_test(Vec2::new(300.0, 120.0)), None);
        assert_eq!(menu.hit_test(Vec2::new(464.0, 20.0)), None);
        assert_eq!(menu.hit_test(Vec2::new(564.0, 120.0)), None);
    }

    #[test]
    fn test_buttons_are_centred() {
        let menu = Menu::new();
        for button in menu.buttons() {
            assert_eq!(button.rect.center().x, ARENA_WIDTH / 2.0);
            assert_eq!(button.rect.size, Vec2::new(200.0, 40.0));
        }
    }

    #[test]
    fn test_music_label_follows_flag() {
        assert_eq!(MenuAction::ToggleMusic.label(true), "Music: On");
        assert_eq!(MenuAction::ToggleMusic.label(false), "Music: Off");
        assert_eq!(MenuAction::Start.label(false), "Start");
    }
}
