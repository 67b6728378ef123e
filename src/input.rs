//! Keyboard input
//!
//! Discrete key presses become `Command`s according to the active screen;
//! steering keys are tracked as held state across keydown/keyup.

use crate::game::{Command, Screen};
use crate::sim::VehicleKind;

/// Steering keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn key_down(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.set(key, false);
    }

    /// Forget everything (focus lost, keyup events will never arrive)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set(&mut self, key: &str, down: bool) {
        match key {
            "ArrowLeft" | "a" | "A" => self.left = down,
            "ArrowRight" | "d" | "D" => self.right = down,
            _ => {}
        }
    }
}

/// Translate a DOM-style key name into a command for `screen`
pub fn map_key(screen: Screen, key: &str) -> Option<Command> {
    if screen == Screen::NameEntry {
        return map_name_entry(key);
    }

    let key = key.to_ascii_lowercase();
    let command = match (screen, key.as_str()) {
        (Screen::Start, " ") => Command::Begin,
        (Screen::Start, "h") => Command::ViewScores,
        (Screen::HighScores, "b" | "escape") => Command::Back,
        (Screen::VehicleSelect, digit) => {
            let kind = digit.chars().next().and_then(VehicleKind::from_digit);
            match kind {
                Some(kind) if digit.len() == 1 => Command::SelectVehicle(kind),
                _ => return map_global(&key),
            }
        }
        (Screen::Playing, " " | "arrowup" | "w") => Command::Jump,
        (Screen::Playing | Screen::Paused, "p" | "escape") => Command::TogglePause,
        (Screen::Playing, "i") => Command::ToggleAutopilot,
        (Screen::GameOver, "r") => Command::Restart,
        (Screen::GameOver, "q") => Command::Quit,
        _ => return map_global(&key),
    };
    Some(command)
}

/// Free-text entry: every key is either editing or typing
fn map_name_entry(key: &str) -> Option<Command> {
    match key {
        "Enter" => Some(Command::Confirm),
        "Backspace" => Some(Command::Erase),
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_control() => Some(Command::Type(c)),
                _ => None,
            }
        }
    }
}

/// Keys that work on every screen except name entry
fn map_global(key: &str) -> Option<Command> {
    match key {
        "m" => Some(Command::ToggleMute),
        "f" => Some(Command::ToggleFps),
        "v" => Some(Command::ToggleReducedMotion),
        "-" => Some(Command::VolumeDown),
        "=" | "+" => Some(Command::VolumeUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_track_press_and_release() {
        let mut held = HeldKeys::default();
        held.key_down("ArrowLeft");
        held.key_down("d");
        assert!(held.left && held.right);
        held.key_up("a");
        assert!(!held.left && held.right);
        held.clear();
        assert_eq!(held, HeldKeys::default());
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(map_key(Screen::Start, " "), Some(Command::Begin));
        assert_eq!(map_key(Screen::Start, "H"), Some(Command::ViewScores));
        assert_eq!(map_key(Screen::HighScores, "b"), Some(Command::Back));
        assert_eq!(map_key(Screen::Start, "x"), None);
    }

    #[test]
    fn test_name_entry_types_everything() {
        assert_eq!(map_key(Screen::NameEntry, "m"), Some(Command::Type('m')));
        assert_eq!(map_key(Screen::NameEntry, " "), Some(Command::Type(' ')));
        assert_eq!(map_key(Screen::NameEntry, "Backspace"), Some(Command::Erase));
        assert_eq!(map_key(Screen::NameEntry, "Enter"), Some(Command::Confirm));
        assert_eq!(map_key(Screen::NameEntry, "Shift"), None);
    }

    #[test]
    fn test_vehicle_digits() {
        assert_eq!(
            map_key(Screen::VehicleSelect, "2"),
            Some(Command::SelectVehicle(VehicleKind::Viper))
        );
        assert_eq!(map_key(Screen::VehicleSelect, "4"), None);
        assert_eq!(map_key(Screen::VehicleSelect, "m"), Some(Command::ToggleMute));
    }

    #[test]
    fn test_preference_keys_everywhere_but_name_entry() {
        assert_eq!(map_key(Screen::Start, "F"), Some(Command::ToggleFps));
        assert_eq!(map_key(Screen::Playing, "v"), Some(Command::ToggleReducedMotion));
        assert_eq!(map_key(Screen::Paused, "-"), Some(Command::VolumeDown));
        assert_eq!(map_key(Screen::GameOver, "+"), Some(Command::VolumeUp));
        assert_eq!(map_key(Screen::HighScores, "="), Some(Command::VolumeUp));
        assert_eq!(map_key(Screen::NameEntry, "f"), Some(Command::Type('f')));
    }

    #[test]
    fn test_play_keys() {
        assert_eq!(map_key(Screen::Playing, " "), Some(Command::Jump));
        assert_eq!(map_key(Screen::Playing, "p"), Some(Command::TogglePause));
        assert_eq!(map_key(Screen::Paused, "P"), Some(Command::TogglePause));
        assert_eq!(map_key(Screen::Paused, " "), None);
        assert_eq!(map_key(Screen::Playing, "i"), Some(Command::ToggleAutopilot));
        assert_eq!(map_key(Screen::GameOver, "r"), Some(Command::Restart));
        assert_eq!(map_key(Screen::GameOver, "q"), Some(Command::Quit));
        assert_eq!(map_key(Screen::GameOver, "M"), Some(Command::ToggleMute));
    }
}
