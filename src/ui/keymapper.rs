//! Key mapping for window input
//!
//! Converts key events to the single-byte units tasks read from their
//! window, or to window manager actions.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::line::{KEY_BACKSPACE, KEY_ENTER};

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

/// What a key press means to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Queue a unit for the focused window's task
    Input(u8),
    /// Focus the next window
    FocusNext,
    /// Destroy the focused window
    CloseWindow,
    /// Leave tosh
    Quit,
    /// Ignored
    None,
}

/// Key mapper for converting key events to actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent
    pub fn map(event: &KeyEvent) -> KeyAction {
        let mods = Modifiers::from(event.modifiers);

        match event.code {
            KeyCode::Char(ch) if mods.contains(Modifiers::CTRL) => Self::control(ch),
            KeyCode::Char(_) if mods.contains(Modifiers::ALT) => KeyAction::None,
            KeyCode::Char(ch) => Self::map_char(ch),
            KeyCode::Enter => KeyAction::Input(KEY_ENTER),
            KeyCode::Backspace => KeyAction::Input(KEY_BACKSPACE),
            KeyCode::Tab => KeyAction::Input(b'\t'),
            _ => KeyAction::None,
        }
    }

    /// Window manager bindings
    fn control(ch: char) -> KeyAction {
        match ch.to_ascii_lowercase() {
            'o' => KeyAction::FocusNext,
            'w' => KeyAction::CloseWindow,
            'q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    // Units are bytes; only ASCII fits in one
    fn map_char(ch: char) -> KeyAction {
        if ch.is_ascii() && !ch.is_ascii_control() {
            KeyAction::Input(ch as u8)
        } else {
            KeyAction::None
        }
    }
}
