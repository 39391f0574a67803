//=========================================================================
// Engine Event Types
//
// Defines the engine-level events fired into the listener registry.
//
// This module abstracts away platform-specific input (e.g. Winit) into
// a small closed set of events that game code subscribes to by kind.
//
// Responsibilities:
// - Represent keyboard keys in a stable, portable way
// - Provide the closed `Event` enum and its payload-free `EventKind` tag
// - Give keys a human-readable name for logs and UI
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    PlatformEvent (platform bridge)
//         ↓  translated once per polled batch in `Game::begin_frame`
//    Event (this module)
//         ↓
//    EventRegistry → listeners registered for `event.kind()`
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::math::Vec2;

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    //--- Modifier Keys ----------------------------------------------------

    ControlLeft,
    ControlRight,
    ShiftLeft,
    ShiftRight,
    AltLeft,
    AltRight,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

impl KeyCode {
    /// Lowercase display name ("a", "7", "left shift", "f10", ...).
    pub fn name(self) -> &'static str {
        use KeyCode::*;
        match self {
            Digit0 => "0", Digit1 => "1", Digit2 => "2", Digit3 => "3", Digit4 => "4",
            Digit5 => "5", Digit6 => "6", Digit7 => "7", Digit8 => "8", Digit9 => "9",

            KeyA => "a", KeyB => "b", KeyC => "c", KeyD => "d", KeyE => "e",
            KeyF => "f", KeyG => "g", KeyH => "h", KeyI => "i", KeyJ => "j",
            KeyK => "k", KeyL => "l", KeyM => "m", KeyN => "n", KeyO => "o",
            KeyP => "p", KeyQ => "q", KeyR => "r", KeyS => "s", KeyT => "t",
            KeyU => "u", KeyV => "v", KeyW => "w", KeyX => "x", KeyY => "y",
            KeyZ => "z",

            ArrowDown => "down", ArrowLeft => "left",
            ArrowRight => "right", ArrowUp => "up",

            Space => "space", Enter => "enter", Escape => "escape",
            Tab => "tab", Backspace => "backspace", Delete => "delete",

            ControlLeft => "left ctrl", ControlRight => "right ctrl",
            ShiftLeft => "left shift", ShiftRight => "right shift",
            AltLeft => "left alt", AltRight => "right alt",

            F1 => "f1", F2 => "f2", F3 => "f3", F4 => "f4",
            F5 => "f5", F6 => "f6", F7 => "f7", F8 => "f8",
            F9 => "f9", F10 => "f10", F11 => "f11", F12 => "f12",

            Unidentified => "unknown",
        }
    }

    /// Character this key types without modifiers, if it types one.
    pub fn printable(self) -> Option<char> {
        use KeyCode::*;
        match self {
            Space => Some(' '),
            Enter => Some('\n'),
            Tab => Some('\t'),
            Backspace => Some('\u{8}'),
            _ => {
                let name = self.name();
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => Some(c),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== EventKind ===========================================================

/// Payload-free tag of an [`Event`]; the key of the listener registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Quit,
    KeyDown,
    KeyUp,
    WindowResize,
}

//=== Event ===============================================================

/// Engine event delivered synchronously to registered listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The game is about to stop (window closed or quit requested).
    Quit,

    /// Key pressed down.
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Window resized; payload is the new inner size in pixels.
    WindowResize(Vec2),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Quit => EventKind::Quit,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::WindowResize(_) => EventKind::WindowResize,
        }
    }

    /// Key carried by `KeyDown`/`KeyUp`.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => Some(*key),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Kind Mapping
    //=====================================================================

    #[test]
    fn kind_ignores_payload() {
        assert_eq!(Event::KeyDown(KeyCode::KeyA).kind(), EventKind::KeyDown);
        assert_eq!(Event::KeyDown(KeyCode::Escape).kind(), EventKind::KeyDown);
        assert_eq!(Event::KeyUp(KeyCode::KeyA).kind(), EventKind::KeyUp);
        assert_eq!(Event::Quit.kind(), EventKind::Quit);
        assert_eq!(
            Event::WindowResize(Vec2::new(10.0, 10.0)).kind(),
            EventKind::WindowResize
        );
    }

    #[test]
    fn key_payload_access() {
        assert_eq!(Event::KeyUp(KeyCode::Space).key(), Some(KeyCode::Space));
        assert_eq!(Event::Quit.key(), None);
    }

    //=====================================================================
    // Key Names
    //=====================================================================

    #[test]
    fn key_names() {
        assert_eq!(KeyCode::KeyQ.to_string(), "q");
        assert_eq!(KeyCode::Digit0.to_string(), "0");
        assert_eq!(KeyCode::ShiftRight.to_string(), "right shift");
        assert_eq!(KeyCode::F12.to_string(), "f12");
        assert_eq!(KeyCode::Unidentified.to_string(), "unknown");
    }

    #[test]
    fn printable_keys() {
        assert_eq!(KeyCode::KeyZ.printable(), Some('z'));
        assert_eq!(KeyCode::Digit7.printable(), Some('7'));
        assert_eq!(KeyCode::Space.printable(), Some(' '));
        assert_eq!(KeyCode::Escape.printable(), None);
        assert_eq!(KeyCode::F1.printable(), None);
        assert_eq!(KeyCode::Backspace.printable(), Some('\u{8}'));
    }
}
