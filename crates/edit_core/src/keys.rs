//! Keyboard input.

use serde::Deserialize;

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Return,
    Back,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Insert,
    A,
    C,
    V,
    X,
    Y,
    Z,
}

impl KeyCode {
    /// Map a Windows virtual-key code. Unknown keys give `None`.
    pub fn from_virtual_key(vk: u32) -> Option<Self> {
        let key = match vk {
            0x0D => Self::Return,
            0x08 => Self::Back,
            0x2E => Self::Delete,
            0x09 => Self::Tab,
            0x25 => Self::Left,
            0x26 => Self::Up,
            0x27 => Self::Right,
            0x28 => Self::Down,
            0x24 => Self::Home,
            0x23 => Self::End,
            0x2D => Self::Insert,
            0x41 => Self::A,
            0x43 => Self::C,
            0x56 => Self::V,
            0x58 => Self::X,
            0x59 => Self::Y,
            0x5A => Self::Z,
            _ => return None,
        };
        Some(key)
    }
}

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
    };
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(KeyCode::from_virtual_key(0x25), Some(KeyCode::Left));
        assert_eq!(KeyCode::from_virtual_key(0x26), Some(KeyCode::Up));
        assert_eq!(KeyCode::from_virtual_key(0x27), Some(KeyCode::Right));
        assert_eq!(KeyCode::from_virtual_key(0x28), Some(KeyCode::Down));
    }

    #[test]
    fn maps_letters_and_rejects_unknown() {
        assert_eq!(KeyCode::from_virtual_key(u32::from(b'V')), Some(KeyCode::V));
        assert_eq!(KeyCode::from_virtual_key(u32::from(b'B')), None);
        assert_eq!(KeyCode::from_virtual_key(0x70), None);
    }
}
