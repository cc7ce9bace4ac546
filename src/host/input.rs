//! Keyboard polling

use std::collections::HashSet;

use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys the demo apps poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    D,
    M,
    Left,
    Right,
    Space,
    Escape,
}

impl Key {
    /// Map a physical key; `None` for keys nobody polls
    pub fn from_physical(key: PhysicalKey) -> Option<Self> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        match code {
            KeyCode::KeyA => Some(Key::A),
            KeyCode::KeyD => Some(Key::D),
            KeyCode::KeyM => Some(Key::M),
            KeyCode::ArrowLeft => Some(Key::Left),
            KeyCode::ArrowRight => Some(Key::Right),
            KeyCode::Space => Some(Key::Space),
            KeyCode::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Set of keys currently held down
#[derive(Debug, Default)]
pub struct Keyboard {
    down: HashSet<Key>,
}

impl Keyboard {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    pub fn set(&mut self, key: Key, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.down.insert(key);
            }
            ElementState::Released => {
                self.down.remove(&key);
            }
        }
    }

    /// Forget everything; used when the window loses focus
    pub fn clear(&mut self) {
        self.down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = Keyboard::default();
        keys.set(Key::Space, ElementState::Pressed);
        assert!(keys.is_key_down(Key::Space));
        keys.set(Key::Space, ElementState::Released);
        assert!(!keys.is_key_down(Key::Space));
    }

    #[test]
    fn test_clear_releases_all() {
        let mut keys = Keyboard::default();
        keys.set(Key::A, ElementState::Pressed);
        keys.set(Key::Right, ElementState::Pressed);
        keys.clear();
        assert!(!keys.is_key_down(Key::A));
        assert!(!keys.is_key_down(Key::Right));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::ArrowLeft)),
            Some(Key::Left)
        );
        assert_eq!(Key::from_physical(PhysicalKey::Code(KeyCode::KeyQ)), None);
    }
}
