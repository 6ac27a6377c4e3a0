//! Player commands and the key bindings that produce them.
//!
//! Keys are named independently of any terminal library so bindings can be
//! written in the config file; the host translates its own key events into
//! [`Key`] values.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Shoot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Char(char),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<Key>,
    pub move_right: Vec<Key>,
    pub shoot: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![Key::Left, Key::Char('a')],
            // The down arrow has always meant "right" in this game.
            move_right: vec![Key::Right, Key::Down, Key::Char('d')],
            shoot: vec![Key::Up, Key::Space],
        }
    }
}

impl KeyBindings {
    /// Command bound to `key`, or `None` for unmapped keys.
    ///
    /// Letters match case-insensitively.  If a key appears in several lists
    /// the first of left, right, shoot wins.
    pub fn command_for(&self, key: Key) -> Option<Command> {
        let key = match key {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        };
        let bound = |keys: &[Key]| {
            keys.iter().any(|k| match k {
                Key::Char(c) => Key::Char(c.to_ascii_lowercase()) == key,
                other => *other == key,
            })
        };

        if bound(&self.move_left) {
            Some(Command::MoveLeft)
        } else if bound(&self.move_right) {
            Some(Command::MoveRight)
        } else if bound(&self.shoot) {
            Some(Command::Shoot)
        } else {
            None
        }
    }
}
