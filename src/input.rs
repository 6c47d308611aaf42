//! Input state: "is this control currently held".
//!
//! The simulation only ever asks the `InputState` trait; where the answer
//! comes from is the host's business.  `KeyboardState` is the crossterm
//! host used by the binary.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Fire,
}

pub trait InputState {
    fn is_down(&self, control: Control) -> bool;
}

/// Fixed set of held controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Held {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Held {
    pub fn none() -> Self {
        Self::default()
    }
}

impl InputState for Held {
    fn is_down(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Fire => self.fire,
        }
    }
}

// ── Terminal keyboard ─────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat arrived within this many
/// frames.  Terminals without key-release events only send repeats, and the
/// OS repeat rate refreshes the key well inside this window.
pub const HOLD_WINDOW: u64 = 8;

/// Tracks the frame each key was last seen on.
///
/// Keyboard-enhanced terminals (kitty protocol) send `Release` and the key is
/// dropped immediately; classic terminals only send `Press` and the key
/// expires after `HOLD_WINDOW` quiet frames.
#[derive(Debug, Default)]
pub struct KeyboardState {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the frame counter used for hold expiry.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle(&mut self, event: &KeyEvent) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    pub fn clear(&mut self) {
        self.key_frame.clear();
    }

    fn is_held(&self, code: KeyCode) -> bool {
        self.key_frame
            .get(&code)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

impl InputState for KeyboardState {
    fn is_down(&self, control: Control) -> bool {
        match control {
            Control::Left => self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            Control::Right => self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            Control::Fire => self.is_held(KeyCode::Char(' ')),
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
