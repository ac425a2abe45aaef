//! Key events fed to the segmenter

/// A key press, reduced to what the segmenter cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character
    Char(char),
    /// The scanner's terminator (Enter)
    Terminator,
    /// Any other key: arrows, modifiers, function keys
    Other,
}

/// A key press with its timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub at_ms: u64,
    /// The key was typed into a text-entry field and belongs to it
    pub text_entry: bool,
}

impl KeyEvent {
    pub fn new(key: Key, at_ms: u64) -> Self {
        Self {
            key,
            at_ms,
            text_entry: false,
        }
    }

    /// A character event; control characters are reported as [`Key::Other`]
    pub fn char(c: char, at_ms: u64) -> Self {
        let key = if c.is_control() {
            Key::Other
        } else {
            Key::Char(c)
        };
        Self::new(key, at_ms)
    }

    pub fn terminator(at_ms: u64) -> Self {
        Self::new(Key::Terminator, at_ms)
    }

    pub fn other(at_ms: u64) -> Self {
        Self::new(Key::Other, at_ms)
    }

    /// Mark the event as belonging to a text-entry field
    pub fn in_text_entry(mut self) -> Self {
        self.text_entry = true;
        self
    }
}
