//! Text field and Enter-key listener.

/// Keys the listener can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Backspace,
    Other,
}

/// A text input whose current content can be read.
pub trait TextField {
    fn value(&self) -> String;
}

/// Plain in-memory field. Editing keys are applied by whoever owns the field,
/// not by the listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply an editing key. Enter and unknown keys leave the text alone.
    pub fn apply(&mut self, key: Key) {
        match key {
            Key::Char(c) => self.text.push(c),
            Key::Backspace => {
                self.text.pop();
            }
            Key::Enter | Key::Other => {}
        }
    }
}

impl TextField for TextBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }
}

/// Watches key presses on one field; hands out its value on Enter.
#[derive(Debug)]
pub struct InputListener<F> {
    field: F,
}

impl<F: TextField> InputListener<F> {
    pub fn new(field: F) -> Self {
        Self { field }
    }

    /// Returns the field's current value (possibly empty) for Enter, `None` for
    /// any other key. The field is not read for other keys.
    pub fn on_key(&self, key: Key) -> Option<String> {
        match key {
            Key::Enter => Some(self.field.value()),
            _ => None,
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }
}
