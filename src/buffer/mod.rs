//! Editable text regions handed to the replacer by the host.

/// One editable region of caption text (a single cue or a whole transcript block).
///
/// The host owns the buffer. The replacer only reads the current text and
/// writes the updated text back when something actually changed.
pub trait TextBuffer {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: String);
}

impl TextBuffer for String {
    fn text(&self) -> &str {
        self.as_str()
    }

    fn set_text(&mut self, text: String) {
        *self = text;
    }
}

impl<B: TextBuffer + ?Sized> TextBuffer for &mut B {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn set_text(&mut self, text: String) {
        (**self).set_text(text);
    }
}
