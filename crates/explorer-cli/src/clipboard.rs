//! Terminal clipboard backends.
//!
//! The primary backend writes an OSC 52 escape sequence, which most modern
//! terminal emulators turn into a clipboard write. The fallback prints the
//! text so it can be copied by hand.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use explorer_core::{ClipboardBackend, ClipboardError};

/// OSC 52 clipboard write through a terminal.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    is_terminal: bool,
}

impl<W: Write> Osc52Clipboard<W> {
    /// `is_terminal` should reflect whether `out` is attached to a terminal;
    /// escape sequences sent anywhere else are refused.
    pub fn new(out: W, is_terminal: bool) -> Self {
        Self { out, is_terminal }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.is_terminal {
            return Err(ClipboardError::Unavailable(
                "output is not a terminal".to_string(),
            ));
        }
        let payload = STANDARD.encode(text.as_bytes());
        write!(self.out, "\x1b]52;c;{payload}\x07")
            .and_then(|()| self.out.flush())
            .map_err(|error| ClipboardError::WriteFailed(error.to_string()))
    }
}

/// Prints the text on its own line.
pub struct PrintFallback<W: Write> {
    out: W,
}

impl<W: Write> PrintFallback<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for PrintFallback<W> {
    fn name(&self) -> &'static str {
        "print"
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        writeln!(self.out, "{text}")
            .and_then(|()| self.out.flush())
            .map_err(|error| ClipboardError::WriteFailed(error.to_string()))
    }
}
