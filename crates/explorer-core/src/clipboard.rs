//! Best-effort clipboard copy.
//!
//! Copying a deep link tries the primary clipboard backend first, then a
//! legacy fallback. If both fail the action is dropped silently; copying is
//! never critical.

use tracing::debug;

use crate::error::ClipboardError;

/// Something that can receive text.
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Which path, if any, delivered the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Primary,
    Fallback,
    Abandoned,
}

pub fn copy_with_fallback(
    primary: &mut dyn ClipboardBackend,
    legacy: &mut dyn ClipboardBackend,
    text: &str,
) -> CopyOutcome {
    match primary.write_text(text) {
        Ok(()) => return CopyOutcome::Primary,
        Err(error) => debug!(backend = primary.name(), %error, "clipboard write failed"),
    }
    match legacy.write_text(text) {
        Ok(()) => CopyOutcome::Fallback,
        Err(error) => {
            debug!(backend = legacy.name(), %error, "clipboard fallback failed");
            CopyOutcome::Abandoned
        }
    }
}
