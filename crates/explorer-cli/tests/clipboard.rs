//! Terminal clipboard backends and the copy fallback chain.

use explorer_cli::{Osc52Clipboard, PrintFallback};
use explorer_core::{ClipboardBackend, CopyOutcome, copy_with_fallback};

const LINK: &str = "https://example.com/explorer/#s-max-threads";

#[test]
fn osc52_wraps_base64_payload() {
    let mut clipboard = Osc52Clipboard::new(Vec::new(), true);
    clipboard.write_text("hi").unwrap();
    assert_eq!(clipboard.into_inner(), b"\x1b]52;c;aGk=\x07");
}

#[test]
fn non_terminal_output_falls_back_to_printing() {
    let mut primary = Osc52Clipboard::new(Vec::new(), false);
    let mut fallback = PrintFallback::new(Vec::new());
    let outcome = copy_with_fallback(&mut primary, &mut fallback, LINK);
    assert_eq!(outcome, CopyOutcome::Fallback);
    assert!(primary.into_inner().is_empty());
    assert_eq!(
        String::from_utf8(fallback.into_inner()).unwrap(),
        format!("{LINK}\n")
    );
}

#[test]
fn terminal_copy_prints_nothing() {
    let mut primary = Osc52Clipboard::new(Vec::new(), true);
    let mut fallback = PrintFallback::new(Vec::new());
    let outcome = copy_with_fallback(&mut primary, &mut fallback, LINK);
    assert_eq!(outcome, CopyOutcome::Primary);
    assert!(fallback.into_inner().is_empty());
}
