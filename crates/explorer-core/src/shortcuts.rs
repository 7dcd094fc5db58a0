//! Keyboard shortcuts.

/// Actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    FocusSearch,
    ClearSearch,
    ToggleTheme,
}

impl Shortcut {
    pub const fn all() -> &'static [Shortcut] {
        &[Self::FocusSearch, Self::ClearSearch, Self::ToggleTheme]
    }

    /// Key shown in help text.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::FocusSearch => "/",
            Self::ClearSearch => "Escape",
            Self::ToggleTheme => "t",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::FocusSearch => "Focus search",
            Self::ClearSearch => "Clear search",
            Self::ToggleTheme => "Toggle dark mode",
        }
    }
}

/// A key event as delivered by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    /// The event target is a text field; printable keys belong to it.
    pub in_text_input: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// Map a key press to a shortcut. Presses with modifiers are left alone.
pub fn shortcut_for(press: &KeyPress) -> Option<Shortcut> {
    if press.ctrl || press.alt || press.meta {
        return None;
    }
    match press.key.as_str() {
        "Escape" => Some(Shortcut::ClearSearch),
        "/" if !press.in_text_input => Some(Shortcut::FocusSearch),
        "t" | "T" if !press.in_text_input => Some(Shortcut::ToggleTheme),
        _ => None,
    }
}
