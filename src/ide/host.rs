//! The narrow interfaces the core exchanges with the editor host.
//!
//! The host (script editor, plugin runtime, test harness) implements these
//! traits. Every call returns a `Result` so that host-side failures arrive as
//! values; the core never assumes a host call succeeded.

use std::fmt;

use crate::base::{DocumentId, HostError, LineCol};

/// Name of the host method that positioned edits depend on.
pub const POSITIONED_EDIT_METHOD: &str = "apply_edit";

/// Operating mode derived from host capabilities.
///
/// Only insertion differs between modes; ranking and navigation logic is
/// the same in both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Atomic positioned edits and tab-stop sessions.
    Primary,
    /// Snippets are appended to the end of the document, no sessions.
    Fallback,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Primary => f.write_str("primary"),
            Mode::Fallback => f.write_str("fallback"),
        }
    }
}

/// Capability probe supplied by the host.
pub trait HostCapabilities {
    /// Whether scripted editing is enabled at all.
    fn is_enabled(&self) -> bool;

    /// Whether the host exposes a method with this name.
    fn has_method(&self, name: &str) -> bool;
}

/// Pick the operating mode for a host.
pub fn detect_mode(caps: &dyn HostCapabilities) -> Mode {
    let mode = if caps.is_enabled() && caps.has_method(POSITIONED_EDIT_METHOD) {
        Mode::Primary
    } else {
        Mode::Fallback
    };
    tracing::info!(%mode, "detected host mode");
    mode
}

/// Handle for an input-listener subscription.
///
/// Returned by [`EditorHost::subscribe_input`] and given back exactly once to
/// [`EditorHost::unsubscribe_input`]. Not `Clone`, so it cannot be released
/// twice by accident.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

impl ListenerHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Document editing and input plumbing provided by the host.
pub trait EditorHost {
    /// Insert `text` at `at` as a single atomic edit.
    fn apply_edit(&mut self, document: DocumentId, at: LineCol, text: &str)
    -> Result<(), HostError>;

    /// Append `text` to the end of the document.
    fn append(&mut self, document: DocumentId, text: &str) -> Result<(), HostError>;

    /// Move the caret.
    fn set_cursor(&mut self, document: DocumentId, at: LineCol) -> Result<(), HostError>;

    /// Start receiving keyboard and pointer events for tab-stop mode.
    fn subscribe_input(&mut self) -> Result<ListenerHandle, HostError>;

    /// Stop receiving input events.
    fn unsubscribe_input(&mut self, handle: ListenerHandle);
}

/// Keys the navigator distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Tab,
    ShiftTab,
    /// Any printable character, including digits.
    Char(char),
    Space,
    Enter,
    Backspace,
    Delete,
    /// Explicit cancel (Escape).
    Escape,
    /// Arrows, modifiers and anything else the navigator ignores.
    Other,
}

/// External input forwarded by the host while a session is listening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    PointerPress,
}

impl InputEvent {
    /// Events that end a tab-stop session no matter where it is.
    pub fn is_disqualifying(self) -> bool {
        match self {
            InputEvent::PointerPress => true,
            InputEvent::Key(key) => matches!(
                key,
                Key::Char(_)
                    | Key::Space
                    | Key::Enter
                    | Key::Backspace
                    | Key::Delete
                    | Key::Escape
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Caps {
        enabled: bool,
        methods: &'static [&'static str],
    }

    impl HostCapabilities for Caps {
        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn has_method(&self, name: &str) -> bool {
            self.methods.contains(&name)
        }
    }

    #[test]
    fn test_detect_mode() {
        let full = Caps { enabled: true, methods: &[POSITIONED_EDIT_METHOD] };
        assert_eq!(detect_mode(&full), Mode::Primary);

        let disabled = Caps { enabled: false, methods: &[POSITIONED_EDIT_METHOD] };
        assert_eq!(detect_mode(&disabled), Mode::Fallback);

        let missing = Caps { enabled: true, methods: &[] };
        assert_eq!(detect_mode(&missing), Mode::Fallback);
    }

    #[test]
    fn test_disqualifying_events() {
        assert!(InputEvent::PointerPress.is_disqualifying());
        assert!(InputEvent::Key(Key::Char('a')).is_disqualifying());
        assert!(InputEvent::Key(Key::Char('7')).is_disqualifying());
        assert!(InputEvent::Key(Key::Escape).is_disqualifying());
        assert!(!InputEvent::Key(Key::Tab).is_disqualifying());
        assert!(!InputEvent::Key(Key::ShiftTab).is_disqualifying());
        assert!(!InputEvent::Key(Key::Other).is_disqualifying());
    }

    #[rstest]
    #[case::space(Key::Space)]
    #[case::enter(Key::Enter)]
    #[case::backspace(Key::Backspace)]
    #[case::delete(Key::Delete)]
    #[case::letter(Key::Char('z'))]
    #[case::escape(Key::Escape)]
    fn test_editing_keys_disqualify(#[case] key: Key) {
        assert!(InputEvent::Key(key).is_disqualifying());
    }
}
