//! Shared in-memory editor host for integration tests.

#![allow(dead_code)]

use snipkit::base::{DocumentId, HostError, LineCol, LineIndex};
use snipkit::ide::{EditorHost, HostCapabilities, ListenerHandle, POSITIONED_EDIT_METHOD};
use snipkit::project::SettingsStore;

/// A single-document host that applies edits to real text.
#[derive(Default)]
pub struct MockHost {
    pub text: String,
    pub cursor: Option<LineCol>,
    pub fail_edits: bool,
    pub fail_cursor: bool,
    pub fail_subscribe: bool,
    pub next_listener: u64,
    pub live_listeners: Vec<u64>,
    pub released: Vec<u64>,
    pub edits: usize,
}

impl MockHost {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Self::default()
        }
    }
}

impl EditorHost for MockHost {
    fn apply_edit(&mut self, _: DocumentId, at: LineCol, text: &str) -> Result<(), HostError> {
        if self.fail_edits {
            return Err(HostError::new("apply_edit", "document is read-only"));
        }
        let index = LineIndex::new(&self.text);
        let offset = index
            .offset(at)
            .ok_or_else(|| HostError::new("apply_edit", "position out of range"))?;
        self.text.insert_str(u32::from(offset) as usize, text);
        self.edits += 1;
        Ok(())
    }

    fn append(&mut self, _: DocumentId, text: &str) -> Result<(), HostError> {
        if self.fail_edits {
            return Err(HostError::new("append", "document is read-only"));
        }
        self.text.push_str(text);
        self.edits += 1;
        Ok(())
    }

    fn set_cursor(&mut self, _: DocumentId, at: LineCol) -> Result<(), HostError> {
        if self.fail_cursor {
            return Err(HostError::new("set_cursor", "editor lost focus"));
        }
        self.cursor = Some(at);
        Ok(())
    }

    fn subscribe_input(&mut self) -> Result<ListenerHandle, HostError> {
        if self.fail_subscribe {
            return Err(HostError::new("subscribe_input", "rejected"));
        }
        self.next_listener += 1;
        self.live_listeners.push(self.next_listener);
        Ok(ListenerHandle::new(self.next_listener))
    }

    fn unsubscribe_input(&mut self, handle: ListenerHandle) {
        assert!(
            !self.released.contains(&handle.raw()),
            "listener {} released twice",
            handle.raw()
        );
        self.live_listeners.retain(|&h| h != handle.raw());
        self.released.push(handle.raw());
    }
}

/// Capability probe with fixed answers.
pub struct Caps {
    pub enabled: bool,
    pub positioned_edits: bool,
}

impl Caps {
    pub fn primary() -> Self {
        Self {
            enabled: true,
            positioned_edits: true,
        }
    }

    pub fn fallback() -> Self {
        Self {
            enabled: true,
            positioned_edits: false,
        }
    }
}

impl HostCapabilities for Caps {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn has_method(&self, name: &str) -> bool {
        self.positioned_edits && name == POSITIONED_EDIT_METHOD
    }
}

/// A store whose writes always fail.
#[derive(Default)]
pub struct BrokenStore;

impl SettingsStore for BrokenStore {
    fn get(&self, _: &str) -> Result<Option<String>, HostError> {
        Err(HostError::new("get", "settings unavailable"))
    }

    fn set(&mut self, _: &str, _: String) -> Result<(), HostError> {
        Err(HostError::new("set", "settings unavailable"))
    }
}
