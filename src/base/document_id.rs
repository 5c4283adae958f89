//! Document identifiers handed out by the editor host.

use std::fmt;

/// An opaque handle for an open script document.
///
/// The host owns the real document object; the core only ever stores this
/// handle (for instance inside an active tab-stop session) and passes it back
/// through [`EditorHost`](crate::ide::EditorHost) calls.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DocumentId(pub u32);

impl DocumentId {
    /// Create a new DocumentId from a raw host handle.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw handle.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}

impl From<u32> for DocumentId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_display() {
        assert_eq!(DocumentId::new(7).to_string(), "doc#7");
        assert_eq!(format!("{:?}", DocumentId::from(3)), "DocumentId(3)");
    }

    #[test]
    fn test_document_id_equality() {
        assert_eq!(DocumentId::new(1), DocumentId::from(1));
        assert_ne!(DocumentId::new(1), DocumentId::new(2));
    }
}
