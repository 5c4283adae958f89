//! Snippet storage with stable enumeration order.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::builtins::builtin_snippets;
use super::record::{Snippet, ValidationError};

/// Holds built-in and user-defined snippets.
///
/// Enumeration order is insertion order: built-ins first, in library order,
/// then custom snippets in the order they were added. Ranking relies on this
/// order being stable.
#[derive(Clone, Debug, Default)]
pub struct SnippetRepository {
    snippets: IndexMap<SmolStr, Snippet>,
}

impl SnippetRepository {
    /// Create a repository seeded with the built-in library.
    pub fn new() -> Self {
        Self::from_snippets(builtin_snippets())
    }

    /// Create a repository from an explicit list. Later duplicates are dropped.
    pub fn from_snippets(snippets: impl IntoIterator<Item = Snippet>) -> Self {
        let mut map = IndexMap::new();
        for snippet in snippets {
            let name = SmolStr::new(snippet.name());
            if map.contains_key(&name) {
                tracing::warn!(name = %name, "duplicate snippet ignored");
                continue;
            }
            map.insert(name, snippet);
        }
        Self { snippets: map }
    }

    /// Add a user-defined snippet.
    ///
    /// The repository is left untouched when the snippet is rejected.
    pub fn add_custom(&mut self, snippet: Snippet) -> Result<(), ValidationError> {
        if !snippet.is_custom() {
            return Err(ValidationError::BuiltinImmutable(snippet.name().into()));
        }
        if self.snippets.contains_key(snippet.name()) {
            return Err(ValidationError::Duplicate(snippet.name().into()));
        }
        self.snippets.insert(SmolStr::new(snippet.name()), snippet);
        Ok(())
    }

    /// Remove a custom snippet by name. Built-ins cannot be removed.
    pub fn remove_custom(&mut self, name: &str) -> Result<Snippet, ValidationError> {
        match self.snippets.get(name) {
            None => Err(ValidationError::NotFound(name.into())),
            Some(s) if !s.is_custom() => Err(ValidationError::BuiltinImmutable(name.into())),
            Some(_) => self
                .snippets
                .shift_remove(name)
                .ok_or_else(|| ValidationError::NotFound(name.into())),
        }
    }

    /// Add previously persisted custom snippets, skipping any that collide.
    ///
    /// Returns the number of snippets accepted.
    pub fn extend_custom(&mut self, snippets: impl IntoIterator<Item = Snippet>) -> usize {
        let mut accepted = 0;
        for snippet in snippets {
            match self.add_custom(snippet) {
                Ok(()) => accepted += 1,
                Err(err) => tracing::warn!(%err, "stored custom snippet rejected"),
            }
        }
        accepted
    }

    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.snippets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snippets.contains_key(name)
    }

    /// Iterate over all snippets in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &Snippet> + '_ {
        self.snippets.values()
    }

    /// Iterate over custom snippets only, in the order they were added.
    pub fn custom(&self) -> impl Iterator<Item = &Snippet> + '_ {
        self.iter().filter(|s| s.is_custom())
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
