//! Validated snippet records.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// Which group a snippet belongs to.
///
/// Built-ins are spread over the first three; everything the user adds is
/// [`Category::Custom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Essential,
    Common,
    Advanced,
    Custom,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Essential => "essential",
            Category::Common => "common",
            Category::Advanced => "advanced",
            Category::Custom => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a snippet is rejected before it reaches the repository.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("snippet name must not be empty")]
    EmptyName,
    #[error("snippet `{0}` needs a description")]
    EmptyDescription(SmolStr),
    #[error("snippet `{0}` needs a template")]
    EmptyTemplate(SmolStr),
    #[error("snippet name `{0}` may only contain letters, digits and underscores")]
    InvalidName(SmolStr),
    #[error("a snippet named `{0}` already exists")]
    Duplicate(SmolStr),
    #[error("built-in snippet `{0}` cannot be removed")]
    BuiltinImmutable(SmolStr),
    #[error("no custom snippet named `{0}`")]
    NotFound(SmolStr),
}

/// A named code template with placeholders.
///
/// Fields are private so that every `Snippet` in existence went through
/// [`Snippet::new`] (or deserialization, which re-validates).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnippet", into = "RawSnippet")]
pub struct Snippet {
    name: SmolStr,
    description: SmolStr,
    template: String,
    category: Category,
    tags: IndexSet<SmolStr>,
}

impl Snippet {
    /// Build a snippet, checking every required field.
    pub fn new<I, T>(
        name: &str,
        description: &str,
        template: &str,
        category: Category,
        tags: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SmolStr>,
    {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_valid_name(name) {
            return Err(ValidationError::InvalidName(name.into()));
        }
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription(name.into()));
        }
        if template.trim().is_empty() {
            return Err(ValidationError::EmptyTemplate(name.into()));
        }

        Ok(Self {
            name: name.into(),
            description: description.trim().into(),
            template: template.to_owned(),
            category,
            tags: tags.into_iter().map(Into::into).collect(),
        })
    }

    /// Build a user-defined snippet (always [`Category::Custom`]).
    pub fn custom<I, T>(
        name: &str,
        description: &str,
        template: &str,
        tags: I,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SmolStr>,
    {
        Self::new(name, description, template, Category::Custom, tags)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(SmolStr::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_custom(&self) -> bool {
        self.category == Category::Custom
    }
}

fn is_valid_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Unchecked wire shape used for persistence.
#[derive(Serialize, Deserialize)]
struct RawSnippet {
    name: SmolStr,
    description: SmolStr,
    template: String,
    category: Category,
    #[serde(default)]
    tags: Vec<SmolStr>,
}

impl TryFrom<RawSnippet> for Snippet {
    type Error = ValidationError;

    fn try_from(raw: RawSnippet) -> Result<Self, Self::Error> {
        Snippet::new(
            &raw.name,
            &raw.description,
            &raw.template,
            raw.category,
            raw.tags,
        )
    }
}

impl From<Snippet> for RawSnippet {
    fn from(snippet: Snippet) -> Self {
        Self {
            name: snippet.name,
            description: snippet.description,
            template: snippet.template,
            category: snippet.category,
            tags: snippet.tags.into_iter().collect(),
        }
    }
}
