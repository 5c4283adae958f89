//! Snippet records and the repository that holds them.
//!
//! - [`Snippet`] - a validated record; malformed input never gets this far
//! - [`SnippetRepository`] - built-ins plus user-defined entries, in stable order
//! - [`names`] - canonical built-in names the ranking engine keys on
//! - [`UsageStats`] - per-snippet invocation counts used as a ranking signal

mod builtins;
mod record;
mod repository;
mod usage;

pub use builtins::{builtin_snippets, names};
pub use record::{Category, Snippet, ValidationError};
pub use repository::SnippetRepository;
pub use usage::UsageStats;
