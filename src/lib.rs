//! # snipkit-base
//!
//! Core library for context-aware snippet completion in a Luau script editor.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → Ranking, insertion, tab-stop navigation, the engine controller
//!   ↓
//! project  → Settings persistence, completion registration retry
//!   ↓
//! syntax   → Cursor-context heuristics, template placeholders
//!   ↓
//! snippet  → Validated snippet records and the repository
//!   ↓
//! base     → Primitives (DocumentId, LineCol, HostError)
//! ```

/// Foundation types: DocumentId, LineCol, HostError
pub mod base;

/// Snippet records and repository
pub mod snippet;

/// Text-level analysis: context heuristics and template parsing
pub mod syntax;

/// Host-side collaborators: settings store and registration
pub mod project;

/// IDE features: completion, insertion, tab-stop navigation
pub mod ide;

pub use base::{DocumentId, HostError, LineCol, LineIndex, TextSize};
pub use ide::{CompletionItem, CompletionRequest, EngineConfig, SnippetEngine};
pub use snippet::{Category, Snippet, SnippetRepository, UsageStats};
