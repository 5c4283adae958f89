//! IDE features: ranking, insertion, and tab-stop navigation.
//!
//! This module is the boundary between the text-level analysis in
//! [`crate::syntax`] and the editor host.
//!
//! ## Design Principles
//!
//! 1. **Pure ranking**: completion takes data in and returns data out
//! 2. **Host behind traits**: every host call goes through [`EditorHost`]
//!    and returns a `Result`
//! 3. **Owned state**: usage counts and the active session live in a
//!    [`SnippetEngine`], never in statics
//!
//! ## Usage
//!
//! ```ignore
//! use snipkit::ide::{EngineConfig, InsertRequest, SnippetEngine};
//! use snipkit::project::MemoryStore;
//!
//! let mut engine = SnippetEngine::new(MemoryStore::new(), &caps, EngineConfig::default());
//! let items = engine.complete_at(source, cursor);
//! engine.insert(&mut host, &InsertRequest::new(doc, &items[0].label, cursor))?;
//! ```

mod completion;
mod config;
mod engine;
mod host;
mod ranking;
mod tabstop;

pub use completion::{
    CompletionItem, CompletionKind, CompletionRequest, completions, rank_completions,
};
pub use config::EngineConfig;
pub use engine::{EngineError, InsertOutcome, InsertRequest, SessionStart, SnippetEngine};
pub use host::{
    EditorHost, HostCapabilities, InputEvent, Key, ListenerHandle, Mode, POSITIONED_EDIT_METHOD,
    detect_mode,
};
pub use ranking::{
    MAX_CONTEXT_SCORE, ScoredSnippet, initials, prefix_score, rank_snippets, score_context_match,
    total_score,
};
pub use tabstop::{InputOutcome, NavigatorError, Step, TabStopNavigator};
