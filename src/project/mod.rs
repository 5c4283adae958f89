//! Host-side collaborators: persisted settings and callback registration.

mod registration;
mod settings;

pub use registration::{RegistrationRetry, RetryDecision};
pub use settings::{
    CUSTOM_SNIPPETS_KEY, MemoryStore, PersistenceError, SettingsStore, USAGE_STATS_KEY,
    load_custom_snippets, load_usage, save_custom_snippets, save_usage,
};
