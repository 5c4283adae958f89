//! Loading and saving engine state through the host's settings store.
//!
//! Two keys are used, both holding JSON text: the usage-count map and the
//! list of custom snippets. Callers treat every error here as non-fatal.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::base::HostError;
use crate::snippet::{Snippet, UsageStats};

/// Key holding the usage-count map.
pub const USAGE_STATS_KEY: &str = "snipkit.usage_stats";
/// Key holding the custom-snippet list.
pub const CUSTOM_SNIPPETS_KEY: &str = "snipkit.custom_snippets";

/// Opaque key-value persistence provided by the host.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, HostError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), HostError>;
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] HostError),
    #[error("stored value for `{key}` is not valid: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode `{key}`: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Read usage counts. A missing key means no usage yet.
pub fn load_usage(store: &dyn SettingsStore) -> Result<UsageStats, PersistenceError> {
    match store.get(USAGE_STATS_KEY)? {
        None => Ok(UsageStats::new()),
        Some(text) => serde_json::from_str(&text).map_err(|source| PersistenceError::Decode {
            key: USAGE_STATS_KEY,
            source,
        }),
    }
}

pub fn save_usage(store: &mut dyn SettingsStore, usage: &UsageStats) -> Result<(), PersistenceError> {
    let text = serde_json::to_string(usage).map_err(|source| PersistenceError::Encode {
        key: USAGE_STATS_KEY,
        source,
    })?;
    store.set(USAGE_STATS_KEY, text)?;
    Ok(())
}

/// Read stored custom snippets.
///
/// Entries that no longer validate are skipped with a warning so that one
/// bad record does not lose the rest.
pub fn load_custom_snippets(store: &dyn SettingsStore) -> Result<Vec<Snippet>, PersistenceError> {
    let Some(text) = store.get(CUSTOM_SNIPPETS_KEY)? else {
        return Ok(Vec::new());
    };
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&text).map_err(|source| PersistenceError::Decode {
            key: CUSTOM_SNIPPETS_KEY,
            source,
        })?;

    let snippets = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Snippet>(entry) {
            Ok(snippet) => Some(snippet),
            Err(err) => {
                tracing::warn!(%err, "dropping invalid stored snippet");
                None
            }
        })
        .collect();
    Ok(snippets)
}

pub fn save_custom_snippets<'a>(
    store: &mut dyn SettingsStore,
    snippets: impl IntoIterator<Item = &'a Snippet>,
) -> Result<(), PersistenceError> {
    let snippets: Vec<&Snippet> = snippets.into_iter().collect();
    let text = serde_json::to_string(&snippets).map_err(|source| PersistenceError::Encode {
        key: CUSTOM_SNIPPETS_KEY,
        source,
    })?;
    store.set(CUSTOM_SNIPPETS_KEY, text)?;
    Ok(())
}

/// In-memory store for hosts without persistence (and for tests).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, HostError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), HostError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}
