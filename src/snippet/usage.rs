//! Per-snippet usage counters.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Invocation counts keyed by snippet name.
///
/// Counts only grow through [`UsageStats::record`]; the only way down is an
/// explicit [`UsageStats::reset`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageStats {
    counts: FxHashMap<SmolStr, u32>,
}

impl UsageStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `name`, zero if never used.
    pub fn count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Record one use of `name`, returning the new count.
    pub fn record(&mut self, name: &str) -> u32 {
        let count = self.counts.entry(SmolStr::new(name)).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(name, &count)| (name.as_str(), count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl std::ops::Index<&str> for UsageStats {
    type Output = u32;

    fn index(&self, name: &str) -> &u32 {
        self.counts.get(name).unwrap_or(&0)
    }
}
