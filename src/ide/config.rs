//! Engine tuning knobs.

use std::time::Duration;

/// Configuration for a [`SnippetEngine`](super::SnippetEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on completion results.
    pub max_results: usize,
    /// Soft time budget for one ranking call. Overruns are logged only.
    pub ranking_budget: Duration,
    /// How many characters before the cursor a request carries.
    pub lookback_chars: usize,
    /// How many times completion registration is retried before giving up.
    pub registration_attempts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: 10,
            ranking_budget: Duration::from_millis(10),
            lookback_chars: 1000,
            registration_attempts: 5,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_ranking_budget(mut self, budget: Duration) -> Self {
        self.ranking_budget = budget;
        self
    }

    pub fn with_lookback(mut self, chars: usize) -> Self {
        self.lookback_chars = chars;
        self
    }

    pub fn with_registration_attempts(mut self, attempts: u32) -> Self {
        self.registration_attempts = attempts;
        self
    }
}
