//! The snippet engine: the owned controller for one editor session.
//!
//! `SnippetEngine` owns everything that would otherwise be ambient global
//! state: the snippet repository, usage counts, the tab-stop navigator, the
//! detected host mode, and the settings store. All entry points run to
//! completion on the host's dispatch thread and take `&mut self`.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{DocumentId, HostError, LineCol};
use crate::project::{self, RegistrationRetry, RetryDecision, SettingsStore};
use crate::snippet::{Snippet, SnippetRepository, UsageStats, ValidationError};
use crate::syntax::{expand_template, parse_tab_stops};

use super::completion::{CompletionItem, CompletionRequest, completions, rank_completions};
use super::config::EngineConfig;
use super::host::{EditorHost, HostCapabilities, InputEvent, Mode, detect_mode};
use super::tabstop::{InputOutcome, NavigatorError, Step, TabStopNavigator};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("positioned editing is unavailable in fallback mode")]
    HostUnavailable,
    #[error("completion registration rejected: {0}")]
    Registration(#[source] HostError),
    #[error("snippet insertion failed: {0}")]
    Insertion(#[source] HostError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Navigation(#[from] NavigatorError),
    #[error("unknown snippet `{0}`")]
    UnknownSnippet(SmolStr),
}

/// Request to insert a snippet into a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertRequest {
    pub document: DocumentId,
    pub snippet: SmolStr,
    pub position: LineCol,
}

impl InsertRequest {
    pub fn new(document: DocumentId, snippet: &str, position: LineCol) -> Self {
        Self {
            document,
            snippet: snippet.into(),
            position,
        }
    }
}

/// What happened to tab-stop navigation after an insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStart {
    Started,
    /// The template has no placeholders.
    NoStops,
    /// Fallback mode never navigates.
    Skipped,
    /// The text went in but the session could not start.
    Failed(NavigatorError),
}

/// Result of a successful insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertOutcome {
    pub mode: Mode,
    /// Usage count of the snippet after this insertion.
    pub usage: u32,
    pub session: SessionStart,
}

pub struct SnippetEngine<S: SettingsStore> {
    config: EngineConfig,
    mode: Mode,
    repository: SnippetRepository,
    usage: UsageStats,
    navigator: TabStopNavigator,
    registration: RegistrationRetry,
    store: S,
}

impl<S: SettingsStore> SnippetEngine<S> {
    /// Create an engine, detecting the host mode and loading persisted state.
    ///
    /// Unreadable settings are logged and replaced by empty state.
    pub fn new(store: S, caps: &dyn HostCapabilities, config: EngineConfig) -> Self {
        let mut repository = SnippetRepository::new();
        match project::load_custom_snippets(&store) {
            Ok(custom) => {
                let accepted = repository.extend_custom(custom);
                tracing::debug!(accepted, "custom snippets loaded");
            }
            Err(err) => tracing::warn!(%err, "could not load custom snippets"),
        }
        let usage = project::load_usage(&store).unwrap_or_else(|err| {
            tracing::warn!(%err, "could not load usage stats");
            UsageStats::new()
        });

        Self {
            mode: detect_mode(caps),
            registration: RegistrationRetry::new(config.registration_attempts),
            config,
            repository,
            usage,
            navigator: TabStopNavigator::new(),
            store,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &SnippetRepository {
        &self.repository
    }

    pub fn usage_stats(&self) -> &UsageStats {
        &self.usage
    }

    pub fn navigator(&self) -> &TabStopNavigator {
        &self.navigator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-probe host capabilities. Dropping to fallback ends any session.
    pub fn redetect_mode(&mut self, host: &mut dyn EditorHost, caps: &dyn HostCapabilities) {
        self.mode = detect_mode(caps);
        if self.mode == Mode::Fallback {
            self.navigator.exit(host);
        }
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Completion items for a request.
    pub fn complete(&self, request: &CompletionRequest) -> Vec<CompletionItem> {
        completions(request, &self.repository, &self.usage, &self.config)
    }

    /// Completion items at `position` in a whole document.
    pub fn complete_at(&self, source: &str, position: LineCol) -> Vec<CompletionItem> {
        let request = CompletionRequest::at(source, position, self.config.lookback_chars);
        self.complete(&request)
    }

    /// Ranked snippets for a request, without the comment check or timing.
    pub fn rank(&self, request: &CompletionRequest) -> Vec<&Snippet> {
        rank_completions(request, &self.repository, &self.usage, self.config.max_results)
    }

    /// Try to register the completion callback with the host.
    ///
    /// Returns `RetryLater` while attempts remain; once they run out the last
    /// host error comes back as [`EngineError::Registration`].
    pub fn register_completion<F>(&mut self, register: F) -> Result<RetryDecision, EngineError>
    where
        F: FnOnce() -> Result<(), HostError>,
    {
        match self.registration.attempt(register) {
            RetryDecision::GiveUp => {
                let err = self.registration.last_error().cloned().unwrap_or_else(|| {
                    HostError::new("register_completion", "no registration attempts allowed")
                });
                Err(EngineError::Registration(err))
            }
            decision => Ok(decision),
        }
    }

    pub fn registration(&self) -> &RegistrationRetry {
        &self.registration
    }

    // ------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------

    /// Insert a snippet and, in primary mode, start navigating its stops.
    ///
    /// A failed edit changes nothing: usage is not counted and no session
    /// starts. Once the edit succeeds usage is counted even if the session
    /// then fails to start, since the text is in the document.
    pub fn insert(
        &mut self,
        host: &mut dyn EditorHost,
        request: &InsertRequest,
    ) -> Result<InsertOutcome, EngineError> {
        let template = self
            .repository
            .get(&request.snippet)
            .map(|s| s.template().to_owned())
            .ok_or_else(|| EngineError::UnknownSnippet(request.snippet.clone()))?;
        let body = expand_template::<&str>(&template, &FxHashMap::default());

        let edit = match self.mode {
            Mode::Primary => host.apply_edit(request.document, request.position, &body),
            Mode::Fallback => host.append(request.document, &body),
        };
        if let Err(err) = edit {
            tracing::warn!(%err, snippet = %request.snippet, "snippet insertion failed");
            return Err(EngineError::Insertion(err));
        }

        let usage = self.usage.record(&request.snippet);
        self.persist_usage();

        let session = match self.mode {
            Mode::Fallback => SessionStart::Skipped,
            Mode::Primary => {
                let stops = parse_tab_stops(&template);
                match self
                    .navigator
                    .start_session(host, request.document, request.position, stops)
                {
                    Ok(true) => SessionStart::Started,
                    Ok(false) => SessionStart::NoStops,
                    Err(err) => SessionStart::Failed(err),
                }
            }
        };

        tracing::debug!(snippet = %request.snippet, usage, ?session, "snippet inserted");
        Ok(InsertOutcome {
            mode: self.mode,
            usage,
            session,
        })
    }

    // ------------------------------------------------------------------
    // Tab-stop navigation
    // ------------------------------------------------------------------

    /// Start navigating the placeholders of `template` inserted at `origin`.
    pub fn start_tab_stops(
        &mut self,
        host: &mut dyn EditorHost,
        document: DocumentId,
        origin: LineCol,
        template: &str,
    ) -> Result<bool, EngineError> {
        if self.mode == Mode::Fallback {
            return Err(EngineError::HostUnavailable);
        }
        let stops = parse_tab_stops(template);
        Ok(self.navigator.start_session(host, document, origin, stops)?)
    }

    pub fn next_stop(&mut self, host: &mut dyn EditorHost) -> Result<Step, EngineError> {
        Ok(self.navigator.next(host)?)
    }

    pub fn previous_stop(&mut self, host: &mut dyn EditorHost) -> Result<Step, EngineError> {
        Ok(self.navigator.previous(host)?)
    }

    pub fn exit_tab_stops(&mut self, host: &mut dyn EditorHost) {
        self.navigator.exit(host);
    }

    pub fn handle_input(
        &mut self,
        host: &mut dyn EditorHost,
        event: InputEvent,
    ) -> Result<InputOutcome, EngineError> {
        Ok(self.navigator.handle_input(host, event)?)
    }

    // ------------------------------------------------------------------
    // Custom snippets and usage
    // ------------------------------------------------------------------

    pub fn add_custom_snippet(&mut self, snippet: Snippet) -> Result<(), EngineError> {
        self.repository.add_custom(snippet)?;
        self.persist_custom();
        Ok(())
    }

    pub fn remove_custom_snippet(&mut self, name: &str) -> Result<Snippet, EngineError> {
        let removed = self.repository.remove_custom(name)?;
        self.persist_custom();
        Ok(removed)
    }

    pub fn reset_usage_stats(&mut self) {
        self.usage.reset();
        self.persist_usage();
    }

    /// Tear down: end any session and release its listener.
    pub fn shutdown(&mut self, host: &mut dyn EditorHost) {
        self.navigator.exit(host);
    }

    fn persist_usage(&mut self) {
        if let Err(err) = project::save_usage(&mut self.store, &self.usage) {
            tracing::warn!(%err, "could not save usage stats");
        }
    }

    fn persist_custom(&mut self) {
        if let Err(err) = project::save_custom_snippets(&mut self.store, self.repository.custom()) {
            tracing::warn!(%err, "could not save custom snippets");
        }
    }
}
