//! Tab-stop navigation through placeholders after insertion.
//!
//! The navigator is a two-state machine:
//!
//! ```text
//!             start_session(non-empty)
//!  Inactive ───────────────────────────▶ Active(1)
//!     ▲                                     │ next / previous
//!     │  exit, disqualifying input,         ▼
//!     └── next past the last stop, ─── Active(i), 1 ≤ i ≤ N
//!         cursor placement failure
//! ```
//!
//! While active the navigator owns exactly one input-listener subscription.
//! Every path back to `Inactive` goes through [`TabStopNavigator::exit`],
//! which hands the subscription back to the host once.

use thiserror::Error;

use crate::base::{DocumentId, HostError, LineCol};
use crate::syntax::TabStop;

use super::host::{EditorHost, InputEvent, Key, ListenerHandle};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NavigatorError {
    #[error("no tab-stop session is active")]
    NotActive,
    #[error("already at the first tab stop")]
    AtFirstStop,
    #[error("could not listen for tab-stop input: {0}")]
    Registration(#[source] HostError),
    #[error("could not place the cursor at tab stop ${stop}: {source}")]
    CursorPlacement {
        stop: u32,
        #[source]
        source: HostError,
    },
}

/// Result of a successful navigation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Now at the 1-based `index`, with the cursor at `at`.
    Moved { index: usize, at: LineCol },
    /// Stepped past the last stop; the session is over.
    Ended,
}

/// What [`TabStopNavigator::handle_input`] did with an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Ignored,
    Stepped(Step),
    Exited,
}

#[derive(Debug)]
struct Session {
    document: DocumentId,
    origin: LineCol,
    stops: Vec<TabStop>,
    /// 1-based position in `stops`.
    index: usize,
    listener: Option<ListenerHandle>,
}

impl Session {
    fn current(&self) -> Option<(TabStop, LineCol)> {
        let stop = *self.stops.get(self.index.checked_sub(1)?)?;
        Some((stop, stop.absolute(self.origin)))
    }
}

/// Owns the (at most one) active tab-stop session.
#[derive(Debug, Default)]
pub struct TabStopNavigator {
    session: Option<Session>,
}

impl TabStopNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// 1-based index of the current stop, 0 when inactive.
    pub fn current_index(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.index)
    }

    /// Number of stops in the session, 0 when inactive.
    pub fn len(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.stops.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn document(&self) -> Option<DocumentId> {
        self.session.as_ref().map(|s| s.document)
    }

    /// The current stop and its absolute position.
    pub fn current(&self) -> Option<(TabStop, LineCol)> {
        self.session.as_ref().and_then(Session::current)
    }

    /// Begin stepping through `stops`, placed relative to `origin`.
    ///
    /// Any previous session is ended first. An empty list then leaves the
    /// navigator inactive and returns `Ok(false)`.
    pub fn start_session(
        &mut self,
        host: &mut dyn EditorHost,
        document: DocumentId,
        origin: LineCol,
        stops: Vec<TabStop>,
    ) -> Result<bool, NavigatorError> {
        self.exit(host);
        if stops.is_empty() {
            return Ok(false);
        }

        let listener = host.subscribe_input().map_err(NavigatorError::Registration)?;
        tracing::info!(%document, stops = stops.len(), "tab-stop session started");
        self.session = Some(Session {
            document,
            origin,
            stops,
            index: 1,
            listener: Some(listener),
        });

        self.place_current(host)?;
        Ok(true)
    }

    /// Advance to the next stop, ending the session after the last one.
    pub fn next(&mut self, host: &mut dyn EditorHost) -> Result<Step, NavigatorError> {
        let session = self.session.as_mut().ok_or(NavigatorError::NotActive)?;
        if session.index >= session.stops.len() {
            tracing::debug!("last tab stop passed");
            self.exit(host);
            return Ok(Step::Ended);
        }
        session.index += 1;
        self.place_current(host)
    }

    /// Go back one stop. Fails without changing state at the first stop.
    pub fn previous(&mut self, host: &mut dyn EditorHost) -> Result<Step, NavigatorError> {
        let session = self.session.as_mut().ok_or(NavigatorError::NotActive)?;
        if session.index <= 1 {
            return Err(NavigatorError::AtFirstStop);
        }
        session.index -= 1;
        self.place_current(host)
    }

    /// End the session, if any, and release its input listener.
    ///
    /// Safe to call in any state and any number of times.
    pub fn exit(&mut self, host: &mut dyn EditorHost) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(listener) = session.listener.take() {
            host.unsubscribe_input(listener);
        }
        tracing::info!(document = %session.document, "tab-stop session ended");
    }

    /// React to input forwarded by the host.
    ///
    /// Disqualifying events end the session regardless of state; Tab and
    /// Shift+Tab step; everything else is ignored.
    pub fn handle_input(
        &mut self,
        host: &mut dyn EditorHost,
        event: InputEvent,
    ) -> Result<InputOutcome, NavigatorError> {
        if event.is_disqualifying() {
            let was_active = self.is_active();
            self.exit(host);
            return Ok(if was_active {
                InputOutcome::Exited
            } else {
                InputOutcome::Ignored
            });
        }
        if !self.is_active() {
            return Ok(InputOutcome::Ignored);
        }
        match event {
            InputEvent::Key(Key::Tab) => self.next(host).map(InputOutcome::Stepped),
            InputEvent::Key(Key::ShiftTab) => self.previous(host).map(InputOutcome::Stepped),
            _ => Ok(InputOutcome::Ignored),
        }
    }

    fn place_current(&mut self, host: &mut dyn EditorHost) -> Result<Step, NavigatorError> {
        let session = self.session.as_ref().ok_or(NavigatorError::NotActive)?;
        let (stop, at) = session.current().ok_or(NavigatorError::NotActive)?;
        let (document, index) = (session.document, session.index);

        match host.set_cursor(document, at) {
            Ok(()) => {
                tracing::debug!(index, stop = stop.stop, %at, "cursor moved to tab stop");
                Ok(Step::Moved { index, at })
            }
            Err(source) => {
                tracing::warn!(%source, stop = stop.stop, "cursor placement failed");
                self.exit(host);
                Err(NavigatorError::CursorPlacement {
                    stop: stop.stop,
                    source,
                })
            }
        }
    }
}

impl Drop for TabStopNavigator {
    fn drop(&mut self) {
        if self.is_active() {
            tracing::warn!("tab-stop navigator dropped while active; input listener not released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_tab_stops;

    /// Records cursor moves and listener bookkeeping.
    #[derive(Default)]
    struct FakeHost {
        cursor: Option<LineCol>,
        fail_cursor: bool,
        fail_subscribe: bool,
        next_handle: u64,
        live: Vec<u64>,
        released: Vec<u64>,
    }

    impl EditorHost for FakeHost {
        fn apply_edit(&mut self, _: DocumentId, _: LineCol, _: &str) -> Result<(), HostError> {
            Ok(())
        }

        fn append(&mut self, _: DocumentId, _: &str) -> Result<(), HostError> {
            Ok(())
        }

        fn set_cursor(&mut self, _: DocumentId, at: LineCol) -> Result<(), HostError> {
            if self.fail_cursor {
                return Err(HostError::new("set_cursor", "closed"));
            }
            self.cursor = Some(at);
            Ok(())
        }

        fn subscribe_input(&mut self) -> Result<ListenerHandle, HostError> {
            if self.fail_subscribe {
                return Err(HostError::new("subscribe_input", "rejected"));
            }
            self.next_handle += 1;
            self.live.push(self.next_handle);
            Ok(ListenerHandle::new(self.next_handle))
        }

        fn unsubscribe_input(&mut self, handle: ListenerHandle) {
            assert!(!self.released.contains(&handle.raw()), "double release");
            self.live.retain(|&h| h != handle.raw());
            self.released.push(handle.raw());
        }
    }

    const DOC: DocumentId = DocumentId::new(1);

    fn three_stops() -> Vec<TabStop> {
        parse_tab_stops("for $1 = $2, $3 do")
    }

    #[test]
    fn test_empty_session_stays_inactive() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        assert_eq!(nav.start_session(&mut host, DOC, LineCol::new(0, 0), vec![]), Ok(false));
        assert!(!nav.is_active());
        assert_eq!(nav.current_index(), 0);
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_empty_restart_ends_active_session() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        nav.start_session(&mut host, DOC, LineCol::new(0, 0), three_stops()).unwrap();

        assert_eq!(nav.start_session(&mut host, DOC, LineCol::new(3, 0), vec![]), Ok(false));
        assert!(!nav.is_active());
        assert!(host.live.is_empty());
        assert_eq!(host.released, vec![1]);
    }

    #[test]
    fn test_next_walks_then_ends() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        assert_eq!(nav.start_session(&mut host, DOC, LineCol::new(2, 4), three_stops()), Ok(true));
        assert_eq!(nav.current_index(), 1);
        assert_eq!(host.cursor, Some(LineCol::new(2, 10)));

        assert!(matches!(nav.next(&mut host), Ok(Step::Moved { index: 2, .. })));
        assert!(matches!(nav.next(&mut host), Ok(Step::Moved { index: 3, .. })));
        assert_eq!(nav.current_index(), 3);

        assert_eq!(nav.next(&mut host), Ok(Step::Ended));
        assert!(!nav.is_active());
        assert!(host.live.is_empty());
        assert_eq!(host.released, vec![1]);
    }

    #[test]
    fn test_previous_bounds() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        nav.start_session(&mut host, DOC, LineCol::new(0, 0), three_stops()).unwrap();

        assert_eq!(nav.previous(&mut host), Err(NavigatorError::AtFirstStop));
        assert_eq!(nav.current_index(), 1);

        nav.next(&mut host).unwrap();
        assert!(matches!(nav.previous(&mut host), Ok(Step::Moved { index: 1, .. })));
        nav.exit(&mut host);
    }

    #[test]
    fn test_not_active_errors() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        assert_eq!(nav.next(&mut host), Err(NavigatorError::NotActive));
        assert_eq!(nav.previous(&mut host), Err(NavigatorError::NotActive));
    }

    #[test]
    fn test_exit_is_idempotent() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        nav.start_session(&mut host, DOC, LineCol::new(0, 0), three_stops()).unwrap();
        nav.exit(&mut host);
        nav.exit(&mut host);
        assert!(!nav.is_active());
        assert_eq!(host.released, vec![1]);
    }

    #[test]
    fn test_restart_releases_previous_listener() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        nav.start_session(&mut host, DOC, LineCol::new(0, 0), three_stops()).unwrap();
        nav.start_session(&mut host, DOC, LineCol::new(5, 0), three_stops()).unwrap();
        assert_eq!(host.live, vec![2]);
        assert_eq!(host.released, vec![1]);
        nav.exit(&mut host);
    }

    #[test]
    fn test_cursor_failure_forces_inactive() {
        let mut host = FakeHost { fail_cursor: true, ..FakeHost::default() };
        let mut nav = TabStopNavigator::new();
        let err = nav
            .start_session(&mut host, DOC, LineCol::new(0, 0), three_stops())
            .unwrap_err();
        assert!(matches!(err, NavigatorError::CursorPlacement { stop: 1, .. }));
        assert!(!nav.is_active());
        assert!(host.live.is_empty());
    }

    #[test]
    fn test_subscribe_failure_never_activates() {
        let mut host = FakeHost { fail_subscribe: true, ..FakeHost::default() };
        let mut nav = TabStopNavigator::new();
        let err = nav
            .start_session(&mut host, DOC, LineCol::new(0, 0), three_stops())
            .unwrap_err();
        assert!(matches!(err, NavigatorError::Registration(_)));
        assert!(!nav.is_active());
    }

    #[test]
    fn test_input_events() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        nav.start_session(&mut host, DOC, LineCol::new(0, 0), three_stops()).unwrap();

        assert_eq!(
            nav.handle_input(&mut host, InputEvent::Key(Key::Other)),
            Ok(InputOutcome::Ignored)
        );
        assert!(matches!(
            nav.handle_input(&mut host, InputEvent::Key(Key::Tab)),
            Ok(InputOutcome::Stepped(Step::Moved { index: 2, .. }))
        ));
        assert!(matches!(
            nav.handle_input(&mut host, InputEvent::Key(Key::ShiftTab)),
            Ok(InputOutcome::Stepped(Step::Moved { index: 1, .. }))
        ));
        assert_eq!(
            nav.handle_input(&mut host, InputEvent::Key(Key::Char('x'))),
            Ok(InputOutcome::Exited)
        );
        assert!(!nav.is_active());
        assert_eq!(
            nav.handle_input(&mut host, InputEvent::PointerPress),
            Ok(InputOutcome::Ignored)
        );
        assert_eq!(host.released, vec![1]);
    }

    #[test]
    fn test_enter_exits_active_session() {
        let mut host = FakeHost::default();
        let mut nav = TabStopNavigator::new();
        nav.start_session(&mut host, DOC, LineCol::new(0, 0), three_stops()).unwrap();

        assert_eq!(
            nav.handle_input(&mut host, InputEvent::Key(Key::Enter)),
            Ok(InputOutcome::Exited)
        );
        assert!(!nav.is_active());
        assert!(host.live.is_empty());
        assert_eq!(host.released, vec![1]);
    }
}
