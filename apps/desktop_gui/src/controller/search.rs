//! Debounced search. One timer per controller: every keystroke records the
//! current query and restarts the quiet window, so a new keystroke always
//! supersedes, never queues behind, the pending evaluation.

use std::time::{Duration, Instant};

pub const SEARCH_QUIET_WINDOW: Duration = Duration::from_millis(300);

struct Pending {
    query: String,
    deadline: Instant,
}

pub struct SearchDebouncer {
    quiet_window: Duration,
    pending: Option<Pending>,
}

impl SearchDebouncer {
    pub fn new(quiet_window: Duration) -> Self {
        Self {
            quiet_window,
            pending: None,
        }
    }

    pub fn note_keystroke(&mut self, query: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            query: query.into(),
            deadline: now + self.quiet_window,
        });
    }

    /// Fire the pending evaluation if the quiet window has elapsed. At most
    /// one evaluation per burst, carrying the query captured at the last
    /// keystroke.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        self.pending.take().map(|pending| pending.query)
    }

    /// Deadline of the pending evaluation, if any. The UI uses this to
    /// schedule a repaint instead of polling every frame.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_QUIET_WINDOW)
    }
}
