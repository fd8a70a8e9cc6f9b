use std::time::{Duration, Instant};

/// Quiet period required before a search is applied.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Caller-side debouncer for keystroke-driven search input.
///
/// The list engine recomputes its filtered set on every `apply_search`, so
/// input handlers feed keystrokes here and only forward the text once the
/// user stopped typing for [`SEARCH_DEBOUNCE`]. Time is injected so callers
/// can drive it from any clock.
///
/// Library-only: the server and CLI receive complete queries and never need
/// it. It is exported for interactive front ends that embed the engine.
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Register new input text, restarting the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// Returns the pending text once the quiet period has elapsed.
    /// Each input is handed out at most once.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.quiet_period => {
                self.pending.take().map(|(text, _)| text)
            }
            _ => None,
        }
    }

    /// Hand out the pending text immediately (e.g. on Enter).
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }

    /// When the pending text becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet_period)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
