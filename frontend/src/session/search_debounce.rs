//! Deadline-based debounce for the free-text search box.

use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct SearchDebounce {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Records a keystroke; each one pushes the deadline out again.
    pub fn record(&mut self, term: String, now: Instant) {
        self.pending = Some((term, now + self.delay));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// The pending term once its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(term, _)| term),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_term_fires_after_the_quiet_period() {
        let mut debounce = SearchDebounce::default();
        let start = Instant::now();
        debounce.record("pi".to_string(), start);
        debounce.record("pika".to_string(), start + Duration::from_millis(200));

        assert_eq!(debounce.take_due(start + Duration::from_millis(400)), None);
        assert_eq!(debounce.deadline(), Some(start + Duration::from_millis(500)));
        assert_eq!(debounce.take_due(start + Duration::from_millis(500)).as_deref(), Some("pika"));
        assert_eq!(debounce.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_term() {
        let mut debounce = SearchDebounce::new(Duration::from_millis(50));
        let now = Instant::now();
        debounce.record("x".to_string(), now);
        debounce.cancel();
        assert_eq!(debounce.take_due(now + Duration::from_secs(1)), None);
    }
}
