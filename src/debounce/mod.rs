use std::time::{Duration, Instant};

/// Quiet period applied to search input unless configured otherwise.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Coalesces bursts of input into a single delivery.
///
/// Each [`schedule`](Debouncer::schedule) replaces the pending value and
/// restarts the quiet period. [`poll`](Debouncer::poll) hands the value out
/// once the period has elapsed without another schedule. Time is supplied by
/// the caller, so the debouncer owns no timers or threads.
///
/// # Examples
///
/// ```
/// use recipe_browser::Debouncer;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
///
/// debouncer.schedule("cu", start);
/// debouncer.schedule("curry", start + Duration::from_millis(100));
///
/// assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
/// assert_eq!(debouncer.poll(start + Duration::from_millis(400)), Some("curry"));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Debouncer {
            quiet,
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value and restart the quiet period at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if the quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(
            &self.pending,
            Some((_, scheduled)) if now.saturating_duration_since(*scheduled) >= self.quiet
        );
        if due {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|(_, scheduled)| *scheduled + self.quiet)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
