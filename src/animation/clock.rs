//! Shared clock for driving animations and debounce deadlines.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Clock that animations and timers sample their current time from.
///
/// The clock is driven by the host: set the time once per frame or event
/// batch, before dispatching input to the sheet. Clones share the same
/// underlying time, so a single clock can be handed to every animation.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<Cell<Duration>>,
}

impl Clock {
    /// Creates a clock at the given time.
    pub fn with_time(time: Duration) -> Self {
        Self {
            inner: Rc::new(Cell::new(time)),
        }
    }

    /// Returns the current time.
    pub fn now(&self) -> Duration {
        self.inner.get()
    }

    /// Sets the current time.
    ///
    /// Time is expected to be monotonic; setting it backwards will make
    /// in-flight animations sample their starting value again.
    pub fn set_time(&mut self, time: Duration) {
        self.inner.set(time);
    }

    /// Advances the current time by the given amount.
    pub fn advance(&mut self, by: Duration) {
        self.inner.set(self.inner.get().saturating_add(by));
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_time() {
        let mut clock = Clock::with_time(Duration::ZERO);
        let clone = clock.clone();
        clock.set_time(Duration::from_millis(250));
        assert_eq!(clone.now(), Duration::from_millis(250));
        assert_eq!(clock, clone);
    }

    #[test]
    fn advance_accumulates() {
        let mut clock = Clock::with_time(Duration::from_millis(100));
        clock.advance(Duration::from_millis(50));
        clock.advance(Duration::from_millis(50));
        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn separate_clocks_are_not_equal() {
        let a = Clock::with_time(Duration::ZERO);
        let b = Clock::with_time(Duration::ZERO);
        assert_ne!(a, b);
    }
}
