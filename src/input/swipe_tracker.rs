//! Movement tracking for computing release velocity.

use std::collections::VecDeque;
use std::time::Duration;

/// Only samples within this window before the last event count toward the
/// velocity. A pause longer than this before release means no momentum.
const HISTORY_LIMIT: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
struct Sample {
    delta: f64,
    timestamp: Duration,
}

/// Accumulates movement deltas and estimates the current velocity.
///
/// Push a delta for every movement event, and push a zero delta at release
/// time so that idle time between the last movement and the release decays
/// the velocity estimate.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    history: VecDeque<Sample>,
    pos: f64,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a movement sample.
    ///
    /// Out-of-order timestamps are dropped from velocity bookkeeping but
    /// still count toward the accumulated position.
    pub fn push(&mut self, delta: f64, timestamp: Duration) {
        self.pos += delta;

        if let Some(last) = self.history.back() {
            if timestamp < last.timestamp {
                return;
            }
        }

        self.history.push_back(Sample { delta, timestamp });

        let cutoff = timestamp.saturating_sub(HISTORY_LIMIT);
        while let Some(first) = self.history.front() {
            if first.timestamp >= cutoff {
                break;
            }
            self.history.pop_front();
        }
    }

    /// Returns the total accumulated delta.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Returns the velocity in px/ms over the trailing sample window.
    pub fn velocity(&self) -> f64 {
        let (Some(first), Some(last)) = (self.history.front(), self.history.back()) else {
            return 0.;
        };

        let span = last.timestamp.saturating_sub(first.timestamp);
        if span.is_zero() {
            return 0.;
        }

        // The first sample's delta happened before the window started.
        let total: f64 = self.history.iter().skip(1).map(|s| s.delta).sum();
        total / (span.as_secs_f64() * 1000.)
    }
}
