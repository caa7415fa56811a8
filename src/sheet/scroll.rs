//! Scroll-triggered expand and collapse.
//!
//! Scrolling the sheet's content near its bottom while at Half expands the
//! sheet; scrolling back to the very top while at Full collapses it. Both
//! decisions are debounced so a single scroll tick cannot flip the sheet, and
//! a firing transition opens a suppression window for the length of the
//! animation so the sheet does not oscillate while it is still moving.

use std::time::Duration;

use crate::options::ScrollOptions;

use super::snap::SnapPoint;

/// Scroll state of the sheet's content container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top of the content.
    pub scroll_top: f64,
    /// Total scrollable height of the content.
    pub scroll_height: f64,
    /// Height of the visible content region.
    pub client_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    target: SnapPoint,
    deadline: Duration,
}

/// Watches content scrolling and requests snap transitions.
#[derive(Debug, Default)]
pub struct ScrollCoordinator {
    last_scroll_top: f64,
    pending: Option<Pending>,
    suppress_until: Option<Duration>,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a scroll event.
    ///
    /// Qualifying events arm (or re-arm) the debounce deadline; events whose
    /// direction or condition no longer holds cancel a pending one.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        snap: SnapPoint,
        now: Duration,
        options: &ScrollOptions,
    ) {
        let delta = metrics.scroll_top - self.last_scroll_top;
        self.last_scroll_top = metrics.scroll_top;

        if self.suppress_until.is_some_and(|until| now < until) {
            return;
        }

        let near_bottom = metrics.scroll_top + metrics.client_height
            >= metrics.scroll_height * options.near_bottom_fraction;
        let at_top = metrics.scroll_top <= options.top_threshold;

        let target = if delta > options.min_delta && near_bottom && snap == SnapPoint::Half {
            Some(SnapPoint::Full)
        } else if delta < -options.min_delta && at_top && snap == SnapPoint::Full {
            Some(SnapPoint::Half)
        } else {
            None
        };

        match target {
            Some(target) => {
                let deadline = now.saturating_add(Duration::from_millis(u64::from(
                    options.debounce_ms,
                )));
                self.pending = Some(Pending { target, deadline });
            }
            None => {
                if let Some(pending) = self.pending {
                    let still_holds = match pending.target {
                        SnapPoint::Full => delta >= 0. && near_bottom && snap == SnapPoint::Half,
                        SnapPoint::Half => delta <= 0. && at_top && snap == SnapPoint::Full,
                        SnapPoint::Closed => false,
                    };
                    if !still_holds {
                        self.pending = None;
                    }
                }
            }
        }
    }

    /// Returns a transition whose debounce deadline has elapsed.
    ///
    /// Firing starts a suppression window for the duration of the resulting
    /// animation.
    pub fn poll(&mut self, now: Duration, animation_duration: Duration) -> Option<SnapPoint> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }

        self.pending = None;
        self.suppress_until = Some(now.saturating_add(animation_duration));
        Some(pending.target)
    }

    /// Cancels any pending transition, e.g. when a drag takes over.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
