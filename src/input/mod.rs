//! Input helpers.

pub mod swipe_tracker;

pub use swipe_tracker::SwipeTracker;
