//! Drag gesture state.

use std::time::Duration;

use crate::input::SwipeTracker;
use crate::options::Gestures;

/// What the host should do after feeding a move event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DragMotion {
    /// The sheet offset changed and needs a redraw.
    pub moved: bool,
    /// The gesture has claimed the touch; suppress native scrolling.
    pub claim_scroll: bool,
}

/// State of one touch interaction, from touch-start to touch-end.
///
/// Created when a touch claims the sheet and dropped when the touch ends or
/// another touch-start replaces it, so the drag origin cannot outlive its
/// interaction.
#[derive(Debug)]
pub struct DragGesture {
    start_y: f64,
    last_y: f64,
    last_timestamp: Duration,
    /// Sheet offset at the moment the gesture began.
    start_offset: f64,
    current_offset: f64,
    tracker: SwipeTracker,
    scroll_claimed: bool,
}

impl DragGesture {
    pub fn new(y: f64, offset: f64, timestamp: Duration) -> Self {
        // Anchor the velocity window at the moment the touch landed, so a
        // single fast move before release still has a measurable time span.
        let mut tracker = SwipeTracker::new();
        tracker.push(0., timestamp);

        Self {
            start_y: y,
            last_y: y,
            last_timestamp: timestamp,
            start_offset: offset,
            current_offset: offset,
            tracker,
            scroll_claimed: false,
        }
    }

    /// Feeds a move event and applies the new offset 1:1.
    pub fn motion(
        &mut self,
        y: f64,
        timestamp: Duration,
        viewport_height: f64,
        gestures: &Gestures,
    ) -> DragMotion {
        // Velocity bookkeeping happens even for sub-threshold movement.
        self.tracker.push(y - self.last_y, timestamp);
        self.last_y = y;
        self.last_timestamp = timestamp;

        let delta = y - self.start_y;
        if delta.abs() < gestures.noise_floor {
            return DragMotion {
                moved: false,
                claim_scroll: self.scroll_claimed,
            };
        }

        if delta.abs() > gestures.scroll_claim_threshold {
            self.scroll_claimed = true;
        }

        let new_offset = (self.start_offset + delta).clamp(0., viewport_height.max(0.));
        let moved = new_offset != self.current_offset;
        self.current_offset = new_offset;

        DragMotion {
            moved,
            claim_scroll: self.scroll_claimed,
        }
    }

    /// Finalizes the gesture and returns the release velocity in px/ms.
    pub fn release_velocity(&mut self, timestamp: Duration) -> f64 {
        // Account for idle time between the last move and the release.
        self.tracker.push(0., timestamp);
        self.tracker.velocity()
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    /// Clamps the offset into a resized viewport.
    pub fn clamp_to(&mut self, viewport_height: f64) {
        self.current_offset = self.current_offset.clamp(0., viewport_height.max(0.));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn gestures() -> Gestures {
        Gestures::default()
    }

    #[test]
    fn tracks_the_finger_one_to_one() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        let motion = gesture.motion(150., ms(16), 800., &gestures());
        assert!(motion.moved);
        assert_eq!(gesture.current_offset(), 290.);

        let motion = gesture.motion(80., ms(32), 800., &gestures());
        assert!(motion.moved);
        assert_eq!(gesture.current_offset(), 220.);
    }

    #[test]
    fn noise_floor_does_not_move_the_sheet() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        let motion = gesture.motion(103., ms(16), 800., &gestures());
        assert!(!motion.moved);
        assert!(!motion.claim_scroll);
        assert_eq!(gesture.current_offset(), 240.);
    }

    #[test]
    fn noise_floor_still_feeds_velocity() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        for i in 1..=4u32 {
            // 1 px every 10 ms, never past the 5 px floor.
            gesture.motion(100. + f64::from(i), ms(u64::from(i) * 10), 800., &gestures());
        }
        assert_eq!(gesture.current_offset(), 240.);
        assert!(gesture.release_velocity(ms(50)) > 0.);
    }

    #[test]
    fn native_scroll_claimed_past_threshold() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        let motion = gesture.motion(108., ms(16), 800., &gestures());
        assert!(motion.moved);
        assert!(!motion.claim_scroll);

        let motion = gesture.motion(120., ms(32), 800., &gestures());
        assert!(motion.claim_scroll);

        // The claim is sticky even if the finger moves back.
        let motion = gesture.motion(108., ms(48), 800., &gestures());
        assert!(motion.claim_scroll);
    }

    #[test]
    fn offset_is_clamped_to_the_viewport() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        gesture.motion(-2000., ms(16), 800., &gestures());
        assert_eq!(gesture.current_offset(), 0.);

        gesture.motion(5000., ms(32), 800., &gestures());
        assert_eq!(gesture.current_offset(), 800.);
    }

    #[test]
    fn pause_before_release_kills_momentum() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        gesture.motion(300., ms(50), 800., &gestures());
        // Held still for 400 ms before lifting.
        assert_eq!(gesture.release_velocity(ms(450)), 0.);
    }

    #[test]
    fn clamp_to_smaller_viewport() {
        let mut gesture = DragGesture::new(100., 240., ms(0));
        gesture.motion(600., ms(16), 800., &gestures());
        assert_eq!(gesture.current_offset(), 740.);
        gesture.clamp_to(600.);
        assert_eq!(gesture.current_offset(), 600.);
    }
}
