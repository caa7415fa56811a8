//! The bottom sheet component.
//!
//! [`Sheet`] owns the whole state machine: mount/unmount, the live offset
//! (static, animating, or dragged), the logical snap point, the scroll
//! coordinator, and the page scroll lock. Hosts drive it with timestamped
//! input events plus one [`Sheet::advance_animations`] call per frame, and
//! render from the query methods.
//!
//! The sheet is a controlled component: the owner opens and closes it
//! explicitly, and internal decisions that change the open state (the user
//! dragged it shut, tapped the backdrop) surface as
//! [`Event::OpenChanged`] once the closing animation has fully played out.

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::animation::{Animation, Clock};
use crate::options::Options;

mod gesture;
mod offset;
mod scroll;
mod snap;


pub use gesture::{DragGesture, DragMotion};
pub use offset::SheetOffset;
pub use scroll::{ScrollCoordinator, ScrollMetrics};
pub use snap::{resolve, visible_percent, SnapPoint, SnapPoints};

/// Internal decisions the owner must reflect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The sheet decided to open or close itself.
    OpenChanged(bool),
    /// The sheet settled toward a different snap point.
    SnapChanged(SnapPoint),
}

/// Lock on the host page's scrolling while the sheet is up.
///
/// Acquire and release are idempotent: every close path releases the lock,
/// and releasing twice is harmless.
#[derive(Debug, Default)]
struct ScrollLock {
    held: bool,
}

impl ScrollLock {
    fn acquire(&mut self) {
        self.held = true;
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn is_held(&self) -> bool {
        self.held
    }
}

/// State that exists only while the sheet is mounted.
#[derive(Debug)]
struct OpenSheet {
    /// Current logical snap point. Closed means the closing animation is in
    /// flight and the sheet unmounts when it completes.
    snap: SnapPoint,
    offset: SheetOffset,
    viewport_height: f64,
    snap_points: SnapPoints,
    scroll: ScrollCoordinator,
}

/// A draggable bottom sheet with Half, Full, and Closed snap points.
#[derive(Debug)]
pub struct Sheet {
    clock: Clock,
    options: Rc<Options>,
    state: Option<OpenSheet>,
    scroll_lock: ScrollLock,
    events: VecDeque<Event>,
}

impl Sheet {
    pub fn new(clock: Clock) -> Self {
        Self::with_options(clock, Options::default())
    }

    pub fn with_options(clock: Clock, options: Options) -> Self {
        Self {
            clock,
            options: Rc::new(options),
            state: None,
            scroll_lock: ScrollLock::default(),
            events: VecDeque::new(),
        }
    }

    /// Mounts the sheet and animates it from off-screen to the Half snap
    /// point. No-op if already open.
    pub fn open(&mut self, viewport_height: f64) {
        if self.state.is_some() || viewport_height <= 0. {
            return;
        }

        let snap_points =
            SnapPoints::compute(viewport_height, self.options.half_visible_fraction);
        let offset = SheetOffset::Animation(Animation::new(
            self.clock.clone(),
            snap_points.closed,
            snap_points.half,
            self.options.animations.smooth,
        ));

        debug!(viewport_height, "opening sheet");
        self.state = Some(OpenSheet {
            snap: SnapPoint::Half,
            offset,
            viewport_height,
            snap_points,
            scroll: ScrollCoordinator::new(),
        });
        self.scroll_lock.acquire();
    }

    /// Starts the closing animation. Used by the close affordance and
    /// backdrop taps; idempotent.
    pub fn request_close(&mut self) {
        let Some(sheet) = &mut self.state else {
            return;
        };
        if sheet.snap == SnapPoint::Closed {
            return;
        }

        debug!("closing sheet");
        sheet.scroll.cancel();
        sheet.snap = SnapPoint::Closed;
        sheet.offset = SheetOffset::Animation(Animation::new(
            self.clock.clone(),
            sheet.offset.current(),
            sheet.snap_points.closed,
            self.options.animations.snap,
        ));
    }

    /// Tap on the drag handle: toggles between Half and Full.
    pub fn toggle_snap(&mut self) {
        let Some(sheet) = &mut self.state else {
            return;
        };
        if sheet.offset.is_gesture() {
            return;
        }

        let target = match sheet.snap {
            SnapPoint::Half => SnapPoint::Full,
            SnapPoint::Full => SnapPoint::Half,
            SnapPoint::Closed => return,
        };

        sheet.snap = target;
        sheet.offset = SheetOffset::Animation(Animation::new(
            self.clock.clone(),
            sheet.offset.current(),
            sheet.snap_points.offset_of(target),
            self.options.animations.snap,
        ));
        self.events.push_back(Event::SnapChanged(target));
    }

    /// Tries to start a drag gesture.
    ///
    /// A touch claims the sheet when it lands on the drag handle, or within
    /// the top drag zone of the sheet while the content is scrolled to its
    /// top. Returns whether the gesture was claimed; on `false` the host
    /// should let native scrolling proceed.
    ///
    /// A new touch-start while already dragging replaces the drag origin.
    pub fn drag_begin(
        &mut self,
        y: f64,
        timestamp: Duration,
        on_handle: bool,
        content_scroll_top: f64,
    ) -> bool {
        let Some(sheet) = &mut self.state else {
            return false;
        };

        if !on_handle {
            if content_scroll_top > 0. {
                return false;
            }
            if y - sheet.offset.current() > self.options.gestures.drag_zone_height {
                return false;
            }
        }

        trace!(y, "drag begin");
        sheet.scroll.cancel();
        // Replaces any in-flight animation at its current value, so manual
        // movement is not fighting a transition.
        let offset = sheet.offset.current();
        sheet.offset = SheetOffset::Gesture(DragGesture::new(y, offset, timestamp));
        true
    }

    /// Feeds a touch move event. Ignored when no drag is active.
    pub fn drag_motion(&mut self, y: f64, timestamp: Duration) -> DragMotion {
        let Some(sheet) = &mut self.state else {
            return DragMotion::default();
        };
        let SheetOffset::Gesture(gesture) = &mut sheet.offset else {
            return DragMotion::default();
        };

        gesture.motion(y, timestamp, sheet.viewport_height, &self.options.gestures)
    }

    /// Ends the drag: resolves a snap point from the release position and
    /// velocity and animates toward it. Ignored when no drag is active.
    pub fn drag_end(&mut self, timestamp: Duration) {
        let Some(sheet) = &mut self.state else {
            return;
        };
        let SheetOffset::Gesture(gesture) = &mut sheet.offset else {
            return;
        };

        let velocity = gesture.release_velocity(timestamp);
        let offset = gesture.current_offset();
        let percent = visible_percent(offset, sheet.viewport_height);
        let target = resolve(percent, velocity, sheet.snap, &self.options.snap_rules);
        debug!(percent, velocity, ?target, "drag end");

        let changed = target != sheet.snap;
        sheet.snap = target;
        sheet.offset = SheetOffset::Animation(Animation::new(
            self.clock.clone(),
            offset,
            sheet.snap_points.offset_of(target),
            self.options.animations.snap,
        ));

        if changed && target != SnapPoint::Closed {
            self.events.push_back(Event::SnapChanged(target));
        }
    }

    /// Feeds a scroll event from the content container.
    ///
    /// Ignored while a drag is active or the sheet is closing: gesture input
    /// always takes precedence over scroll-triggered transitions.
    pub fn content_scrolled(&mut self, metrics: ScrollMetrics, timestamp: Duration) {
        let Some(sheet) = &mut self.state else {
            return;
        };
        if sheet.offset.is_gesture() || sheet.snap == SnapPoint::Closed {
            return;
        }

        sheet
            .scroll
            .on_scroll(metrics, sheet.snap, timestamp, &self.options.scroll);
    }

    /// Reprojects the current snap point onto a new viewport height.
    ///
    /// This does not re-run the snap resolver; the logical snap decision
    /// stays, only its pixel coordinates change.
    pub fn update_viewport_height(&mut self, viewport_height: f64) {
        let Some(sheet) = &mut self.state else {
            return;
        };
        if viewport_height <= 0. {
            return;
        }

        sheet.viewport_height = viewport_height;
        sheet.snap_points =
            SnapPoints::compute(viewport_height, self.options.half_visible_fraction);
        let target = sheet.snap_points.offset_of(sheet.snap);

        match &mut sheet.offset {
            SheetOffset::Static(offset) => *offset = target,
            SheetOffset::Animation(anim) => {
                let current = anim.value().clamp(0., viewport_height);
                *anim = Animation::new(
                    self.clock.clone(),
                    current,
                    target,
                    self.options.animations.snap,
                );
            }
            SheetOffset::Gesture(gesture) => gesture.clamp_to(viewport_height),
        }
    }

    /// Advances the state machine to the clock's current time.
    ///
    /// Fires elapsed scroll-debounce decisions, finalizes completed
    /// animations, and unmounts the sheet once the closing transition has
    /// played out in full.
    pub fn advance_animations(&mut self) {
        let now = self.clock.now();
        let Some(sheet) = &mut self.state else {
            return;
        };

        if !sheet.offset.is_gesture() && sheet.snap != SnapPoint::Closed {
            let smooth = Duration::from_millis(u64::from(
                self.options.animations.smooth.duration_ms,
            ));
            if let Some(target) = sheet.scroll.poll(now, smooth) {
                if target != sheet.snap {
                    trace!(?target, "scroll-triggered snap");
                    sheet.snap = target;
                    sheet.offset = SheetOffset::Animation(Animation::new(
                        self.clock.clone(),
                        sheet.offset.current(),
                        sheet.snap_points.offset_of(target),
                        self.options.animations.smooth,
                    ));
                    self.events.push_back(Event::SnapChanged(target));
                }
            }
        }

        if let SheetOffset::Animation(anim) = &sheet.offset {
            if anim.is_done() {
                let resting = anim.to();
                if sheet.snap == SnapPoint::Closed {
                    debug!("sheet closed");
                    self.state = None;
                    self.scroll_lock.release();
                    self.events.push_back(Event::OpenChanged(false));
                } else {
                    sheet.offset = SheetOffset::Static(resting);
                }
            }
        }
    }

    /// Pops the next internal decision, if any.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|sheet| sheet.offset.is_gesture())
    }

    /// Current logical snap point, if mounted.
    pub fn snap(&self) -> Option<SnapPoint> {
        self.state.as_ref().map(|sheet| sheet.snap)
    }

    /// Current offset of the sheet's top edge, if mounted.
    pub fn current_offset(&self) -> Option<f64> {
        self.state.as_ref().map(|sheet| sheet.offset.current())
    }

    /// Offset the sheet is heading toward, if mounted.
    pub fn target_offset(&self) -> Option<f64> {
        self.state.as_ref().map(|sheet| sheet.offset.target())
    }

    /// Whether a snap transition is currently in flight.
    pub fn is_animating(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|sheet| sheet.offset.is_animation_ongoing())
    }

    /// Visible share of the viewport in percent; 0 when unmounted.
    pub fn visible_percent(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(0., |sheet| {
                visible_percent(sheet.offset.current(), sheet.viewport_height)
            })
    }

    /// Backdrop opacity matching the sheet's visibility.
    pub fn backdrop_opacity(&self) -> f64 {
        (self.visible_percent() / 100.).min(self.options.backdrop_max_opacity)
    }

    /// Whether the host page's scrolling should be suppressed.
    pub fn page_scroll_locked(&self) -> bool {
        self.scroll_lock.is_held()
    }

    pub fn options(&self) -> &Options {
        self.options.as_ref()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}
