//! Draggable bottom sheet state machine.
//!
//! This crate implements the logic of a mobile-style bottom sheet with three
//! snap points: half open (the default), fully open, and closed. The sheet
//! tracks the finger 1:1 during a drag, then resolves a resting snap point
//! from the release position and velocity, and animates toward it with a
//! time-based easing curve. Independently of dragging, scrolling the sheet's
//! content near its bottom expands the sheet, and scrolling back to the top
//! collapses it, both behind a short debounce.
//!
//! The component is headless: it owns no windowing, timers, or event loop.
//! Hosts drive it with a manually set [`animation::Clock`], feed it input
//! events carrying timestamps, call [`sheet::Sheet::advance_animations`] once
//! per frame, and render from the query methods. Internal decisions that the
//! owner must reflect (the user dragged the sheet shut, a snap point changed)
//! come out of the event queue via [`sheet::Sheet::pop_event`].
//!
//! Rendering, styling, and hit testing stay on the host side: the host tells
//! the sheet whether a touch landed on the drag handle and what the content
//! scroll metrics are, and the sheet answers with offsets and snap states.

pub mod animation;
pub mod input;
pub mod options;
pub mod sheet;

pub use animation::{Animation, Clock, Curve};
pub use options::Options;
pub use sheet::{DragMotion, Event, ScrollMetrics, Sheet, SnapPoint};
