//! The sheet's vertical offset: static, animating, or gesture-controlled.

use crate::animation::Animation;

use super::gesture::DragGesture;

/// Offset of the sheet's top edge from the viewport top.
///
/// Exactly one variant holds the offset at a time, which is what makes drag
/// writes and animation writes mutually exclusive: a drag replaces any
/// in-flight animation at its current value, and a release replaces the
/// gesture with an animation.
#[derive(Debug)]
pub enum SheetOffset {
    /// Resting at a snap point.
    Static(f64),
    /// Animating toward a snap point.
    Animation(Animation),
    /// Controlled by an ongoing drag.
    Gesture(DragGesture),
}

impl SheetOffset {
    /// Returns the current offset in pixels.
    pub fn current(&self) -> f64 {
        match self {
            SheetOffset::Static(offset) => *offset,
            SheetOffset::Animation(anim) => anim.value(),
            SheetOffset::Gesture(gesture) => gesture.current_offset(),
        }
    }

    /// Returns the offset this value is heading toward.
    pub fn target(&self) -> f64 {
        match self {
            SheetOffset::Static(offset) => *offset,
            SheetOffset::Animation(anim) => anim.to(),
            SheetOffset::Gesture(gesture) => gesture.current_offset(),
        }
    }

    pub fn is_gesture(&self) -> bool {
        matches!(self, SheetOffset::Gesture(_))
    }

    pub fn is_animation_ongoing(&self) -> bool {
        matches!(self, SheetOffset::Animation(anim) if !anim.is_done())
    }

    /// Stops any animation or gesture, freezing the current value.
    pub fn stop(&mut self) {
        *self = SheetOffset::Static(self.current());
    }
}
