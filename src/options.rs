//! Tunable parameters of the sheet.
//!
//! Everything here has a sensible default; hosts normally construct
//! [`Options::default()`] and override individual knobs. The structs derive
//! serde so tuning can be loaded from or persisted to configuration.

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationParams, Curve};

/// Transition parameters for the two kinds of snap animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animations {
    /// Drag-release transitions.
    pub snap: AnimationParams,
    /// Scroll-triggered and initial-open transitions, slightly longer.
    pub smooth: AnimationParams,
}

impl Default for Animations {
    fn default() -> Self {
        Self {
            snap: AnimationParams {
                duration_ms: 500,
                curve: Curve::EaseInOutCubic,
            },
            smooth: AnimationParams {
                duration_ms: 600,
                curve: Curve::EaseInOutCubic,
            },
        }
    }
}

/// Drag gesture thresholds, all in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gestures {
    /// Touches this close to the sheet's top edge may start a drag even off
    /// the handle, provided the content is scrolled to its top.
    pub drag_zone_height: f64,
    /// Total movement below this does not move the sheet.
    pub noise_floor: f64,
    /// Total movement beyond this claims the gesture away from native
    /// scrolling.
    pub scroll_claim_threshold: f64,
}

impl Default for Gestures {
    fn default() -> Self {
        Self {
            drag_zone_height: 50.,
            noise_floor: 5.,
            scroll_claim_threshold: 10.,
        }
    }
}

/// Breakpoints of the snap resolver.
///
/// Percentages refer to the visible share of the viewport occupied by the
/// sheet (0 = fully off-screen, 100 = covering the whole viewport), and the
/// velocity threshold is in px/ms with positive values pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapRules {
    /// Flicks faster than this engage the velocity rules.
    pub velocity_threshold: f64,
    /// Below this the sheet always dismisses.
    pub dismiss_percent: f64,
    /// A fast downward flick below this dismisses.
    pub flick_dismiss_percent: f64,
    /// A fast downward flick from Full below this lands on Half.
    pub flick_half_percent: f64,
    /// A fast upward flick above this lands on Full.
    pub flick_expand_percent: f64,
    /// Above this the sheet settles on Full regardless of velocity.
    pub expand_percent: f64,
    /// Below this the sheet falls back one snap point.
    pub collapse_percent: f64,
    /// Dividing line between Half and Full for slow releases.
    pub midpoint_percent: f64,
}

impl Default for SnapRules {
    fn default() -> Self {
        Self {
            velocity_threshold: 0.5,
            dismiss_percent: 35.,
            flick_dismiss_percent: 60.,
            flick_half_percent: 75.,
            flick_expand_percent: 70.,
            expand_percent: 85.,
            collapse_percent: 50.,
            midpoint_percent: 62.5,
        }
    }
}

/// Scroll-triggered expand/collapse behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollOptions {
    /// The content counts as near its bottom once the visible region reaches
    /// this fraction of the scroll height.
    pub near_bottom_fraction: f64,
    /// The content counts as at its top within this many pixels.
    pub top_threshold: f64,
    /// Minimum per-event scroll delta to arm a transition.
    pub min_delta: f64,
    /// How long a scroll decision must hold before it commits.
    pub debounce_ms: u32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            near_bottom_fraction: 0.7,
            top_threshold: 5.,
            min_delta: 5.,
            debounce_ms: 150,
        }
    }
}

/// All tunables of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Fraction of the viewport the sheet covers at the Half snap point.
    pub half_visible_fraction: f64,
    /// Maximum opacity of the backdrop behind a fully visible sheet.
    pub backdrop_max_opacity: f64,
    pub animations: Animations,
    pub gestures: Gestures,
    pub snap_rules: SnapRules,
    pub scroll: ScrollOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            half_visible_fraction: 0.7,
            backdrop_max_opacity: 0.6,
            animations: Animations::default(),
            gestures: Gestures::default(),
            snap_rules: SnapRules::default(),
            scroll: ScrollOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_serde() {
        let options = Options::default();
        let json = serde_json::to_string(&options).unwrap();
        let back: Options = serde_json::from_str(&json).unwrap();
        assert_eq!(options, back);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options: Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Options::default());

        let options: Options =
            serde_json::from_str(r#"{"half_visible_fraction": 0.5}"#).unwrap();
        assert_eq!(options.half_visible_fraction, 0.5);
        assert_eq!(options.snap_rules, SnapRules::default());
    }
}
