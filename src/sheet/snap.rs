//! Snap points and the release decision function.

use serde::{Deserialize, Serialize};

use crate::options::SnapRules;

/// A resting position of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapPoint {
    /// Partially open; the default state after opening.
    Half,
    /// Covering (nearly) the entire viewport.
    Full,
    /// Fully off-screen; completing the transition unmounts the sheet.
    Closed,
}

/// Pixel offsets of the snap points, measured from the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPoints {
    pub half: f64,
    pub full: f64,
    pub closed: f64,
}

impl SnapPoints {
    /// Computes the offsets for a viewport height.
    pub fn compute(viewport_height: f64, half_visible_fraction: f64) -> Self {
        Self {
            half: viewport_height - viewport_height * half_visible_fraction,
            full: 0.,
            closed: viewport_height,
        }
    }

    pub fn offset_of(&self, snap: SnapPoint) -> f64 {
        match snap {
            SnapPoint::Half => self.half,
            SnapPoint::Full => self.full,
            SnapPoint::Closed => self.closed,
        }
    }
}

/// Returns how much of the viewport the sheet covers, in percent.
///
/// 0 = fully off-screen, 100 = covering the whole viewport. Degenerate
/// viewport heights count as fully off-screen.
pub fn visible_percent(offset: f64, viewport_height: f64) -> f64 {
    if viewport_height <= 0. {
        return 0.;
    }
    (viewport_height - offset) / viewport_height * 100.
}

/// Decides which snap point a release settles into.
///
/// `velocity` is in px/ms, positive pointing down. The rules apply in order,
/// first match wins:
///
/// 1. Mostly off-screen dismisses regardless of velocity.
/// 2. A fast downward flick in the lower region dismisses.
/// 3. A fast downward flick from Full in the middle region lands on Half.
/// 4. A fast upward flick in the upper region lands on Full.
/// 5. Nearly fully visible settles on Full.
/// 6. Below the collapse line, fall back one snap point.
/// 7. Half releases above the midpoint promote to Full.
/// 8. Full releases below the midpoint demote to Half.
/// 9. Otherwise spring back to the current snap point.
pub fn resolve(
    visible_percent: f64,
    velocity: f64,
    current: SnapPoint,
    rules: &SnapRules,
) -> SnapPoint {
    if visible_percent < rules.dismiss_percent {
        return SnapPoint::Closed;
    }

    if velocity > rules.velocity_threshold {
        if visible_percent < rules.flick_dismiss_percent {
            return SnapPoint::Closed;
        }
        if current == SnapPoint::Full && visible_percent < rules.flick_half_percent {
            return SnapPoint::Half;
        }
    } else if velocity < -rules.velocity_threshold && visible_percent > rules.flick_expand_percent {
        return SnapPoint::Full;
    }

    if visible_percent > rules.expand_percent {
        return SnapPoint::Full;
    }

    if visible_percent < rules.collapse_percent {
        return if current == SnapPoint::Full {
            SnapPoint::Half
        } else {
            SnapPoint::Closed
        };
    }

    if current == SnapPoint::Half && visible_percent > rules.midpoint_percent {
        return SnapPoint::Full;
    }
    if current == SnapPoint::Full && visible_percent < rules.midpoint_percent {
        return SnapPoint::Half;
    }

    current
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rules() -> SnapRules {
        SnapRules::default()
    }

    #[test]
    fn snap_points_for_viewport() {
        let points = SnapPoints::compute(800., 0.7);
        assert_eq!(points.full, 0.);
        assert!((points.half - 240.).abs() < 1e-9);
        assert_eq!(points.closed, 800.);
        assert_eq!(points.offset_of(SnapPoint::Half), points.half);
    }

    #[test]
    fn visible_percent_basics() {
        assert_eq!(visible_percent(0., 800.), 100.);
        assert_eq!(visible_percent(800., 800.), 0.);
        assert_eq!(visible_percent(400., 800.), 50.);
        // Degenerate viewports must not divide by zero.
        assert_eq!(visible_percent(100., 0.), 0.);
        assert_eq!(visible_percent(100., -5.), 0.);
    }

    #[test]
    fn mostly_offscreen_dismisses() {
        assert_eq!(resolve(20., 0., SnapPoint::Half, &rules()), SnapPoint::Closed);
        // Even a hard upward flick does not save it.
        assert_eq!(resolve(34.9, -3., SnapPoint::Full, &rules()), SnapPoint::Closed);
    }

    #[test]
    fn fast_downward_flick_dismisses_low() {
        assert_eq!(resolve(55., 1., SnapPoint::Half, &rules()), SnapPoint::Closed);
        assert_eq!(resolve(55., 1., SnapPoint::Full, &rules()), SnapPoint::Closed);
    }

    #[test]
    fn fast_downward_flick_from_full_lands_on_half() {
        assert_eq!(resolve(70., 1., SnapPoint::Full, &rules()), SnapPoint::Half);
        // From Half the same flick falls through to the position rules.
        assert_eq!(resolve(70., 1., SnapPoint::Half, &rules()), SnapPoint::Full);
    }

    #[test]
    fn fast_upward_flick_expands_high() {
        assert_eq!(resolve(75., -1., SnapPoint::Half, &rules()), SnapPoint::Full);
        // Not high enough for the flick rule; midpoint rule catches it.
        assert_eq!(resolve(65., -0.8, SnapPoint::Half, &rules()), SnapPoint::Full);
    }

    #[test]
    fn nearly_full_settles_on_full() {
        assert_eq!(resolve(90., 0., SnapPoint::Half, &rules()), SnapPoint::Full);
        assert_eq!(resolve(90., 0., SnapPoint::Full, &rules()), SnapPoint::Full);
    }

    #[test]
    fn below_collapse_line_falls_back_one_point() {
        assert_eq!(resolve(40., 0., SnapPoint::Full, &rules()), SnapPoint::Half);
        assert_eq!(resolve(40., 0., SnapPoint::Half, &rules()), SnapPoint::Closed);
    }

    #[test]
    fn midpoint_divides_half_and_full() {
        assert_eq!(resolve(65., 0., SnapPoint::Half, &rules()), SnapPoint::Full);
        assert_eq!(resolve(60., 0., SnapPoint::Full, &rules()), SnapPoint::Half);
    }

    #[test]
    fn middle_region_springs_back() {
        assert_eq!(resolve(55., 0., SnapPoint::Half, &rules()), SnapPoint::Half);
        assert_eq!(resolve(65., 0., SnapPoint::Full, &rules()), SnapPoint::Full);
    }

    #[test]
    fn slow_velocity_does_not_engage_flick_rules() {
        assert_eq!(resolve(55., 0.4, SnapPoint::Half, &rules()), SnapPoint::Half);
        assert_eq!(resolve(65., -0.4, SnapPoint::Full, &rules()), SnapPoint::Full);
    }

    #[test]
    fn matrix_of_releases_is_deterministic() {
        let rules = rules();
        for percent in 0..=100 {
            for velocity in [-2., -0.5, -0.4, 0., 0.4, 0.5, 2.] {
                for current in [SnapPoint::Half, SnapPoint::Full, SnapPoint::Closed] {
                    let a = resolve(f64::from(percent), velocity, current, &rules);
                    let b = resolve(f64::from(percent), velocity, current, &rules);
                    assert_eq!(a, b);

                    // Anything mostly off-screen must dismiss.
                    if percent < 35 {
                        assert_eq!(a, SnapPoint::Closed);
                    }
                }
            }
        }
    }

    fn any_snap() -> impl Strategy<Value = SnapPoint> {
        prop_oneof![
            Just(SnapPoint::Half),
            Just(SnapPoint::Full),
            Just(SnapPoint::Closed),
        ]
    }

    proptest! {
        #[test]
        fn resolve_is_total(
            percent in 0.0..=100.0f64,
            velocity in -10.0..=10.0f64,
            current in any_snap(),
        ) {
            let snap = resolve(percent, velocity, current, &rules());
            prop_assert!(matches!(
                snap,
                SnapPoint::Half | SnapPoint::Full | SnapPoint::Closed
            ));
        }

        #[test]
        fn dismissal_region_never_survives(
            percent in 0.0..35.0f64,
            velocity in -10.0..=10.0f64,
            current in any_snap(),
        ) {
            prop_assert_eq!(
                resolve(percent, velocity, current, &rules()),
                SnapPoint::Closed
            );
        }
    }
}
