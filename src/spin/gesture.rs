//! Pointer gesture to angular delta
//!
//! Only the angle of the pointer around the element's center matters, never
//! its distance from the center. Angles are in degrees with 0 pointing up and
//! increasing clockwise in screen space (y grows downward).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::SpinError;
use crate::wrap_delta;

/// Screen-space rectangle of the rotating element. Only built through
/// [`ElementBounds::new`], so it always has a positive finite size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementBounds {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl ElementBounds {
    /// Rejects zero-size, negative or non-finite rectangles
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self, SpinError> {
        let finite = [left, top, width, height].iter().all(|v| v.is_finite());
        if !finite || width <= 0.0 || height <= 0.0 {
            return Err(SpinError::DegenerateBounds { width, height });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }
}

/// Pointer angle around the element center, degrees, "up" = 0
#[inline]
pub fn angle_at(pointer: DVec2, bounds: &ElementBounds) -> f64 {
    let d = pointer - bounds.center();
    d.y.atan2(d.x).to_degrees() + 90.0
}

/// Smallest signed rotation from `last` to `current`, in (-180, 180]
#[inline]
pub fn delta_since(last: f64, current: f64) -> f64 {
    wrap_delta(current - last)
}

/// Last observed pointer sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GesturePointer {
    pub pos: DVec2,
    pub timestamp_ms: f64,
}

/// Tracks one drag gesture. The pointer sample only exists between
/// `begin` and `end`.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    last: Option<GesturePointer>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn begin(&mut self, pos: DVec2, timestamp_ms: f64) {
        self.last = Some(GesturePointer { pos, timestamp_ms });
    }

    /// Angular delta since the previous sample. Returns 0 when no gesture
    /// is active or the pointer did not move.
    pub fn update(&mut self, pos: DVec2, timestamp_ms: f64, bounds: &ElementBounds) -> f64 {
        let Some(last) = self.last else {
            log::trace!("pointer move outside a gesture ignored");
            return 0.0;
        };
        self.last = Some(GesturePointer { pos, timestamp_ms });

        if pos == last.pos {
            return 0.0;
        }
        delta_since(angle_at(last.pos, bounds), angle_at(pos, bounds))
    }

    pub fn end(&mut self) -> Option<GesturePointer> {
        self.last.take()
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn last(&self) -> Option<&GesturePointer> {
        self.last.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square() -> ElementBounds {
        ElementBounds::new(0.0, 0.0, 200.0, 200.0).unwrap()
    }

    /// Point on a circle around the square's center at a compass angle
    fn at_compass(deg: f64) -> DVec2 {
        let rad = (deg - 90.0).to_radians();
        square().center() + DVec2::new(rad.cos(), rad.sin()) * 80.0
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        assert!(ElementBounds::new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(ElementBounds::new(0.0, 0.0, 10.0, -1.0).is_err());
        assert!(ElementBounds::new(f64::NAN, 0.0, 10.0, 10.0).is_err());
        assert!(ElementBounds::new(5.0, 5.0, 10.0, 10.0).is_ok());
    }

    #[test]
    fn test_bounds_accessors() {
        let b = ElementBounds::new(12.0, 34.0, 100.0, 60.0).unwrap();
        assert_eq!((b.left(), b.top(), b.width(), b.height()), (12.0, 34.0, 100.0, 60.0));
        assert_eq!(b.center(), DVec2::new(62.0, 64.0));
    }

    #[test]
    fn test_angle_at_compass_points() {
        let b = square();
        assert!(angle_at(DVec2::new(100.0, 0.0), &b).abs() < 1e-9); // up
        assert!((angle_at(DVec2::new(200.0, 100.0), &b) - 90.0).abs() < 1e-9); // right
        assert!((angle_at(DVec2::new(100.0, 200.0), &b) - 180.0).abs() < 1e-9); // down
        assert!((angle_at(DVec2::new(0.0, 100.0), &b) - 270.0).abs() < 1e-9); // left
    }

    #[test]
    fn test_angle_ignores_radius() {
        let b = square();
        let near = angle_at(DVec2::new(110.0, 90.0), &b);
        let far = angle_at(DVec2::new(190.0, 10.0), &b);
        assert!((near - far).abs() < 1e-9);
    }

    #[test]
    fn test_delta_across_seam() {
        assert!((delta_since(359.0, 2.0) - 3.0).abs() < 1e-9);
        assert!((delta_since(2.0, 359.0) + 3.0).abs() < 1e-9);
        assert!((delta_since(10.0, 20.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tracker_crosses_seam() {
        let b = square();
        let mut tracker = GestureTracker::new();
        tracker.begin(at_compass(359.0), 0.0);
        let delta = tracker.update(at_compass(2.0), 16.0, &b);
        assert!((delta - 3.0).abs() < 1e-6, "got {delta}");

        let delta = tracker.update(at_compass(358.0), 32.0, &b);
        assert!((delta + 4.0).abs() < 1e-6, "got {delta}");
    }

    #[test]
    fn test_tracker_zero_movement_and_inactive() {
        let b = square();
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.update(at_compass(45.0), 0.0, &b), 0.0);
        assert!(!tracker.is_active());

        tracker.begin(at_compass(45.0), 0.0);
        assert_eq!(tracker.update(at_compass(45.0), 0.0, &b), 0.0);
        assert!(tracker.end().is_some());
        assert!(tracker.last().is_none());
    }

    proptest! {
        #[test]
        fn prop_delta_in_half_open_range(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = delta_since(a, b);
            prop_assert!(d > -180.0 && d <= 180.0);
        }

        #[test]
        fn prop_delta_antisymmetric(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = delta_since(a, b);
            prop_assume!(d != 180.0);
            prop_assert!((d + delta_since(b, a)).abs() < 1e-9);
        }

        #[test]
        fn prop_delta_lands_on_target(a in 0.0f64..360.0, b in 0.0f64..360.0) {
            let d = delta_since(a, b);
            let landed = crate::normalize_degrees(a + d);
            let err = (landed - b).abs();
            prop_assert!(err < 1e-9 || (360.0 - err) < 1e-9);
        }
    }
}
