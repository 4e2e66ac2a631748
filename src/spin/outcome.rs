//! Slice sets and the outcome selector
//!
//! Slice `k` is centered `k * 360/N` degrees clockwise from the top marker
//! when the wheel is at rest at angle 0. The wheel turns under a fixed
//! marker, so a wheel rotated clockwise by `a` shows the slice centered at
//! `360 - a` under the marker.

use serde::{Deserialize, Serialize};

use crate::error::SpinError;
use crate::normalize_degrees;

/// One labeled wheel segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub id: u32,
    pub label: String,
    /// CSS color, e.g. `#ef4444`
    pub fill_color: String,
    pub text_color: String,
}

impl Slice {
    pub fn new(
        id: u32,
        label: impl Into<String>,
        fill_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            fill_color: fill_color.into(),
            text_color: text_color.into(),
        }
    }
}

/// Non-empty, ordered set of slices. Immutable for a round; replaced
/// wholesale when the game mode changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceSet {
    slices: Vec<Slice>,
}

impl SliceSet {
    pub fn new(slices: Vec<Slice>) -> Result<Self, SpinError> {
        if slices.is_empty() {
            return Err(SpinError::EmptySliceSet);
        }
        Ok(Self { slices })
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Always false for a constructed set
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter()
    }

    /// Angular width of each slice
    pub fn slice_width(&self) -> f64 {
        360.0 / self.slices.len() as f64
    }

    /// Center of slice `index`, clockwise from the top
    pub fn center_of(&self, index: usize) -> f64 {
        index as f64 * self.slice_width()
    }

    /// Index of the slice under the marker at `angle`
    pub fn select_index(&self, angle: f64) -> usize {
        select_index(angle, self.slices.len())
    }

    /// Slice under the marker at `angle`
    pub fn select(&self, angle: f64) -> (usize, &Slice) {
        let index = self.select_index(angle);
        (index, &self.slices[index])
    }
}

/// Winning index for a settled `angle` on a wheel of `count` slices.
///
/// Rounds to the nearest slice center; an exact half-slice tie goes to the
/// upper neighbor (wrapping to 0 past the last slice).
///
/// # Panics
/// If `count` is 0. Use [`SliceSet`] to get the check at construction time.
pub fn select_index(angle: f64, count: usize) -> usize {
    assert!(count > 0, "outcome selector needs at least one slice");
    let under_marker = normalize_degrees(360.0 - normalize_degrees(angle));
    let width = 360.0 / count as f64;
    ((under_marker / width).round() as usize) % count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eight() -> SliceSet {
        SliceSet::new(
            (0..8)
                .map(|i| Slice::new(i + 1, format!("s{i}"), "#000000", "#ffffff"))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(
            SliceSet::new(Vec::new()),
            Err(SpinError::EmptySliceSet)
        ));
    }

    #[test]
    fn test_rest_angle_selects_first() {
        let set = eight();
        assert_eq!(set.select_index(0.0), 0);
        assert_eq!(set.select_index(360.0), 0);
        assert_eq!(set.select_index(-720.0), 0);
    }

    #[test]
    fn test_half_slice_tie_is_deterministic() {
        // 360 - 22.5 = 337.5 → 7.5 slices → rounds up to 8 → wraps to 0
        let set = eight();
        assert_eq!(set.select_index(22.5), 0);
        assert_eq!(set.select_index(22.5 + 360.0 * 3.0), 0);
        // the other side of that boundary
        assert_eq!(set.select_index(23.0), 7);
        // and the opposite tie, 360 - 337.5 = 22.5 → 0.5 → rounds up to 1
        assert_eq!(set.select_index(337.5), 1);
    }

    #[test]
    fn test_wheel_turns_under_marker() {
        let set = eight();
        // turning clockwise by one slice brings the last slice under the marker
        assert_eq!(set.select_index(45.0), 7);
        // counter-clockwise brings slice 1
        assert_eq!(set.select_index(-45.0), 1);
        assert_eq!(set.select_index(315.0), 1);
        let (index, slice) = set.select(-90.0);
        assert_eq!(index, 2);
        assert_eq!(slice.id, 3);
    }

    #[test]
    fn test_nearest_center_wins() {
        let set = eight();
        for index in 0..8 {
            // rotate so that slice `index` center sits under the marker, then nudge
            let angle = 360.0 - set.center_of(index);
            assert_eq!(set.select_index(angle + 10.0), index);
            assert_eq!(set.select_index(angle - 10.0), index);
        }
    }

    #[test]
    fn test_single_slice() {
        let set = SliceSet::new(vec![Slice::new(1, "only", "#fff", "#000")]).unwrap();
        assert_eq!(set.slice_width(), 360.0);
        for angle in [0.0, 90.0, 179.0, 181.0, 359.9] {
            assert_eq!(set.select_index(angle), 0);
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_count_panics() {
        select_index(10.0, 0);
    }
}
