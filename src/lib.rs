//! Spin Party - drag-to-spin party games for the browser
//!
//! Core modules:
//! - `spin`: Rotation simulation (gesture tracking, momentum, settle, outcome)
//! - `tuning`: Physics constants per mini-game
//! - `feedback`: Best-effort haptic pulses
//! - `modes`: Prompt decks and wheel dealing
//! - `settings`: Persisted user preferences

pub mod error;
pub mod feedback;
pub mod modes;
pub mod settings;
pub mod spin;
pub mod tuning;

pub use error::SpinError;
pub use settings::Settings;
pub use tuning::SpinTuning;

/// Default tuning constants
pub mod consts {
    /// Wheel friction (per-frame velocity decay, closer to 1 = longer spin)
    pub const WHEEL_FRICTION: f64 = 0.994;
    /// Bottle friction
    pub const BOTTLE_FRICTION: f64 = 0.99;
    /// Below this speed (deg/frame) coasting stops
    pub const STOP_THRESHOLD: f64 = 0.05;
    /// Minimum release speed (deg/frame) that starts a coast
    pub const RELEASE_THRESHOLD: f64 = 0.5;

    pub const WHEEL_THROW_MULTIPLIER: f64 = 2.5;
    pub const BOTTLE_THROW_MULTIPLIER: f64 = 2.0;

    /// Speed clamp after the throw (deg/frame, both directions)
    pub const WHEEL_MAX_SPEED: f64 = 100.0;
    pub const BOTTLE_MAX_SPEED: f64 = 60.0;

    /// Needle tilt per unit of velocity while coasting
    pub const NEEDLE_GAIN: f64 = 0.5;
    /// Needle tilt clamp (degrees)
    pub const NEEDLE_MAX_TILT: f64 = 15.0;

    /// Pause between settle and result reveal
    pub const RESULT_DELAY_MS: u32 = 500;

    /// Slots on a dealt wheel
    pub const WHEEL_SLOTS: usize = 8;
    /// Fewest entries a custom wheel accepts
    pub const MIN_CUSTOM_ENTRIES: usize = 2;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Fold a raw angular difference into (-180, 180]
///
/// Only corrects one revolution, which is enough for differences of two
/// angles that each lie within a single turn.
#[inline]
pub fn wrap_delta(mut delta: f64) -> f64 {
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn test_wrap_delta() {
        assert_eq!(wrap_delta(10.0), 10.0);
        assert_eq!(wrap_delta(-357.0), 3.0);
        assert_eq!(wrap_delta(357.0), -3.0);
        assert_eq!(wrap_delta(180.0), 180.0);
        assert_eq!(wrap_delta(-180.0), 180.0);
    }
}
