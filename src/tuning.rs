//! Data-driven spin tuning
//!
//! One struct carries every physics constant so the wheel and the bottle
//! share a single integrator and differ only in their numbers.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SpinError;

/// Physics constants for one mini-game instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTuning {
    /// Per-frame velocity decay while coasting, in (0, 1). Closer to 1 spins longer.
    pub friction: f64,
    /// |velocity| below which coasting ends and velocity is forced to 0
    pub stop_threshold: f64,
    /// Scale applied to the last drag delta on release
    pub throw_multiplier: f64,
    /// Symmetric clamp applied right after the throw multiplier
    pub max_speed: f64,
    /// Release speed a drag must exceed to start coasting
    pub release_threshold: f64,
    /// Needle tilt degrees per unit of velocity
    pub needle_gain: f64,
    /// Needle tilt clamp (degrees)
    pub needle_max_tilt: f64,
    /// Host-side pause between settle and result reveal
    pub result_delay_ms: u32,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self::wheel()
    }
}

impl SpinTuning {
    /// Prize wheel: long, heavy spin
    pub fn wheel() -> Self {
        Self {
            friction: WHEEL_FRICTION,
            stop_threshold: STOP_THRESHOLD,
            throw_multiplier: WHEEL_THROW_MULTIPLIER,
            max_speed: WHEEL_MAX_SPEED,
            release_threshold: RELEASE_THRESHOLD,
            needle_gain: NEEDLE_GAIN,
            needle_max_tilt: NEEDLE_MAX_TILT,
            result_delay_ms: RESULT_DELAY_MS,
        }
    }

    /// Spin-the-bottle: lighter object, stops sooner
    pub fn bottle() -> Self {
        Self {
            friction: BOTTLE_FRICTION,
            throw_multiplier: BOTTLE_THROW_MULTIPLIER,
            max_speed: BOTTLE_MAX_SPEED,
            ..Self::wheel()
        }
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_stop_threshold(mut self, stop_threshold: f64) -> Self {
        self.stop_threshold = stop_threshold;
        self
    }

    pub fn with_throw_multiplier(mut self, throw_multiplier: f64) -> Self {
        self.throw_multiplier = throw_multiplier;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_release_threshold(mut self, release_threshold: f64) -> Self {
        self.release_threshold = release_threshold;
        self
    }

    /// Check every constant; a tuning that passes guarantees settle in finite ticks
    pub fn validate(&self) -> Result<(), SpinError> {
        check_finite("friction", self.friction)?;
        check_finite("stop_threshold", self.stop_threshold)?;
        check_finite("throw_multiplier", self.throw_multiplier)?;
        check_finite("max_speed", self.max_speed)?;
        check_finite("release_threshold", self.release_threshold)?;
        check_finite("needle_gain", self.needle_gain)?;
        check_finite("needle_max_tilt", self.needle_max_tilt)?;

        if self.friction <= 0.0 || self.friction >= 1.0 {
            return Err(invalid("friction", self.friction, "must be in (0, 1)"));
        }
        if self.stop_threshold <= 0.0 {
            return Err(invalid("stop_threshold", self.stop_threshold, "must be positive"));
        }
        if self.throw_multiplier <= 0.0 {
            return Err(invalid(
                "throw_multiplier",
                self.throw_multiplier,
                "must be positive",
            ));
        }
        if self.max_speed <= 0.0 {
            return Err(invalid("max_speed", self.max_speed, "must be positive"));
        }
        if self.release_threshold < 0.0 {
            return Err(invalid(
                "release_threshold",
                self.release_threshold,
                "must not be negative",
            ));
        }
        if self.needle_max_tilt < 0.0 {
            return Err(invalid(
                "needle_max_tilt",
                self.needle_max_tilt,
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning blob; missing fields take wheel defaults
    pub fn from_json(json: &str) -> Result<Self, SpinError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Frames a coast starting at `speed` needs to settle (closed form)
    pub fn frames_to_settle(&self, speed: f64) -> u32 {
        let speed = speed.abs();
        if speed < self.stop_threshold {
            return 0;
        }
        ((self.stop_threshold / speed).ln() / self.friction.ln()).ceil() as u32
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> SpinError {
    SpinError::InvalidTuning {
        field,
        value,
        reason,
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), SpinError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(SpinTuning::wheel().validate().is_ok());
        assert!(SpinTuning::bottle().validate().is_ok());
        assert_eq!(SpinTuning::default(), SpinTuning::wheel());
    }

    #[test]
    fn test_friction_bounds() {
        for friction in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let tuning = SpinTuning::wheel().with_friction(friction);
            assert!(
                matches!(
                    tuning.validate(),
                    Err(SpinError::InvalidTuning {
                        field: "friction",
                        ..
                    })
                ),
                "friction {friction} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_thresholds() {
        assert!(SpinTuning::wheel().with_stop_threshold(0.0).validate().is_err());
        assert!(SpinTuning::wheel().with_max_speed(-1.0).validate().is_err());
        assert!(SpinTuning::wheel().with_throw_multiplier(0.0).validate().is_err());
        assert!(SpinTuning::wheel().with_release_threshold(-0.1).validate().is_err());
        assert!(SpinTuning::wheel().with_release_threshold(0.0).validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let tuning = SpinTuning::from_json(r#"{ "friction": 0.98, "max_speed": 40.0 }"#).unwrap();
        assert_eq!(tuning.friction, 0.98);
        assert_eq!(tuning.max_speed, 40.0);
        assert_eq!(tuning.throw_multiplier, WHEEL_THROW_MULTIPLIER);

        assert!(SpinTuning::from_json(r#"{ "friction": 2.0 }"#).is_err());
        assert!(matches!(
            SpinTuning::from_json("not json"),
            Err(SpinError::Json(_))
        ));
    }

    #[test]
    fn test_frames_to_settle() {
        let tuning = SpinTuning::wheel()
            .with_friction(0.99)
            .with_stop_threshold(0.05);
        let frames = tuning.frames_to_settle(60.0);
        assert!((700..=710).contains(&frames), "got {frames}");
        assert_eq!(tuning.frames_to_settle(0.01), 0);
    }
}
