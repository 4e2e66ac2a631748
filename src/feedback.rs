//! Haptic feedback via the Vibration API
//!
//! Fire-and-forget. Devices without vibration support (most desktops, iOS
//! Safari) silently do nothing.

/// Vibration patterns fired at spin transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VibrationPattern {
    /// Short pulse when a throw starts coasting
    Release,
    /// Double pulse when the result is decided
    Settle,
}

impl VibrationPattern {
    /// On/off durations in milliseconds, starting with "on"
    pub fn durations_ms(&self) -> &'static [u32] {
        match self {
            VibrationPattern::Release => &[50],
            VibrationPattern::Settle => &[100, 50, 100],
        }
    }
}

/// Sink for feedback pulses. Implementations must never fail.
pub trait Feedback {
    fn vibrate(&mut self, pattern: VibrationPattern);
}

/// Feedback that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn vibrate(&mut self, _pattern: VibrationPattern) {}
}

/// Browser vibration through `navigator.vibrate`
#[derive(Debug, Clone)]
pub struct Haptics {
    #[cfg(target_arch = "wasm32")]
    navigator: Option<web_sys::Navigator>,
}

impl Haptics {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        use wasm_bindgen::JsValue;

        let navigator = web_sys::window().map(|w| w.navigator()).filter(|nav| {
            js_sys::Reflect::has(nav, &JsValue::from_str("vibrate")).unwrap_or(false)
        });
        if navigator.is_none() {
            log::info!("Vibration API unavailable - haptics disabled");
        }
        Self { navigator }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {}
    }

    pub fn is_supported(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            self.navigator.is_some()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }
}

impl Default for Haptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Feedback for Haptics {
    #[cfg(target_arch = "wasm32")]
    fn vibrate(&mut self, pattern: VibrationPattern) {
        let Some(nav) = &self.navigator else { return };
        let durations = pattern.durations_ms();
        let _ = match durations {
            [single] => nav.vibrate_with_duration(*single),
            _ => {
                let array: js_sys::Array = durations
                    .iter()
                    .map(|ms| wasm_bindgen::JsValue::from(*ms))
                    .collect();
                nav.vibrate_with_pattern(&array)
            }
        };
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn vibrate(&mut self, pattern: VibrationPattern) {
        log::trace!("vibrate {:?} (no device)", pattern.durations_ms());
    }
}

/// Records every pulse, for tests
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingFeedback {
    pub pulses: Vec<VibrationPattern>,
}

#[cfg(test)]
impl Feedback for RecordingFeedback {
    fn vibrate(&mut self, pattern: VibrationPattern) {
        self.pulses.push(pattern);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns() {
        assert_eq!(VibrationPattern::Release.durations_ms(), &[50]);
        assert_eq!(VibrationPattern::Settle.durations_ms(), &[100, 50, 100]);
    }

    #[test]
    fn test_native_haptics_is_noop() {
        let mut haptics = Haptics::new();
        assert!(!haptics.is_supported());
        haptics.vibrate(VibrationPattern::Settle);
        NoFeedback.vibrate(VibrationPattern::Release);
    }

    #[test]
    fn test_default_haptics_matches_new() {
        assert_eq!(Haptics::default().is_supported(), Haptics::new().is_supported());
    }
}
