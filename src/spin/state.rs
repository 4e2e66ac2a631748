//! Spin state and events
//!
//! Everything the integrator owns lives here, plus the snapshot handed to the
//! rendering layer each frame.

use serde::{Deserialize, Serialize};

use super::outcome::Slice;

/// Interaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Not moving, no result shown
    #[default]
    Idle,
    /// Pointer captured, rotation follows the finger
    Dragging,
    /// Released, decaying under friction
    Coasting,
    /// Result computed, waiting for dismissal
    Settled,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Dragging => "Dragging",
            Phase::Coasting => "Coasting",
            Phase::Settled => "Settled",
        }
    }

    /// Whether the host should keep scheduling frames
    pub fn is_animating(&self) -> bool {
        *self == Phase::Coasting
    }

    /// A drag or coast owns the element
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Dragging | Phase::Coasting)
    }
}

/// Angle and angular velocity of the spinning element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationState {
    /// Degrees, unbounded accumulator (never normalized during motion)
    pub angle: f64,
    /// Degrees per frame
    pub velocity: f64,
}

/// Settled result of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Wheel: the slice under the marker
    Slice { index: usize, slice: Slice },
    /// Bottle: where it stopped, normalized to [0, 360)
    FreeAngle(f64),
}

impl Outcome {
    pub fn slice(&self) -> Option<&Slice> {
        match self {
            Outcome::Slice { slice, .. } => Some(slice),
            Outcome::FreeAngle(_) => None,
        }
    }
}

/// Transitions reported to the host (emitted in order)
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    DragStarted,
    /// Released fast enough; coasting at the clamped throw velocity
    Released { velocity: f64 },
    Settled(Outcome),
    Reset,
}

/// Presentation snapshot for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinFrame {
    /// Rotation to apply to the element, degrees
    pub angle: f64,
    pub phase: Phase,
    /// Marker wobble while coasting, degrees; 0 otherwise
    pub needle_tilt: f64,
}

impl SpinFrame {
    /// CSS transform for the rotating element
    pub fn css_transform(&self) -> String {
        format!("rotate({}deg) translateZ(0)", self.angle)
    }

    /// CSS transform for the fixed marker
    pub fn needle_css_transform(&self) -> String {
        format!("translateX(-50%) rotate({}deg) translateZ(0)", self.needle_tilt)
    }
}
