//! Rotation simulation
//!
//! Pure and host-agnostic:
//! - No frame scheduling (the host drives `tick` with a ticket)
//! - No rendering (the host applies `SpinFrame`)
//! - No platform dependencies

pub mod gesture;
pub mod integrator;
pub mod outcome;
pub mod spinner;
pub mod state;

pub use gesture::{ElementBounds, GesturePointer, GestureTracker, angle_at, delta_since};
pub use integrator::{FrameTicket, MotionIntegrator, Release, TickOutcome};
pub use outcome::{Slice, SliceSet, select_index};
pub use spinner::{Spinner, random_launch_velocity};
pub use state::{Outcome, Phase, RotationState, SpinEvent, SpinFrame};
