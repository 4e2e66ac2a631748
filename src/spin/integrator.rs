//! Momentum integrator and phase machine
//!
//! Drag deltas drive the angle directly; on release the last delta becomes a
//! throw velocity that decays geometrically once per frame until it drops
//! below the stop threshold.
//!
//! The integrator never schedules frames itself. Each coasting episode hands
//! out a [`FrameTicket`]; the host calls [`MotionIntegrator::tick`] with it
//! once per display frame while [`MotionIntegrator::should_continue`] holds.
//! Any drag start or reset retires the ticket, so a frame callback that was
//! already queued becomes a no-op instead of a second writer.

use serde::{Deserialize, Serialize};

use super::state::{Phase, RotationState, SpinFrame};
use crate::error::SpinError;
use crate::tuning::SpinTuning;

/// Handle for one coasting episode's frame callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameTicket(u64);

/// What a release (or a launch) turned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Coasting; schedule frames with `ticket`
    Coasting { ticket: FrameTicket, velocity: f64 },
    /// Too slow to coast; settled where it is
    Settled,
    /// Not applicable in the current phase
    Ignored,
}

/// Result of a single frame step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still coasting, schedule another frame
    Continue,
    /// Velocity dropped below the stop threshold this frame
    Settled,
    /// Ticket retired or not coasting; nothing changed
    Stale,
}

/// Owns the rotation state of one spinning element
#[derive(Debug, Clone, PartialEq)]
pub struct MotionIntegrator {
    tuning: SpinTuning,
    rotation: RotationState,
    phase: Phase,
    /// Current episode; bumped whenever a ticket is issued or retired
    episode: u64,
}

impl MotionIntegrator {
    pub fn new(tuning: SpinTuning) -> Result<Self, SpinError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            rotation: RotationState::default(),
            phase: Phase::Idle,
            episode: 0,
        })
    }

    pub fn tuning(&self) -> &SpinTuning {
        &self.tuning
    }

    /// Swap constants; resets the phase, keeps the angle
    pub fn set_tuning(&mut self, tuning: SpinTuning) -> Result<(), SpinError> {
        tuning.validate()?;
        self.tuning = tuning;
        self.reset();
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn angle(&self) -> f64 {
        self.rotation.angle
    }

    pub fn velocity(&self) -> f64 {
        self.rotation.velocity
    }

    /// Pointer captured. Cancels any coast in flight and starts from the
    /// current angle.
    pub fn drag_start(&mut self) {
        if self.phase == Phase::Coasting {
            self.retire_ticket();
            log::debug!("coast interrupted at {:.1}°", self.rotation.angle);
        }
        self.rotation.velocity = 0.0;
        self.phase = Phase::Dragging;
        log::debug!("phase -> Dragging");
    }

    /// Apply one pointer-move delta. The delta also becomes the provisional
    /// velocity; there is no smoothing across samples.
    pub fn drag_update(&mut self, delta: f64) {
        if self.phase != Phase::Dragging {
            log::trace!("drag delta {delta:.2} ignored in {}", self.phase.as_str());
            return;
        }
        self.rotation.angle += delta;
        self.rotation.velocity = delta;
    }

    /// Pointer released
    pub fn drag_end(&mut self) -> Release {
        if self.phase != Phase::Dragging {
            return Release::Ignored;
        }

        let velocity = self.rotation.velocity;
        if velocity.abs() > self.tuning.release_threshold {
            self.start_coast(velocity * self.tuning.throw_multiplier)
        } else {
            log::debug!("release too slow ({velocity:.2}), settling in place");
            self.settle();
            Release::Settled
        }
    }

    /// Start coasting from rest at `velocity` (button spin). Only from Idle
    /// or Settled.
    pub fn launch(&mut self, velocity: f64) -> Release {
        match self.phase {
            Phase::Idle | Phase::Settled => {}
            Phase::Dragging | Phase::Coasting => return Release::Ignored,
        }
        if !velocity.is_finite() || velocity.abs() < self.tuning.stop_threshold {
            self.settle();
            return Release::Settled;
        }
        self.start_coast(velocity)
    }

    fn start_coast(&mut self, velocity: f64) -> Release {
        let max = self.tuning.max_speed;
        let velocity = velocity.clamp(-max, max);
        self.rotation.velocity = velocity;
        self.phase = Phase::Coasting;
        self.episode += 1;
        log::debug!("phase -> Coasting at {velocity:.2}°/frame");
        Release::Coasting {
            ticket: FrameTicket(self.episode),
            velocity,
        }
    }

    /// Ticket of the running coast, if any
    pub fn ticket(&self) -> Option<FrameTicket> {
        (self.phase == Phase::Coasting).then_some(FrameTicket(self.episode))
    }

    /// Whether a frame scheduled with `ticket` should run
    pub fn should_continue(&self, ticket: FrameTicket) -> bool {
        self.phase == Phase::Coasting && ticket.0 == self.episode
    }

    /// Advance one display frame
    pub fn tick(&mut self, ticket: FrameTicket) -> TickOutcome {
        if !self.should_continue(ticket) {
            log::trace!("stale frame ticket {} ignored", ticket.0);
            return TickOutcome::Stale;
        }

        self.rotation.angle += self.rotation.velocity;
        self.rotation.velocity *= self.tuning.friction;

        if self.rotation.velocity.abs() < self.tuning.stop_threshold {
            self.settle();
            TickOutcome::Settled
        } else {
            TickOutcome::Continue
        }
    }

    fn settle(&mut self) {
        self.rotation.velocity = 0.0;
        self.phase = Phase::Settled;
        log::debug!("phase -> Settled at {:.1}°", self.rotation.angle);
    }

    /// Stop, drop any pending frame, return to Idle. Angle is kept.
    pub fn reset(&mut self) {
        if self.phase == Phase::Coasting {
            self.retire_ticket();
        }
        self.rotation.velocity = 0.0;
        if self.phase != Phase::Idle {
            self.phase = Phase::Idle;
            log::debug!("phase -> Idle");
        }
    }

    fn retire_ticket(&mut self) {
        self.episode += 1;
    }

    /// Marker tilt for the current velocity
    pub fn needle_tilt(&self) -> f64 {
        if self.phase != Phase::Coasting {
            return 0.0;
        }
        let max = self.tuning.needle_max_tilt;
        (self.rotation.velocity * self.tuning.needle_gain).clamp(-max, max)
    }

    pub fn frame(&self) -> SpinFrame {
        SpinFrame {
            angle: self.rotation.angle,
            phase: self.phase,
            needle_tilt: self.needle_tilt(),
        }
    }
}
