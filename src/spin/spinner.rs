//! Drag-to-spin component
//!
//! Composes the gesture tracker, the integrator, the outcome selector and a
//! feedback sink. A spinner with a slice set is a prize wheel; without one it
//! is a free-angle toy (spin the bottle).

use glam::DVec2;
use rand::Rng;

use super::gesture::{ElementBounds, GestureTracker};
use super::integrator::{FrameTicket, MotionIntegrator, Release, TickOutcome};
use super::outcome::SliceSet;
use super::state::{Outcome, Phase, RotationState, SpinEvent, SpinFrame};
use crate::error::SpinError;
use crate::feedback::{Feedback, VibrationPattern};
use crate::normalize_degrees;
use crate::tuning::SpinTuning;

pub struct Spinner<F: Feedback> {
    integrator: MotionIntegrator,
    tracker: GestureTracker,
    bounds: Option<ElementBounds>,
    slices: Option<SliceSet>,
    outcome: Option<Outcome>,
    feedback: F,
    haptics: bool,
    reveal_delay_ms: u32,
}

impl<F: Feedback> Spinner<F> {
    pub fn new(tuning: SpinTuning, slices: Option<SliceSet>, feedback: F) -> Result<Self, SpinError> {
        Ok(Self {
            integrator: MotionIntegrator::new(tuning)?,
            tracker: GestureTracker::new(),
            bounds: None,
            slices,
            outcome: None,
            feedback,
            haptics: true,
            reveal_delay_ms: 0,
        })
    }

    /// Prize wheel over `slices`
    pub fn wheel(tuning: SpinTuning, slices: SliceSet, feedback: F) -> Result<Self, SpinError> {
        Self::new(tuning, Some(slices), feedback)
    }

    /// Free-angle spinner with no slices
    pub fn bottle(tuning: SpinTuning, feedback: F) -> Result<Self, SpinError> {
        Self::new(tuning, None, feedback)
    }

    pub fn phase(&self) -> Phase {
        self.integrator.phase()
    }

    pub fn rotation(&self) -> RotationState {
        self.integrator.rotation()
    }

    pub fn tuning(&self) -> &SpinTuning {
        self.integrator.tuning()
    }

    pub fn slices(&self) -> Option<&SliceSet> {
        self.slices.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn set_haptics(&mut self, enabled: bool) {
        self.haptics = enabled;
    }

    /// Replace the slice set (mode change); starts a new round
    pub fn set_slices(&mut self, slices: SliceSet) -> SpinEvent {
        log::info!("Wheel now has {} slices", slices.len());
        self.slices = Some(slices);
        self.reset()
    }

    pub fn set_tuning(&mut self, tuning: SpinTuning) -> Result<SpinEvent, SpinError> {
        self.integrator.set_tuning(tuning)?;
        Ok(self.reset())
    }

    /// Pointer down on the element. Cancels any coast in flight and clears
    /// a shown result.
    pub fn pointer_down(&mut self, pos: DVec2, timestamp_ms: f64, bounds: ElementBounds) -> SpinEvent {
        self.bounds = Some(bounds);
        self.outcome = None;
        self.tracker.begin(pos, timestamp_ms);
        self.integrator.drag_start();
        SpinEvent::DragStarted
    }

    /// Pointer moved; returns the applied angular delta
    pub fn pointer_move(&mut self, pos: DVec2, timestamp_ms: f64) -> f64 {
        if self.phase() != Phase::Dragging {
            return 0.0;
        }
        let Some(bounds) = self.bounds else {
            return 0.0;
        };
        let delta = self.tracker.update(pos, timestamp_ms, &bounds);
        self.integrator.drag_update(delta);
        log::trace!("drag delta {delta:.2}, angle {:.1}", self.integrator.angle());
        delta
    }

    /// Pointer released (or left the element)
    pub fn pointer_up(&mut self) -> Option<SpinEvent> {
        if self.tracker.end().is_none() {
            return None;
        }
        let release = self.integrator.drag_end();
        self.handle_release(release)
    }

    /// Start a spin without a drag (bottle button). Ignored while a drag or
    /// coast is in progress; the running coast keeps its ticket.
    pub fn launch(&mut self, velocity: f64) -> Option<SpinEvent> {
        if self.phase().is_busy() {
            return None;
        }
        self.outcome = None;
        let release = self.integrator.launch(velocity);
        self.handle_release(release)
    }

    /// Launch with a random velocity in the upper part of the speed range
    pub fn launch_random<R: Rng>(&mut self, rng: &mut R) -> Option<SpinEvent> {
        let velocity = random_launch_velocity(rng, self.tuning());
        self.launch(velocity)
    }

    fn handle_release(&mut self, release: Release) -> Option<SpinEvent> {
        match release {
            Release::Coasting { velocity, .. } => {
                self.pulse(VibrationPattern::Release);
                Some(SpinEvent::Released { velocity })
            }
            Release::Settled => Some(self.finish(false)),
            Release::Ignored => None,
        }
    }

    /// Ticket for the running coast; the host schedules frames with it
    pub fn frame_ticket(&self) -> Option<FrameTicket> {
        self.integrator.ticket()
    }

    pub fn should_continue(&self, ticket: FrameTicket) -> bool {
        self.integrator.should_continue(ticket)
    }

    /// One display frame. Returns the settle event on the frame that stops.
    pub fn tick(&mut self, ticket: FrameTicket) -> Option<SpinEvent> {
        match self.integrator.tick(ticket) {
            TickOutcome::Settled => Some(self.finish(true)),
            TickOutcome::Continue | TickOutcome::Stale => None,
        }
    }

    /// Pause before the host reveals the latest result: the tuned delay after
    /// an animated coast, zero for a release too slow to spin
    pub fn reveal_delay_ms(&self) -> u32 {
        self.reveal_delay_ms
    }

    fn finish(&mut self, coasted: bool) -> SpinEvent {
        self.reveal_delay_ms = if coasted {
            self.tuning().result_delay_ms
        } else {
            0
        };
        let angle = self.integrator.angle();
        let outcome = match &self.slices {
            Some(slices) => {
                let (index, slice) = slices.select(angle);
                log::info!("Landed on slice {index}: {}", slice.label);
                Outcome::Slice {
                    index,
                    slice: slice.clone(),
                }
            }
            None => {
                let angle = normalize_degrees(angle);
                log::info!("Landed at {angle:.1}°");
                Outcome::FreeAngle(angle)
            }
        };
        self.pulse(VibrationPattern::Settle);
        self.outcome = Some(outcome.clone());
        SpinEvent::Settled(outcome)
    }

    /// Dismiss the result / abandon the round. Safe to call repeatedly.
    pub fn reset(&mut self) -> SpinEvent {
        self.tracker.end();
        self.integrator.reset();
        self.outcome = None;
        SpinEvent::Reset
    }

    pub fn frame(&self) -> SpinFrame {
        self.integrator.frame()
    }

    fn pulse(&mut self, pattern: VibrationPattern) {
        if self.haptics {
            self.feedback.vibrate(pattern);
        }
    }
}

/// Random launch speed in `[0.6, 1.0] * max_speed`, always clockwise so
/// repeated launches keep one spinning direction
pub fn random_launch_velocity<R: Rng>(rng: &mut R, tuning: &SpinTuning) -> f64 {
    rng.random_range(0.6..=1.0) * tuning.max_speed
}
