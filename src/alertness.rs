//! Alertness state machine.
//!
//! Provides [`AlertnessState`], the pure per-tick transition function, and
//! [`AlertnessEngine`], which owns the state together with its clock and the
//! last delivered baseline.

use crate::time::{Clock, TimeInstant, TimeSource};
use crate::types::{AlertnessPhase, AlertnessProfile, LEVEL_MAX, clamp_level};

/// Position of the alertness state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertnessState {
    phase: AlertnessPhase,
    state_time: u32,
}

impl AlertnessState {
    /// Dormant state with no progress.
    pub const DORMANT: Self = Self {
        phase: AlertnessPhase::Dormant,
        state_time: 0,
    };

    /// Creates a state at the given phase and elapsed time.
    ///
    /// Dormant carries no progress, so `state_time` is dropped for it.
    pub fn new(phase: AlertnessPhase, state_time: u32) -> Self {
        let state_time = match phase {
            AlertnessPhase::Dormant => 0,
            _ => state_time,
        };
        Self { phase, state_time }
    }

    /// Current phase.
    pub fn phase(&self) -> AlertnessPhase {
        self.phase
    }

    /// Milliseconds spent in the current phase.
    pub fn state_time(&self) -> u32 {
        self.state_time
    }

    /// Computes the alertness to emit and the state for the next tick.
    ///
    /// The emitted value is taken before `delta_ms` is applied, so a phase
    /// overflow only becomes visible on the following tick. `baseline` is
    /// clamped to `[0, 1000]` (non-finite counts as 0) and the emission never
    /// leaves `[0, 1000]`.
    pub fn advance(
        self,
        profile: &AlertnessProfile,
        baseline: f32,
        delta_ms: u64,
    ) -> (AlertnessState, f32) {
        let baseline = clamp_level(baseline).unwrap_or(0.0);
        let global_value = (baseline / LEVEL_MAX) * profile.global_influence();

        let Some(descriptor) = profile.descriptor(self.phase) else {
            return (self, global_value);
        };

        let state_value = descriptor.value_at(self.state_time);
        // a state built with `new` may sit past its duration and extrapolate
        let alertness = (global_value + state_value).clamp(0.0, LEVEL_MAX);

        let elapsed = u64::from(self.state_time).saturating_add(delta_ms);
        let next = if elapsed > u64::from(descriptor.duration) {
            let phase = self.phase.next();
            #[cfg(feature = "defmt")]
            defmt::debug!("ALERTNESS: {} -> {}", self.phase, phase);
            AlertnessState::new(phase, 0)
        } else {
            // elapsed <= duration, which fits in u32
            AlertnessState::new(self.phase, elapsed as u32)
        };

        (next, alertness)
    }

    /// Applies a positive trigger edge.
    pub fn triggered(self, profile: &AlertnessProfile) -> AlertnessState {
        let next = match self.phase {
            AlertnessPhase::Dormant => AlertnessState::new(AlertnessPhase::Waking, 0),
            AlertnessPhase::Waking => self,
            AlertnessPhase::Active => AlertnessState::new(AlertnessPhase::Active, 0),
            AlertnessPhase::Cooldown => {
                AlertnessState::new(AlertnessPhase::Waking, rewind_cooldown(profile, self.state_time))
            }
        };

        #[cfg(feature = "defmt")]
        {
            if next.phase != self.phase {
                defmt::debug!("ALERTNESS: trigger {} -> {}", self.phase, next.phase);
            }
        }

        next
    }
}

/// Maps cooldown progress onto the waking ramp so brightness continues
/// from where the cooldown left it.
fn rewind_cooldown(profile: &AlertnessProfile, cooldown_time: u32) -> u32 {
    let waking = profile.waking().duration as f32;
    let cooldown = profile.cooldown().duration as f32;
    let remapped = libm::roundf(waking - cooldown_time as f32 * (waking / cooldown));
    // float to int casts saturate, so overshoot below zero lands on 0
    remapped as u32
}

/// Produces a 0 to 1000 alertness level from trigger edges and a baseline.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct AlertnessEngine<'t, I: TimeInstant, T: TimeSource<I>> {
    clock: Clock<'t, I, T>,
    profile: AlertnessProfile,
    state: AlertnessState,
    baseline: f32,
    alertness: f32,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> AlertnessEngine<'t, I, T> {
    /// Creates a dormant engine with the default profile.
    pub fn new(time_source: &'t T) -> Self {
        Self::with_profile(time_source, AlertnessProfile::DEFAULT)
    }

    /// Creates a dormant engine with a custom profile.
    pub fn with_profile(time_source: &'t T, profile: AlertnessProfile) -> Self {
        Self {
            clock: Clock::new(time_source),
            profile,
            state: AlertnessState::DORMANT,
            baseline: 0.0,
            alertness: 0.0,
        }
    }

    /// Trigger port. Zero means no activity and is ignored.
    pub fn set_trigger(&mut self, value: i32) {
        if value == 0 {
            return;
        }
        self.state = self.state.triggered(&self.profile);
    }

    /// Baseline port, clamped to `[0, 1000]`.
    pub fn set_baseline(&mut self, value: i32) {
        self.baseline = value.clamp(0, LEVEL_MAX as i32) as f32;
    }

    /// Samples the clock, returns the alertness for this tick and advances the state.
    pub fn tick(&mut self) -> f32 {
        let delta = self.clock.sample();
        let (state, alertness) = self.state.advance(&self.profile, self.baseline, delta);
        self.state = state;
        self.alertness = alertness;
        alertness
    }

    /// Last emitted alertness.
    pub fn alertness(&self) -> f32 {
        self.alertness
    }

    /// Last delivered baseline.
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Current phase.
    pub fn phase(&self) -> AlertnessPhase {
        self.state.phase()
    }

    /// Current state.
    pub fn state(&self) -> AlertnessState {
        self.state
    }

    /// The profile in use.
    pub fn profile(&self) -> &AlertnessProfile {
        &self.profile
    }
}
