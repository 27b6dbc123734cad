//! Alertness-modulated triangle oscillator.

use crate::time::{Clock, TimeInstant, TimeSource};
use crate::types::{FadeProfile, LEVEL_MAX, clamp_level};

const FADE_MAX: i32 = LEVEL_MAX as i32;

/// Direction the fade value is travelling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeDirection {
    /// Towards 1000.
    #[default]
    Rising,
    /// Towards 0.
    Falling,
}

impl FadeDirection {
    /// `+1.0` when rising, `-1.0` when falling.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            FadeDirection::Rising => 1.0,
            FadeDirection::Falling => -1.0,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            FadeDirection::Rising => FadeDirection::Falling,
            FadeDirection::Falling => FadeDirection::Rising,
        }
    }
}

/// Values emitted by the oscillator each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeOutput {
    /// Brightness in `[0, 1000]`.
    pub value: u16,

    /// Signed rate of change per millisecond.
    pub speed: f32,
}

/// Oscillator position, rate and direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OscillatorState {
    fade_value: i32,
    fade_speed: f32,
    direction: FadeDirection,
}

impl OscillatorState {
    /// At zero, stationary, rising.
    pub const START: Self = Self {
        fade_value: 0,
        fade_speed: 0.0,
        direction: FadeDirection::Rising,
    };

    /// Creates a state from raw parts. Out-of-range values are clipped on the next tick.
    pub fn new(fade_value: i32, fade_speed: f32, direction: FadeDirection) -> Self {
        Self {
            fade_value,
            fade_speed,
            direction,
        }
    }

    /// Returns the brightness reached on the last tick.
    pub fn fade_value(&self) -> i32 {
        self.fade_value
    }

    /// Returns the speed that the next tick integrates with.
    pub fn fade_speed(&self) -> f32 {
        self.fade_speed
    }

    /// Returns the direction of travel.
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    /// Integrates one tick and returns the next state with its outputs.
    ///
    /// Position moves with the speed derived on the previous tick; the new
    /// speed only takes effect on the next one. Alertness outside `[0, 1000]`
    /// is clamped by [`FadeProfile::rate_at`].
    pub fn advance(
        self,
        profile: &FadeProfile,
        alertness: f32,
        delta_ms: u64,
    ) -> (OscillatorState, FadeOutput) {
        let rate = profile.rate_at(alertness);

        let moved = libm::roundf(self.fade_value as f32 + self.fade_speed * delta_ms as f32);
        let mut fade_value = moved as i32;
        let fade_speed = self.direction.sign() * LEVEL_MAX / rate;
        let mut direction = self.direction;

        if fade_value >= FADE_MAX && direction == FadeDirection::Rising {
            direction = direction.reversed();
            fade_value = FADE_MAX;
            #[cfg(feature = "defmt")]
            defmt::debug!("FADE: bounce at top");
        } else if fade_value <= 0 && direction == FadeDirection::Falling {
            direction = direction.reversed();
            fade_value = 0;
            #[cfg(feature = "defmt")]
            defmt::debug!("FADE: bounce at bottom");
        } else if fade_value <= 0 {
            // overshoot while already turning around, clip only
            fade_value = 0;
        } else if fade_value >= FADE_MAX {
            fade_value = FADE_MAX;
        }

        let next = OscillatorState {
            fade_value,
            fade_speed,
            direction,
        };
        let output = FadeOutput {
            value: fade_value as u16,
            speed: fade_speed,
        };

        (next, output)
    }
}

/// Bouncing 0 to 1000 brightness whose sweep time follows alertness.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
pub struct FadeOscillator<'t, I: TimeInstant, T: TimeSource<I>> {
    clock: Clock<'t, I, T>,
    profile: FadeProfile,
    state: OscillatorState,
    alertness: f32,
}

impl<'t, I: TimeInstant, T: TimeSource<I>> FadeOscillator<'t, I, T> {
    /// Creates an oscillator at zero with the default rates.
    pub fn new(time_source: &'t T) -> Self {
        Self::with_profile(time_source, FadeProfile::DEFAULT)
    }

    /// Creates an oscillator at zero with custom rates.
    pub fn with_profile(time_source: &'t T, profile: FadeProfile) -> Self {
        Self {
            clock: Clock::new(time_source),
            profile,
            state: OscillatorState::START,
            alertness: 0.0,
        }
    }

    /// Alertness port, clamped to `[0, 1000]`. Non-finite values are ignored.
    pub fn set_alertness(&mut self, alertness: f32) {
        if let Some(alertness) = clamp_level(alertness) {
            self.alertness = alertness;
        }
    }

    /// Overrides the oscillator state, e.g. to resynchronise several lights.
    pub fn reset(&mut self, state: OscillatorState) {
        self.state = state;
    }

    /// Samples the clock and advances the oscillator.
    pub fn tick(&mut self) -> FadeOutput {
        let delta = self.clock.sample();
        let (state, output) = self.state.advance(&self.profile, self.alertness, delta);
        self.state = state;
        output
    }

    /// Last delivered alertness.
    pub fn alertness(&self) -> f32 {
        self.alertness
    }

    /// Current state.
    pub fn state(&self) -> OscillatorState {
        self.state
    }

    /// The profile in use.
    pub fn profile(&self) -> &FadeProfile {
        &self.profile
    }
}
