//! Core types shared by the pipeline stages.

/// Upper bound of every normalized signal in the pipeline.
pub const LEVEL_MAX: f32 = 1000.0;

/// Minimum alertness contributed by a full baseline.
pub const GLOBAL_INFLUENCE: f32 = 50.0;

/// Full 0 to 1000 sweep time at maximum alertness, in milliseconds.
pub const FAST_RATE: u32 = 150;

/// Full 0 to 1000 sweep time at zero alertness, in milliseconds.
pub const SLOW_RATE: u32 = 1200;

/// Red channel full scale.
pub const MAX_RED: u16 = 1024;

/// Blue channel full scale.
pub const MAX_BLUE: u16 = 50;

/// Phase of the alertness state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertnessPhase {
    /// Idle. Only the baseline floor is emitted.
    #[default]
    Dormant,
    /// Ramping up after a trigger.
    Waking,
    /// Holding the plateau.
    Active,
    /// Decaying back towards dormant.
    Cooldown,
}

impl AlertnessPhase {
    /// Phase entered when the current one runs out of time.
    pub fn next(self) -> AlertnessPhase {
        match self {
            AlertnessPhase::Dormant => AlertnessPhase::Dormant,
            AlertnessPhase::Waking => AlertnessPhase::Active,
            AlertnessPhase::Active => AlertnessPhase::Cooldown,
            AlertnessPhase::Cooldown => AlertnessPhase::Dormant,
        }
    }

    /// Slot in the descriptor table, `None` when dormant.
    pub(crate) fn slot(self) -> Option<usize> {
        match self {
            AlertnessPhase::Dormant => None,
            AlertnessPhase::Waking => Some(0),
            AlertnessPhase::Active => Some(1),
            AlertnessPhase::Cooldown => Some(2),
        }
    }
}

/// Ramp target values and interpolation time for one alertness phase.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateDescriptor {
    /// Value at phase entry.
    pub start: f32,

    /// Value at phase exit.
    pub end: f32,

    /// Phase duration in milliseconds.
    pub duration: u32,
}

impl StateDescriptor {
    /// Creates a new state descriptor.
    #[inline]
    pub const fn new(start: f32, end: f32, duration: u32) -> Self {
        Self {
            start,
            end,
            duration,
        }
    }

    /// Linear interpolation at `elapsed` milliseconds, not clamped to the phase.
    #[inline]
    pub fn value_at(&self, elapsed: u32) -> f32 {
        let progress = elapsed as f32 / self.duration as f32;
        self.start + (self.end - self.start) * progress
    }
}

/// Timing and influence constants for the alertness state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertnessProfile {
    global_influence: f32,
    states: [StateDescriptor; 3],
}

impl AlertnessProfile {
    /// Wake in 800ms, hold for 3s, cool down over 3s.
    pub const DEFAULT: Self = Self {
        global_influence: GLOBAL_INFLUENCE,
        states: [
            StateDescriptor::new(0.0, 1000.0, 800),
            StateDescriptor::new(1000.0, 1000.0, 3000),
            StateDescriptor::new(1000.0, 0.0, 3000),
        ],
    };

    /// Creates a builder seeded with the default profile.
    pub fn builder() -> AlertnessProfileBuilder {
        AlertnessProfileBuilder::new()
    }

    /// Alertness floor reached with a full baseline.
    pub fn global_influence(&self) -> f32 {
        self.global_influence
    }

    /// Descriptor for a ramp phase, `None` for dormant.
    pub fn descriptor(&self, phase: AlertnessPhase) -> Option<&StateDescriptor> {
        phase.slot().map(|slot| &self.states[slot])
    }

    pub(crate) fn waking(&self) -> &StateDescriptor {
        &self.states[0]
    }

    pub(crate) fn cooldown(&self) -> &StateDescriptor {
        &self.states[2]
    }
}

impl Default for AlertnessProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builder for validated alertness profiles.
#[derive(Debug)]
pub struct AlertnessProfileBuilder {
    profile: AlertnessProfile,
}

impl AlertnessProfileBuilder {
    /// Creates a builder holding the default profile.
    pub fn new() -> Self {
        Self {
            profile: AlertnessProfile::DEFAULT,
        }
    }

    /// Sets the alertness floor reached with a full baseline.
    pub fn global_influence(mut self, influence: f32) -> Self {
        self.profile.global_influence = influence;
        self
    }

    /// Replaces the descriptor of a ramp phase. Dormant has no descriptor and is ignored.
    pub fn state(mut self, phase: AlertnessPhase, descriptor: StateDescriptor) -> Self {
        if let Some(slot) = phase.slot() {
            self.profile.states[slot] = descriptor;
        }
        self
    }

    /// Builds and validates the profile.
    ///
    /// # Errors
    /// * `InfluenceOutOfRange` - Influence is non-finite or outside `[0, 1000]`
    /// * `ZeroStateDuration` - A ramp phase has a zero duration
    /// * `StateValueOutOfRange` - A ramp phase starts or ends outside `[0, 1000]`
    pub fn build(self) -> Result<AlertnessProfile, ProfileError> {
        if !is_level(self.profile.global_influence) {
            return Err(ProfileError::InfluenceOutOfRange);
        }

        for phase in [
            AlertnessPhase::Waking,
            AlertnessPhase::Active,
            AlertnessPhase::Cooldown,
        ] {
            if let Some(descriptor) = self.profile.descriptor(phase) {
                if descriptor.duration == 0 {
                    return Err(ProfileError::ZeroStateDuration(phase));
                }
                if !is_level(descriptor.start) || !is_level(descriptor.end) {
                    return Err(ProfileError::StateValueOutOfRange(phase));
                }
            }
        }

        Ok(self.profile)
    }
}

impl Default for AlertnessProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Sweep rates of the fade oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeProfile {
    fast_rate: u32,
    slow_rate: u32,
}

impl FadeProfile {
    /// 150ms sweeps when fully alert, 1200ms when calm.
    pub const DEFAULT: Self = Self {
        fast_rate: FAST_RATE,
        slow_rate: SLOW_RATE,
    };

    /// Creates a validated profile.
    ///
    /// # Errors
    /// * `ZeroFadeRate` - Either rate is zero
    /// * `InvertedFadeRates` - `fast_rate` is slower than `slow_rate`
    pub fn new(fast_rate: u32, slow_rate: u32) -> Result<Self, ProfileError> {
        if fast_rate == 0 || slow_rate == 0 {
            return Err(ProfileError::ZeroFadeRate);
        }
        if fast_rate > slow_rate {
            return Err(ProfileError::InvertedFadeRates);
        }

        Ok(Self {
            fast_rate,
            slow_rate,
        })
    }

    /// Sweep time at maximum alertness.
    pub fn fast_rate(&self) -> u32 {
        self.fast_rate
    }

    /// Sweep time at zero alertness.
    pub fn slow_rate(&self) -> u32 {
        self.slow_rate
    }

    /// Milliseconds for a full 0 to 1000 sweep at the given alertness.
    ///
    /// Alertness is clamped to `[0, 1000]` (non-finite counts as 0), so the
    /// result always lies between the fast and slow rates.
    pub fn rate_at(&self, alertness: f32) -> f32 {
        let alertness = clamp_level(alertness).unwrap_or(0.0);
        let span = (self.slow_rate - self.fast_rate) as f32;
        self.slow_rate as f32 - span * (alertness / LEVEL_MAX)
    }
}

impl Default for FadeProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Channel full-scale values for the color mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorProfile {
    /// Red intensity at full alertness and full fade.
    pub max_red: u16,

    /// Blue intensity at zero alertness and full fade.
    pub max_blue: u16,
}

impl ColorProfile {
    /// Red up to 1024, blue up to 50.
    pub const DEFAULT: Self = Self {
        max_red: MAX_RED,
        max_blue: MAX_BLUE,
    };
}

impl Default for ColorProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Profile validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProfileError {
    /// A ramp phase was given a zero duration.
    ZeroStateDuration(AlertnessPhase),

    /// Global influence is non-finite or outside `[0, 1000]`.
    InfluenceOutOfRange,

    /// A ramp phase starts or ends outside `[0, 1000]`.
    StateValueOutOfRange(AlertnessPhase),

    /// A fade rate of zero milliseconds.
    ZeroFadeRate,

    /// Fast rate is longer than the slow rate.
    InvertedFadeRates,
}

impl core::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProfileError::ZeroStateDuration(phase) => {
                write!(f, "{:?} phase must have a non-zero duration", phase)
            }
            ProfileError::InfluenceOutOfRange => {
                write!(f, "global influence must lie within 0-1000")
            }
            ProfileError::StateValueOutOfRange(phase) => {
                write!(f, "{:?} phase start and end must lie within 0-1000", phase)
            }
            ProfileError::ZeroFadeRate => {
                write!(f, "fade rates must be non-zero")
            }
            ProfileError::InvertedFadeRates => {
                write!(f, "fast fade rate must not exceed the slow fade rate")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}

/// Clamps a level input to `[0, 1000]`, rejecting non-finite values.
#[inline]
pub(crate) fn clamp_level(value: f32) -> Option<f32> {
    if value.is_finite() {
        Some(value.clamp(0.0, LEVEL_MAX))
    } else {
        None
    }
}

/// True for finite values within `[0, 1000]`.
#[inline]
fn is_level(value: f32) -> bool {
    value.is_finite() && (0.0..=LEVEL_MAX).contains(&value)
}
