//! Wiring of the three stages into one breathing light.
//!
//! Provides [`BreathingPipeline`], which owns an alertness engine, a fade
//! oscillator, a color mapper and an LED, and forwards each stage's output to
//! the next one per cycle. Also defines the [`RgbLed`] trait for hardware
//! abstraction.

use crate::alertness::AlertnessEngine;
use crate::color::{ColorMapper, RgbIntensity};
use crate::command::PipelineInput;
use crate::fade::{FadeOscillator, FadeOutput};
use crate::time::{TimeInstant, TimeSource};
use crate::types::{AlertnessPhase, AlertnessProfile, ColorProfile, FadeProfile};

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.) to receive
/// the pipeline's output.
pub trait RgbLed {
    /// Sets the LED to the given channel intensities.
    ///
    /// Red spans `0..=MAX_RED`, blue `0..=MAX_BLUE` and green is always 0 with
    /// the default profile. Handle any hardware errors internally - this method
    /// cannot fail.
    fn set_intensity(&mut self, rgb: RgbIntensity);
}

/// Everything produced during one pipeline cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PipelineFrame {
    /// Alertness emitted by the state machine.
    pub alertness: f32,
    /// Brightness and rate emitted by the oscillator.
    pub fade: FadeOutput,
    /// Color emitted by the mapper.
    pub rgb: RgbIntensity,
}

/// Drives a single RGB LED from a trigger and a baseline.
///
/// Each stage keeps its own clock, so elapsed time is measured per stage even
/// though [`tick`](Self::tick) runs them back to back. Hosts that schedule the
/// stages at different cadences can reach them through the accessors and call
/// their `tick` methods directly.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `L` - LED implementation type
pub struct BreathingPipeline<'t, I: TimeInstant, T: TimeSource<I>, L: RgbLed> {
    led: L,
    alertness: AlertnessEngine<'t, I, T>,
    oscillator: FadeOscillator<'t, I, T>,
    mapper: ColorMapper,
    current: RgbIntensity,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, L: RgbLed> BreathingPipeline<'t, I, T, L> {
    /// Creates a dormant pipeline with default profiles and turns the LED off.
    pub fn new(led: L, time_source: &'t T) -> Self {
        Self::with_profiles(
            led,
            time_source,
            AlertnessProfile::DEFAULT,
            FadeProfile::DEFAULT,
            ColorProfile::DEFAULT,
        )
    }

    /// Creates a dormant pipeline with custom profiles and turns the LED off.
    pub fn with_profiles(
        mut led: L,
        time_source: &'t T,
        alertness: AlertnessProfile,
        fade: FadeProfile,
        color: ColorProfile,
    ) -> Self {
        led.set_intensity(RgbIntensity::OFF);

        Self {
            led,
            alertness: AlertnessEngine::with_profile(time_source, alertness),
            oscillator: FadeOscillator::with_profile(time_source, fade),
            mapper: ColorMapper::with_profile(color),
            current: RgbIntensity::OFF,
        }
    }

    /// Routes an input message to the matching port.
    pub fn handle_input(&mut self, input: PipelineInput) {
        match input {
            PipelineInput::Trigger(value) => self.set_trigger(value),
            PipelineInput::Baseline(value) => self.set_baseline(value),
        }
    }

    /// Trigger port. Zero is ignored.
    pub fn set_trigger(&mut self, value: i32) {
        self.alertness.set_trigger(value);
    }

    /// Baseline port.
    pub fn set_baseline(&mut self, value: i32) {
        self.alertness.set_baseline(value);
    }

    /// Runs one cycle: alertness, then fade, then color.
    ///
    /// The LED is only written when the color changed.
    pub fn tick(&mut self) -> PipelineFrame {
        let alertness = self.alertness.tick();
        self.oscillator.set_alertness(alertness);
        self.mapper.set_alertness(alertness);

        let fade = self.oscillator.tick();
        let rgb = self.mapper.set_fade(f32::from(fade.value));

        if rgb != self.current {
            self.led.set_intensity(rgb);
            self.current = rgb;
        }

        PipelineFrame {
            alertness,
            fade,
            rgb,
        }
    }

    /// Returns the color currently shown on the LED.
    pub fn current_intensity(&self) -> RgbIntensity {
        self.current
    }

    /// Returns the alertness phase.
    pub fn phase(&self) -> AlertnessPhase {
        self.alertness.phase()
    }

    /// Returns a reference to the alertness stage.
    pub fn alertness_engine(&self) -> &AlertnessEngine<'t, I, T> {
        &self.alertness
    }

    /// Returns a mutable reference to the alertness stage.
    pub fn alertness_engine_mut(&mut self) -> &mut AlertnessEngine<'t, I, T> {
        &mut self.alertness
    }

    /// Returns a reference to the fade stage.
    pub fn oscillator(&self) -> &FadeOscillator<'t, I, T> {
        &self.oscillator
    }

    /// Returns a mutable reference to the fade stage.
    pub fn oscillator_mut(&mut self) -> &mut FadeOscillator<'t, I, T> {
        &mut self.oscillator
    }

    /// Returns a reference to the color stage.
    pub fn color_mapper(&self) -> &ColorMapper {
        &self.mapper
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Returns a mutable reference to the LED.
    pub fn led_mut(&mut self) -> &mut L {
        &mut self.led
    }

    /// Consumes the pipeline and returns the LED.
    pub fn into_led(self) -> L {
        self.led
    }
}
