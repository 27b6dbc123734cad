#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`AlertnessEngine`**: State machine turning trigger edges and a baseline into a 0-1000 alertness level
//! - **`FadeOscillator`**: Triangle oscillator bouncing between 0 and 1000, faster when alert
//! - **`ColorMapper`**: Maps alertness and fade through an in-out cubic curve to red/green/blue intensities
//! - **`BreathingPipeline`**: Wires the three stages together and drives an LED
//! - **`RgbLed`**: Trait to implement for your LED hardware
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Clock`**: Per-stage elapsed-time tracker built on a `TimeSource`
//!
//! Every stage keeps its state in a small `Copy` struct with a pure `advance`
//! function, so the arithmetic can be tested without a clock.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod time;
pub mod types;
pub mod alertness;
pub mod fade;
pub mod color;
pub mod command;
pub mod pipeline;

pub use alertness::{AlertnessEngine, AlertnessState};
pub use color::{ColorMapper, RgbIntensity, ease_in_out_cubic};
pub use command::PipelineInput;
pub use fade::{FadeDirection, FadeOscillator, FadeOutput, OscillatorState};
pub use pipeline::{BreathingPipeline, PipelineFrame, RgbLed};
pub use time::{Clock, TimeDuration, TimeInstant, TimeSource};
pub use types::{
    AlertnessPhase, AlertnessProfile, AlertnessProfileBuilder, ColorProfile, FadeProfile,
    ProfileError, StateDescriptor, FAST_RATE, GLOBAL_INFLUENCE, LEVEL_MAX, MAX_BLUE, MAX_RED,
    SLOW_RATE,
};
