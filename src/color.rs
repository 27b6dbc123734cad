//! Alertness and fade to RGB intensity mapping.
//!
//! Red follows alertness, blue is a faint accent shown while calm, and both
//! are shaped by an in-out cubic curve applied to the fade brightness. Green
//! is reserved and always zero.

use crate::types::{ColorProfile, LEVEL_MAX, MAX_RED, clamp_level};
use palette::Srgb;

/// Integer channel intensities handed to the LED driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbIntensity {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl RgbIntensity {
    /// All channels off.
    pub const OFF: Self = Self {
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Creates an intensity triple.
    #[inline]
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    /// Normalizes against `full_scale` into a 0.0-1.0 `Srgb`.
    ///
    /// Channels above `full_scale` saturate at 1.0.
    pub fn to_srgb(&self, full_scale: u16) -> Srgb {
        let scale = f32::from(full_scale.max(1));
        let channel = |value: u16| (f32::from(value) / scale).min(1.0);
        Srgb::new(channel(self.red), channel(self.green), channel(self.blue))
    }
}

impl From<RgbIntensity> for Srgb {
    fn from(rgb: RgbIntensity) -> Self {
        rgb.to_srgb(MAX_RED)
    }
}

/// In-out cubic easing: slow start, fast middle, slow end.
#[inline]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        let t = -2.0 * x + 2.0;
        1.0 - t * t * t / 2.0
    }
}

/// Maps alertness and fade (both `[0, 1000]`) to channel intensities.
pub fn map(alertness: f32, fade: f32, profile: &ColorProfile) -> RgbIntensity {
    let calm = LEVEL_MAX - alertness;
    let intensity = ease_in_out_cubic(fade / LEVEL_MAX);

    let red = libm::roundf((alertness / LEVEL_MAX) * intensity * f32::from(profile.max_red));
    let blue = libm::roundf((calm / LEVEL_MAX) * intensity * f32::from(profile.max_blue));

    RgbIntensity {
        red: red as u16,
        green: 0,
        blue: blue as u16,
    }
}

/// Holds the latest inputs and the last computed color.
///
/// Only a fade update recomputes; an alertness update is stored for the next one.
#[derive(Debug, Clone)]
pub struct ColorMapper {
    profile: ColorProfile,
    alertness: f32,
    fade: f32,
    rgb: RgbIntensity,
}

impl ColorMapper {
    /// Creates a mapper with default channel limits, emitting off.
    pub fn new() -> Self {
        Self::with_profile(ColorProfile::DEFAULT)
    }

    /// Creates a mapper with custom channel limits.
    pub fn with_profile(profile: ColorProfile) -> Self {
        Self {
            profile,
            alertness: 0.0,
            fade: 0.0,
            rgb: RgbIntensity::OFF,
        }
    }

    /// Alertness port. Stores the value without recomputing.
    pub fn set_alertness(&mut self, alertness: f32) {
        if let Some(alertness) = clamp_level(alertness) {
            self.alertness = alertness;
        }
    }

    /// Fade port. Recomputes and returns the new color.
    ///
    /// A non-finite fade keeps the previous fade but still re-emits.
    pub fn set_fade(&mut self, fade: f32) -> RgbIntensity {
        if let Some(fade) = clamp_level(fade) {
            self.fade = fade;
        }
        self.rgb = map(self.alertness, self.fade, &self.profile);
        self.rgb
    }

    /// Re-emits the last computed color.
    pub fn tick(&self) -> RgbIntensity {
        self.rgb
    }

    /// Last delivered alertness.
    pub fn alertness(&self) -> f32 {
        self.alertness
    }

    /// Last delivered fade.
    pub fn fade(&self) -> f32 {
        self.fade
    }

    /// The profile in use.
    pub fn profile(&self) -> &ColorProfile {
        &self.profile
    }
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self::new()
    }
}
