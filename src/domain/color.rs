//! Risk-color mapping for win probabilities.
//!
//! [`color_for`] maps a risk level in `[0, 1]` onto a red-to-green ramp with a
//! fixed blue tint. Callers pass `1 - win_probability`, so a low chance of
//! winning lands near the red end.
//!
//! The ramp is only graded on `[0, 0.5)`. From the midpoint up, green is
//! saturated at 255; exactly at 0.5 red is 0, and above 0.5 a second term
//! brings red back in and fades it out again towards 1.0. This upper-half
//! shape is kept exactly as it is so existing displays do not change.

use std::fmt;

use serde::Serialize;

/// Blue channel shared by every risk color.
pub const RISK_BLUE: u8 = 60;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Renders as a CSS color, e.g. `rgb(117, 138, 60)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Map a risk level onto a display color.
///
/// The input is clamped to `[0, 1]`; NaN counts as 0. Channels are rounded
/// to the nearest integer, halves away from zero.
#[must_use]
pub fn color_for(p: f64) -> Rgb {
    let clamped = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let ramp = (2.0 * clamped).min(1.0);
    let upper = if clamped > 0.5 {
        255.0 * (1.0 - (clamped - 0.5) * 2.0)
    } else {
        0.0
    };

    let red = 255.0 * (1.0 - ramp) + upper;
    let green = 255.0 * ramp;

    Rgb::new(channel(red), channel(green), RISK_BLUE)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
