//! Color value type
//!
//! Colors are stored as 8-bit RGBA and built from packed `0xAARRGGBB`
//! literals. Interpolation happens per channel in floating point and the
//! result is rounded back to 8 bits, so identical endpoints always yield
//! the endpoint itself.
//!
//! For display, a [`Color`] converts into the embedded-graphics
//! [`Rgb888`] and [`Rgb565`] types (alpha is dropped; compositing is done
//! beforehand with [`Color::lerp`]).

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

/// An immutable RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_argb(0xFFFF_FFFF);
    pub const BLACK: Color = Color::from_argb(0xFF00_0000);

    /// Opaque color from its RGB channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0xFF,
        }
    }

    /// Color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            alpha: (argb >> 24) as u8,
            red: (argb >> 16) as u8,
            green: (argb >> 8) as u8,
            blue: argb as u8,
        }
    }

    /// Packed `0xAARRGGBB` value.
    pub const fn to_argb(self) -> u32 {
        ((self.alpha as u32) << 24)
            | ((self.red as u32) << 16)
            | ((self.green as u32) << 8)
            | self.blue as u32
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }

    /// Linear interpolation per channel: `self * (1 - fraction) + other * fraction`.
    ///
    /// `fraction` is not clamped. Values outside `[0, 1]` extrapolate and the
    /// resulting channels saturate at 0 and 255.
    pub fn lerp(self, other: Color, fraction: f32) -> Color {
        Color {
            red: lerp_channel(self.red, other.red, fraction),
            green: lerp_channel(self.green, other.green, fraction),
            blue: lerp_channel(self.blue, other.blue, fraction),
            alpha: lerp_channel(self.alpha, other.alpha, fraction),
        }
    }
}

fn lerp_channel(start: u8, stop: u8, fraction: f32) -> u8 {
    // Also covers infinite and NaN fractions, where 0 * fraction is NaN
    if start == stop {
        return start;
    }
    let start = start as f32;
    let value = start + (stop as f32 - start) * fraction;
    // `as` saturates, and maps NaN to 0
    (value + 0.5) as u8
}

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.red, color.green, color.blue)
    }
}

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        Rgb565::new(color.red >> 3, color.green >> 2, color.blue >> 3)
    }
}

impl From<Rgb888> for Color {
    fn from(color: Rgb888) -> Self {
        Color::rgb(color.r(), color.g(), color.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_argb_unpacks_channels() {
        let color = Color::from_argb(0xFF12_182D);
        assert_eq!(color, Color::rgb(0x12, 0x18, 0x2D));
        assert_eq!(color.to_argb(), 0xFF12_182D);
    }

    #[test]
    fn test_lerp_endpoints_are_exact() {
        let a = Color::from_argb(0xFF2C_7BE5);
        let b = Color::from_argb(0xFFE5_5353);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        // 127.5 rounds up
        assert_eq!(mid, Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_lerp_extrapolation_saturates() {
        let a = Color::rgb(100, 100, 100);
        let b = Color::rgb(200, 50, 100);
        let over = a.lerp(b, 2.0);
        assert_eq!(over, Color::rgb(255, 0, 100));
        let under = a.lerp(b, -1.0);
        assert_eq!(under, Color::rgb(0, 150, 100));
    }

    #[test]
    fn test_rgb565_conversion_drops_low_bits() {
        let color: Rgb565 = Color::rgb(0xFF, 0xFF, 0xFF).into();
        assert_eq!(color, Rgb565::new(31, 63, 31));
        let color: Rgb565 = Color::rgb(0x12, 0x18, 0x2D).into();
        assert_eq!(color, Rgb565::new(0x12 >> 3, 0x18 >> 2, 0x2D >> 3));
    }
}
