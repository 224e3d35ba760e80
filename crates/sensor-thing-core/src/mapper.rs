//! Sensor reading to color mapping
//!
//! Each sensor maps onto a piecewise-linear [`Gradient`]: the raw reading is
//! clamped to the sensor's range, normalized into `[0, 1]`, and interpolated
//! between the two [`ColorStop`]s that bracket it.
//!
//! | Sensor      | Range        | Stops                                        |
//! |-------------|--------------|----------------------------------------------|
//! | Light       | 0–20000 lux  | dark `0x12182D` @ 0, warm `0xE0A125` @ 0.45, bright `0xFFF4C2` @ 1 |
//! | Temperature | 0–45 °C      | cold `0x2C7BE5` @ 0, hot `0xE55353` @ 1      |
//!
//! The screen background is the light color blended toward the temperature
//! color (when one is known) by [`TEMPERATURE_BLEND_WEIGHT`].
//!
//! Everything here is pure: no state, no I/O, safe to call from any thread.

use crate::color::Color;

/// Illuminance that maps to the brightest stop.
pub const LIGHT_MAX_LUX: f32 = 20_000.0;

/// Temperature that maps to the hottest stop.
pub const TEMPERATURE_MAX_CELSIUS: f32 = 45.0;

/// Default weight of the temperature color over the light color.
pub const TEMPERATURE_BLEND_WEIGHT: f32 = 0.45;

pub const LIGHT_DARK: Color = Color::from_argb(0xFF12_182D);
pub const LIGHT_WARM: Color = Color::from_argb(0xFFE0_A125);
pub const LIGHT_BRIGHT: Color = Color::from_argb(0xFFFF_F4C2);

pub const TEMPERATURE_COLD: Color = Color::from_argb(0xFF2C_7BE5);
pub const TEMPERATURE_HOT: Color = Color::from_argb(0xFFE5_5353);

/// A reference color anchored at a normalized threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub threshold: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(threshold: f32, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// Piecewise-linear gradient over a clamped sensor range.
///
/// Stops must be sorted by threshold, start at 0 and end at 1.
#[derive(Debug, Clone, Copy)]
pub struct Gradient<'a> {
    /// Raw reading that normalizes to 1.0 (the lower bound is always 0).
    pub max: f32,
    pub stops: &'a [ColorStop],
}

pub const LIGHT_STOPS: [ColorStop; 3] = [
    ColorStop::new(0.0, LIGHT_DARK),
    ColorStop::new(0.45, LIGHT_WARM),
    ColorStop::new(1.0, LIGHT_BRIGHT),
];

pub const TEMPERATURE_STOPS: [ColorStop; 2] = [
    ColorStop::new(0.0, TEMPERATURE_COLD),
    ColorStop::new(1.0, TEMPERATURE_HOT),
];

pub const LIGHT_GRADIENT: Gradient<'static> = Gradient {
    max: LIGHT_MAX_LUX,
    stops: &LIGHT_STOPS,
};

pub const TEMPERATURE_GRADIENT: Gradient<'static> = Gradient {
    max: TEMPERATURE_MAX_CELSIUS,
    stops: &TEMPERATURE_STOPS,
};

impl Gradient<'_> {
    /// Clamp `value` to `[0, max]` and scale it into `[0, 1]`.
    ///
    /// NaN normalizes to 0 so the mapping stays total.
    pub fn normalize(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        value.clamp(0.0, self.max) / self.max
    }

    /// Index of the segment (`stops[i]..stops[i + 1]`) that owns `t`.
    ///
    /// A segment owns its lower threshold; a value sitting exactly on an
    /// inner stop belongs to the upper segment.
    pub fn segment_for(&self, t: f32) -> usize {
        let last = self.stops.len().saturating_sub(2);
        self.stops
            .windows(2)
            .position(|pair| t < pair[1].threshold)
            .unwrap_or(last)
    }

    /// Color at `fraction` along segment `index`.
    pub fn segment_color(&self, index: usize, fraction: f32) -> Color {
        let lower = self.stops[index];
        let upper = self.stops[index + 1];
        lower.color.lerp(upper.color, fraction)
    }

    /// Color for a normalized position `t` in `[0, 1]`.
    pub fn color_at(&self, t: f32) -> Color {
        match self.stops {
            [] => Color::BLACK,
            [only] => only.color,
            stops => {
                let index = self.segment_for(t);
                let lower = stops[index].threshold;
                let upper = stops[index + 1].threshold;
                self.segment_color(index, (t - lower) / (upper - lower))
            }
        }
    }

    /// Color for a raw sensor reading.
    pub fn map(&self, value: f32) -> Color {
        self.color_at(self.normalize(value))
    }
}

/// Map an illuminance in lux to a color on the dark/warm/bright gradient.
pub fn map_light_to_color(lux: f32) -> Color {
    LIGHT_GRADIENT.map(lux)
}

/// Map an ambient temperature in °C to a color on the cold/hot gradient.
pub fn map_temperature_to_color(temp_c: f32) -> Color {
    TEMPERATURE_GRADIENT.map(temp_c)
}

/// Mix `overlay` into `base`: `base * (1 - weight) + overlay * weight`.
///
/// `weight` is not clamped; values outside `[0, 1]` extrapolate and
/// saturate per channel.
pub fn blend(base: Color, overlay: Color, weight: f32) -> Color {
    base.lerp(overlay, weight)
}

/// Screen background for the current readings.
///
/// The light color is the base. A known temperature pulls it toward the
/// temperature color by `weight`.
pub fn background_color(lux: f32, temp_c: Option<f32>, weight: f32) -> Color {
    let base = map_light_to_color(lux);
    match temp_c {
        Some(temp_c) => blend(base, map_temperature_to_color(temp_c), weight),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_clamps_below_zero() {
        let dark = map_light_to_color(0.0);
        assert_eq!(dark, LIGHT_DARK);
        for lux in [-0.5, -1.0, -250.0, -1.0e9, f32::NEG_INFINITY] {
            assert_eq!(map_light_to_color(lux), dark, "lux {lux} should clamp to 0");
        }
    }

    #[test]
    fn test_light_clamps_above_max() {
        let bright = map_light_to_color(LIGHT_MAX_LUX);
        assert_eq!(bright, LIGHT_BRIGHT);
        for lux in [20_000.5, 25_000.0, 1.0e12, f32::INFINITY] {
            assert_eq!(
                map_light_to_color(lux),
                bright,
                "lux {lux} should clamp to max"
            );
        }
    }

    #[test]
    fn test_light_is_continuous_at_warm_stop() {
        let t = LIGHT_GRADIENT.normalize(9_000.0);
        assert_eq!(t, 0.45);

        let from_lower = LIGHT_GRADIENT.segment_color(0, 1.0);
        let from_upper = LIGHT_GRADIENT.segment_color(1, 0.0);
        assert_eq!(from_lower, LIGHT_WARM);
        assert_eq!(from_upper, LIGHT_WARM);
        assert_eq!(map_light_to_color(9_000.0), LIGHT_WARM);
    }

    #[test]
    fn test_light_has_no_jump_around_warm_stop() {
        let below = map_light_to_color(8_999.0);
        let above = map_light_to_color(9_001.0);
        for (a, b) in [
            (below.red, above.red),
            (below.green, above.green),
            (below.blue, above.blue),
        ] {
            assert!(a.abs_diff(b) <= 1, "channels {a} and {b} should be adjacent");
        }
    }

    #[test]
    fn test_light_3500_lux_is_closer_to_dark() {
        // t = 0.175, fraction 0.175 / 0.45 ≈ 0.389 along dark -> warm
        let color = map_light_to_color(3_500.0);
        assert_eq!(color, Color::rgb(98, 77, 42));

        let to_dark = color.red.abs_diff(LIGHT_DARK.red) as u32
            + color.green.abs_diff(LIGHT_DARK.green) as u32
            + color.blue.abs_diff(LIGHT_DARK.blue) as u32;
        let to_warm = color.red.abs_diff(LIGHT_WARM.red) as u32
            + color.green.abs_diff(LIGHT_WARM.green) as u32
            + color.blue.abs_diff(LIGHT_WARM.blue) as u32;
        assert!(to_dark < to_warm);
    }

    #[test]
    fn test_light_stays_within_segment_endpoints() {
        let mut lux = 0.0;
        while lux <= LIGHT_MAX_LUX {
            let color = map_light_to_color(lux);
            let (lo, hi) = if lux < 9_000.0 {
                (LIGHT_DARK, LIGHT_WARM)
            } else {
                (LIGHT_WARM, LIGHT_BRIGHT)
            };
            for (c, a, b) in [
                (color.red, lo.red, hi.red),
                (color.green, lo.green, hi.green),
                (color.blue, lo.blue, hi.blue),
            ] {
                assert!(c >= a.min(b) && c <= a.max(b), "lux {lux}: {c} outside {a}..{b}");
            }
            lux += 250.0;
        }
    }

    #[test]
    fn test_temperature_clamps_to_cold_and_hot() {
        for temp in [0.0, -0.1, -40.0, f32::NEG_INFINITY] {
            assert_eq!(map_temperature_to_color(temp), Color::from_argb(0xFF2C_7BE5));
        }
        for temp in [45.0, 45.1, 60.0, 1.0e6, f32::INFINITY] {
            assert_eq!(map_temperature_to_color(temp), Color::from_argb(0xFFE5_5353));
        }
    }

    #[test]
    fn test_temperature_24_is_closer_to_hot() {
        let color = map_temperature_to_color(24.0);
        assert_eq!(color, Color::rgb(143, 102, 151));
    }

    #[test]
    fn test_nan_maps_like_zero() {
        assert_eq!(map_light_to_color(f32::NAN), LIGHT_DARK);
        assert_eq!(map_temperature_to_color(f32::NAN), TEMPERATURE_COLD);
    }

    #[test]
    fn test_blend_identities() {
        let a = Color::from_argb(0xFF12_182D);
        let b = Color::from_argb(0xFFE5_5353);
        let weights = [
            -3.0,
            -0.5,
            0.0,
            0.2,
            0.45,
            0.5,
            0.99,
            1.0,
            1.5,
            10.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ];
        for w in weights {
            assert_eq!(blend(a, a, w), a, "blend(A, A, {w}) should be A");
        }
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
    }

    #[test]
    fn test_blend_does_not_clamp_weight() {
        let a = Color::rgb(100, 100, 100);
        let b = Color::rgb(120, 80, 100);
        assert_eq!(blend(a, b, 1.5), Color::rgb(130, 70, 100));
    }

    #[test]
    fn test_preview_background() {
        // 3500 lux base (98, 77, 42) pulled 45 % toward 24 °C (143, 102, 151)
        let background = background_color(3_500.0, Some(24.0), TEMPERATURE_BLEND_WEIGHT);
        assert_eq!(background, Color::rgb(118, 88, 91));
    }

    #[test]
    fn test_background_without_temperature_is_light_color() {
        assert_eq!(
            background_color(3_500.0, None, TEMPERATURE_BLEND_WEIGHT),
            map_light_to_color(3_500.0)
        );
    }

    #[test]
    fn test_segment_for_picks_upper_segment_on_inner_stop() {
        assert_eq!(LIGHT_GRADIENT.segment_for(0.0), 0);
        assert_eq!(LIGHT_GRADIENT.segment_for(0.449), 0);
        assert_eq!(LIGHT_GRADIENT.segment_for(0.45), 1);
        assert_eq!(LIGHT_GRADIENT.segment_for(1.0), 1);
        assert_eq!(TEMPERATURE_GRADIENT.segment_for(1.0), 0);
    }
}
