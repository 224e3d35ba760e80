//! Screen state and presentation model
//!
//! [`ScreenState`] keeps the most recent reading of each sensor and is fed
//! directly by a [`SensorSource`](crate::sensors::SensorSource) as its
//! [`SensorListener`]. [`ScreenState::model`] turns it into a
//! [`ScreenModel`]: the background color plus the text shown on each card.

use core::fmt::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::mapper::{TEMPERATURE_BLEND_WEIGHT, background_color};
use crate::sensors::{SensorEvent, SensorKind, SensorListener, SensorReading};

/// Capacity of a formatted card value.
pub const VALUE_TEXT_CAPACITY: usize = 48;

pub type ValueText = heapless::String<VALUE_TEXT_CAPACITY>;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    Spanish,
    English,
}

/// All user-visible strings of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub light_title: &'static str,
    pub light_subtitle: &'static str,
    pub light_unavailable: &'static str,
    pub temperature_title: &'static str,
    pub temperature_subtitle: &'static str,
    pub temperature_unavailable: &'static str,
    pub measuring: &'static str,
    pub color_bar: &'static str,
}

impl Labels {
    pub const SPANISH: Labels = Labels {
        title: "Sensor Thing",
        light_title: "Luz",
        light_subtitle: "El color base cambia según la luz ambiente.",
        light_unavailable: "No disponible",
        temperature_title: "Temperatura ambiente",
        temperature_subtitle: "Si existe sensor, también influye en el color.",
        temperature_unavailable: "No disponible en este dispositivo",
        measuring: "Midiendo...",
        color_bar: "Color actual",
    };

    pub const ENGLISH: Labels = Labels {
        title: "Sensor Thing",
        light_title: "Light",
        light_subtitle: "The base color follows the ambient light.",
        light_unavailable: "Not available",
        temperature_title: "Ambient temperature",
        temperature_subtitle: "If present, the sensor also tints the color.",
        temperature_unavailable: "Not available on this device",
        measuring: "Measuring...",
        color_bar: "Current color",
    };

    pub const fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Spanish => &Self::SPANISH,
            Locale::English => &Self::ENGLISH,
        }
    }

    fn unavailable(&self, kind: SensorKind) -> &'static str {
        match kind {
            SensorKind::Light => self.light_unavailable,
            SensorKind::AmbientTemperature => self.temperature_unavailable,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::SPANISH
    }
}

/// Round to the nearest integer, halves toward positive infinity.
///
/// Saturates at the `i32` bounds; NaN rounds to 0.
pub fn round_half_up(value: f32) -> i32 {
    let shifted = value + 0.5;
    let truncated = shifted as i32;
    // `as` truncates toward zero; step down to get the floor of negatives
    if (truncated as f32) > shifted {
        truncated - 1
    } else {
        truncated
    }
}

/// Format a reading for display: `"3500 lux"`, `"24 °C"` or a placeholder.
pub fn format_reading(kind: SensorKind, reading: SensorReading, labels: &Labels) -> ValueText {
    let mut text = ValueText::new();
    match reading {
        SensorReading::Present(value) => {
            write!(text, "{} {}", round_half_up(value), kind.unit()).ok();
        }
        SensorReading::Measuring => {
            text.push_str(labels.measuring).ok();
        }
        SensorReading::Unavailable => {
            text.push_str(labels.unavailable(kind)).ok();
        }
    }
    text
}

/// Content of one sensor card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardModel {
    pub title: &'static str,
    pub value: ValueText,
    pub subtitle: &'static str,
}

/// Everything the screen renders for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenModel {
    pub background: Color,
    pub title: &'static str,
    pub light: CardModel,
    pub temperature: CardModel,
    pub color_bar: &'static str,
}

/// Most recent readings of both sensors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenState {
    pub light: SensorReading,
    pub temperature: SensorReading,
    /// Weight of the temperature color in the background blend.
    pub temperature_weight: f32,
}

impl ScreenState {
    /// Initial state for a device with the given sensors.
    ///
    /// An existing light sensor starts at 0 lux so the background is defined
    /// before the first reading; temperature waits for its first report.
    pub fn new(has_light: bool, has_temperature: bool) -> Self {
        Self {
            light: if has_light {
                SensorReading::Present(0.0)
            } else {
                SensorReading::Unavailable
            },
            temperature: if has_temperature {
                SensorReading::Measuring
            } else {
                SensorReading::Unavailable
            },
            temperature_weight: TEMPERATURE_BLEND_WEIGHT,
        }
    }

    pub fn with_temperature_weight(mut self, weight: f32) -> Self {
        self.temperature_weight = weight;
        self
    }

    pub fn reading(&self, kind: SensorKind) -> SensorReading {
        match kind {
            SensorKind::Light => self.light,
            SensorKind::AmbientTemperature => self.temperature,
        }
    }

    /// Mark a sensor as missing, e.g. after its registration failed.
    pub fn set_unavailable(&mut self, kind: SensorKind) {
        match kind {
            SensorKind::Light => self.light = SensorReading::Unavailable,
            SensorKind::AmbientTemperature => self.temperature = SensorReading::Unavailable,
        }
    }

    /// Apply one pushed event.
    ///
    /// A light event without values keeps the previous lux; a temperature
    /// event without values goes back to measuring. Events for sensors marked
    /// unavailable are ignored.
    pub fn apply(&mut self, event: &SensorEvent) {
        if !self.reading(event.kind).is_available() {
            debug!("Ignoring event for unavailable {} sensor", event.kind);
            return;
        }

        match event.kind {
            SensorKind::Light => {
                if let Some(lux) = event.first() {
                    self.light = SensorReading::Present(lux);
                }
            }
            SensorKind::AmbientTemperature => {
                self.temperature = match event.first() {
                    Some(temp_c) => SensorReading::Present(temp_c),
                    None => SensorReading::Measuring,
                };
            }
        }
    }

    /// Background color for the current readings.
    pub fn background(&self) -> Color {
        background_color(
            self.light.value().unwrap_or(0.0),
            self.temperature.value(),
            self.temperature_weight,
        )
    }

    /// Build the presentation model.
    pub fn model(&self, labels: &Labels) -> ScreenModel {
        ScreenModel {
            background: self.background(),
            title: labels.title,
            light: CardModel {
                title: labels.light_title,
                value: format_reading(SensorKind::Light, self.light, labels),
                subtitle: labels.light_subtitle,
            },
            temperature: CardModel {
                title: labels.temperature_title,
                value: format_reading(SensorKind::AmbientTemperature, self.temperature, labels),
                subtitle: labels.temperature_subtitle,
            },
            color_bar: labels.color_bar,
        }
    }
}

impl SensorListener for ScreenState {
    fn on_sensor_changed(&mut self, event: &SensorEvent) {
        self.apply(event);
    }
}
