//! Sensor abstractions
//!
//! The device exposes two ambient sensors. Readings are pushed by the
//! platform through a [`SensorListener`] at a platform-chosen cadence; the
//! [`SensorSource`] trait is the seam a platform adapter implements so that
//! the color mapping and screen logic never touch sensor lifecycle.

mod queued;

pub use queued::QueuedSensorSource;

use core::fmt;
use core::time::Duration;

use heapless::Vec;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Maximum raw values carried by a single [`SensorEvent`].
pub const MAX_EVENT_VALUES: usize = 3;

/// Ambient sensors shown on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Illuminance in lux
    Light,
    /// Ambient air temperature in °C
    AmbientTemperature,
}

impl SensorKind {
    pub const ALL: [SensorKind; 2] = [SensorKind::Light, SensorKind::AmbientTemperature];

    /// Unit suffix used when formatting a reading.
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Light => "lux",
            Self::AmbientTemperature => "°C",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::AmbientTemperature => "ambient temperature",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The most recent state of one sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorReading {
    /// The device has no such sensor.
    Unavailable,
    /// The sensor exists but has not reported yet.
    Measuring,
    /// Last reported value, in the sensor's unit.
    Present(f32),
}

impl SensorReading {
    pub const fn value(self) -> Option<f32> {
        match self {
            Self::Present(value) => Some(value),
            Self::Unavailable | Self::Measuring => None,
        }
    }

    pub const fn is_available(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// A batch of raw values pushed by the platform for one sensor.
///
/// Only the first value is meaningful for ambient light and temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub values: Vec<f32, MAX_EVENT_VALUES>,
}

impl SensorEvent {
    /// Event carrying a single value.
    pub fn new(kind: SensorKind, value: f32) -> Self {
        let mut values = Vec::new();
        // Capacity is at least one
        values.push(value).ok();
        Self { kind, values }
    }

    /// Event carrying no values.
    pub fn empty(kind: SensorKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
        }
    }

    pub fn first(&self) -> Option<f32> {
        self.values.first().copied()
    }
}

/// Requested delivery cadence. The platform may deliver faster or slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingRate {
    Fastest,
    Game,
    /// Cadence suited to on-screen updates.
    #[default]
    Ui,
    Normal,
}

impl SamplingRate {
    /// Nominal delay between two readings.
    pub const fn period(self) -> Duration {
        match self {
            Self::Fastest => Duration::ZERO,
            Self::Game => Duration::from_micros(20_000),
            Self::Ui => Duration::from_micros(66_667),
            Self::Normal => Duration::from_micros(200_000),
        }
    }
}

/// Errors raised while managing sensors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("No {kind} sensor on this device")]
    NotPresent { kind: SensorKind },
}

/// Receives readings pushed by a [`SensorSource`].
pub trait SensorListener {
    /// A sensor reported new values.
    fn on_sensor_changed(&mut self, event: &SensorEvent);
}

/// Platform capability that owns the sensor hardware.
///
/// Registration is expected to follow the foreground lifecycle: sensors are
/// registered while the screen is visible and all unregistered when it goes
/// to the background.
pub trait SensorSource {
    /// Whether the device has a sensor of this kind.
    fn has_sensor(&self, kind: SensorKind) -> bool;

    /// Start delivering readings for `kind`.
    fn register(&mut self, kind: SensorKind, rate: SamplingRate) -> Result<(), SensorError>;

    /// Stop delivering readings for every sensor.
    fn unregister_all(&mut self);

    /// Push all pending readings to `listener` and return how many were delivered.
    fn dispatch<L: SensorListener>(&mut self, listener: &mut L) -> usize;
}
