//! Hardware-independent core library for sensor-thing
//!
//! This crate contains all platform-agnostic logic for the sensor-thing
//! display: light/temperature color mapping, sensor source abstractions,
//! the foreground/background sensor session, screen formatting and
//! embedded-graphics rendering.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod color;
pub mod config;
pub mod mapper;
pub mod screen;
pub mod sensors;
pub mod session;
pub mod ui;

pub use color::Color;
pub use mapper::{blend, map_light_to_color, map_temperature_to_color};
pub use sensors::{SensorKind, SensorReading};
