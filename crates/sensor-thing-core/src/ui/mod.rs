//! Screen rendering on embedded-graphics targets
//!
//! The screen is a single page drawn onto any `DrawTarget<Color = Rgb565>`:
//! a background filled with the mapped color, a title, one card per sensor
//! and a bar showing the current color.
//!
//! Drawing normally goes to a [`FrameBuffer`] first, which then flushes only
//! the changed rectangle to the real display.

mod card;
mod drawable;
mod framebuffer;
mod sensor_screen;
pub mod styling;

pub use card::SensorCard;
pub use drawable::Drawable;
pub use framebuffer::FrameBuffer;
pub use sensor_screen::{ScreenLayout, SensorScreen};

/// Display width in pixels (landscape).
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Display height in pixels (landscape).
pub const DISPLAY_HEIGHT_PX: u16 = 240;
