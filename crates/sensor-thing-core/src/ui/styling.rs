//! Layout metrics, fonts and tints for the sensor screen
//!
//! Text and card surfaces are white drawn with partial opacity over the
//! mapped background. Displays have no alpha channel, so the opacity is
//! resolved up front with [`over`].

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_9X15, FONT_10X20};

use crate::color::Color;

// ============================================================================
// Spacing
// ============================================================================

/// Standard spacing scale for consistent layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Small spacing (4px) - between lines inside a card
    pub small: u32,

    /// Medium spacing (8px) - card padding and gaps between sections
    pub medium: u32,

    /// Large spacing (10px) - page margin
    pub large: u32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            small: 4,
            medium: 8,
            large: 10,
        }
    }
}

/// Corner radius of cards and the color bar.
pub const CARD_RADIUS_PX: u32 = 8;

/// Height of a sensor card.
pub const CARD_HEIGHT_PX: u32 = 60;

/// Height of the page title row.
pub const TITLE_HEIGHT_PX: u32 = 20;

// ============================================================================
// Text
// ============================================================================

/// Text size variants
///
/// ISO-8859-1 fonts so that accented labels and the degree sign render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    /// 6x10
    Small,
    /// 9x15
    Medium,
    /// 10x20
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_6X10,
            TextSize::Medium => &FONT_9X15,
            TextSize::Large => &FONT_10X20,
        }
    }

    pub fn line_height(&self) -> u32 {
        self.font().character_size.height
    }

    /// Width of `text` set in this size, in pixels.
    pub fn text_width(&self, text: &str) -> u32 {
        let font = self.font();
        let glyphs = text.chars().count() as u32;
        glyphs * font.character_size.width + glyphs.saturating_sub(1) * font.character_spacing
    }

    /// This size, or the next smaller one that fits `text` in `max_width`.
    ///
    /// Falls back to [`TextSize::Small`] even if that still overflows.
    pub fn fit(self, text: &str, max_width: u32) -> TextSize {
        let mut size = self;
        loop {
            if size.text_width(text) <= max_width {
                return size;
            }
            size = match size {
                TextSize::Large => TextSize::Medium,
                TextSize::Medium | TextSize::Small => return TextSize::Small,
            };
        }
    }
}

// ============================================================================
// Tints
// ============================================================================

/// Opacity of the card surface over the background.
pub const CARD_SURFACE_OPACITY: f32 = 0.16;

/// Opacity of card titles.
pub const TITLE_TEXT_OPACITY: f32 = 0.9;

/// Opacity of card subtitles.
pub const SUBTITLE_TEXT_OPACITY: f32 = 0.85;

/// `foreground` painted with `opacity` over an opaque `background`.
pub fn over(foreground: Color, opacity: f32, background: Color) -> Color {
    background.lerp(foreground.with_alpha(background.alpha), opacity)
}
