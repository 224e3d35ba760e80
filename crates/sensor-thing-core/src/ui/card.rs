//! Sensor card: title, value and explanatory subtitle on a translucent surface

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use super::Drawable;
use super::styling::{
    CARD_RADIUS_PX, CARD_SURFACE_OPACITY, SUBTITLE_TEXT_OPACITY, Spacing, TITLE_TEXT_OPACITY,
    TextSize, over,
};
use crate::color::Color;
use crate::screen::CardModel;

pub struct SensorCard {
    bounds: Rectangle,
    card: CardModel,
    /// Page background the card surface is composited over.
    background: Color,
    dirty: bool,
}

impl SensorCard {
    pub fn new(bounds: Rectangle, card: CardModel, background: Color) -> Self {
        Self {
            bounds,
            card,
            background,
            dirty: true,
        }
    }

    /// Replace the content; marks the card dirty only if something changed.
    pub fn set_content(&mut self, card: &CardModel, background: Color) {
        if self.card != *card || self.background != background {
            self.card = card.clone();
            self.background = background;
            self.dirty = true;
        }
    }

    pub fn content(&self) -> &CardModel {
        &self.card
    }

    /// Card surface color after compositing.
    pub fn surface(&self) -> Color {
        over(Color::WHITE, CARD_SURFACE_OPACITY, self.background)
    }
}

impl Drawable for SensorCard {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let surface = self.surface();
        let spacing = Spacing::default();

        RoundedRectangle::with_equal_corners(
            self.bounds,
            Size::new(CARD_RADIUS_PX, CARD_RADIUS_PX),
        )
        .into_styled(PrimitiveStyle::with_fill(Rgb565::from(surface)))
        .draw(display)?;

        let text_width = self.bounds.size.width.saturating_sub(2 * spacing.medium);
        let x = self.bounds.top_left.x + spacing.medium as i32;
        let mut y = self.bounds.top_left.y + spacing.medium as i32;

        let lines = [
            (
                self.card.title,
                TextSize::Small,
                over(Color::WHITE, TITLE_TEXT_OPACITY, surface),
            ),
            (
                self.card.value.as_str(),
                TextSize::Medium.fit(&self.card.value, text_width),
                Color::WHITE,
            ),
            (
                self.card.subtitle,
                TextSize::Small,
                over(Color::WHITE, SUBTITLE_TEXT_OPACITY, surface),
            ),
        ];

        for (text, size, color) in lines {
            let style = MonoTextStyle::new(size.font(), Rgb565::from(color));
            Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(display)?;
            y += (size.line_height() + spacing.small) as i32;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
