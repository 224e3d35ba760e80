//! The sensor screen.
//!
//! Layout (320x240, 10px margin, 8px gaps):
//! - title row, 20px
//! - light card, 60px
//! - temperature card, 60px
//! - color bar filling the rest

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::Drawable;
use super::card::SensorCard;
use super::styling::{CARD_HEIGHT_PX, CARD_RADIUS_PX, Spacing, TITLE_HEIGHT_PX, TextSize};
use crate::screen::ScreenModel;

/// Pixel rectangles of every screen section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub title: Rectangle,
    pub light_card: Rectangle,
    pub temperature_card: Rectangle,
    pub color_bar: Rectangle,
}

impl ScreenLayout {
    pub fn for_bounds(bounds: Rectangle) -> Self {
        let spacing = Spacing::default();
        let margin = spacing.large;
        let gap = spacing.medium;

        let x = bounds.top_left.x + margin as i32;
        let width = bounds.size.width.saturating_sub(2 * margin);
        let mut y = bounds.top_left.y + margin as i32;

        let mut take = |height: u32| {
            let rect = Rectangle::new(Point::new(x, y), Size::new(width, height));
            y += (height + gap) as i32;
            rect
        };

        let title = take(TITLE_HEIGHT_PX);
        let light_card = take(CARD_HEIGHT_PX);
        let temperature_card = take(CARD_HEIGHT_PX);

        let used = margin + TITLE_HEIGHT_PX + 2 * CARD_HEIGHT_PX + 3 * gap;
        let bar_height = bounds.size.height.saturating_sub(used + margin);
        let color_bar = take(bar_height);

        Self {
            title,
            light_card,
            temperature_card,
            color_bar,
        }
    }
}

pub struct SensorScreen {
    bounds: Rectangle,
    layout: ScreenLayout,
    model: ScreenModel,
    light_card: SensorCard,
    temperature_card: SensorCard,
    dirty: bool,
}

impl SensorScreen {
    pub fn new(bounds: Rectangle, model: ScreenModel) -> Self {
        let layout = ScreenLayout::for_bounds(bounds);
        Self {
            bounds,
            layout,
            light_card: SensorCard::new(layout.light_card, model.light.clone(), model.background),
            temperature_card: SensorCard::new(
                layout.temperature_card,
                model.temperature.clone(),
                model.background,
            ),
            model,
            dirty: true,
        }
    }

    /// Show a new model. Returns `true` if the screen needs a redraw.
    pub fn set_model(&mut self, model: ScreenModel) -> bool {
        if model == self.model {
            return false;
        }

        self.light_card.set_content(&model.light, model.background);
        self.temperature_card
            .set_content(&model.temperature, model.background);
        self.model = model;
        self.dirty = true;
        true
    }

    pub fn model(&self) -> &ScreenModel {
        &self.model
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    fn draw_color_bar<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let style = PrimitiveStyleBuilder::new()
            .fill_color(Rgb565::from(self.model.background))
            .stroke_color(Rgb565::WHITE)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();

        RoundedRectangle::with_equal_corners(
            self.layout.color_bar,
            Size::new(CARD_RADIUS_PX, CARD_RADIUS_PX),
        )
        .into_styled(style)
        .draw(display)?;

        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            self.model.color_bar,
            self.layout.color_bar.center(),
            MonoTextStyle::new(TextSize::Medium.font(), Rgb565::WHITE),
            text_style,
        )
        .draw(display)?;

        Ok(())
    }
}

impl Drawable for SensorScreen {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        display.fill_solid(&self.bounds, Rgb565::from(self.model.background))?;

        Text::with_baseline(
            self.model.title,
            self.layout.title.top_left,
            MonoTextStyle::new(TextSize::Large.font(), Rgb565::WHITE),
            Baseline::Top,
        )
        .draw(display)?;

        self.light_card.draw(display)?;
        self.temperature_card.draw(display)?;
        self.draw_color_bar(display)?;

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.light_card.is_dirty() || self.temperature_card.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.light_card.mark_clean();
        self.temperature_card.mark_clean();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.light_card.mark_dirty();
        self.temperature_card.mark_dirty();
    }
}
