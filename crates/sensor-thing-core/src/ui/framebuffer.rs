//! RAM framebuffer with change tracking.
//!
//! The screen is drawn here first. After a frame, only the bounding box of
//! pixels that actually changed is pushed to the display in one
//! `fill_contiguous` call. Background color changes repaint most of the
//! screen, but a steady reading costs nothing.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use super::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const WIDTH: usize = DISPLAY_WIDTH_PX as usize;
const HEIGHT: usize = DISPLAY_HEIGHT_PX as usize;

/// Full-screen `Rgb565` buffer implementing `DrawTarget`.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    /// Top-left and bottom-right corners of the changed area, inclusive.
    changed: Option<(Point, Point)>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Allocate a black framebuffer.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; WIDTH * HEIGHT],
            changed: None,
        }
    }

    /// Color at `(x, y)`, or `None` outside the screen.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        (x < WIDTH && y < HEIGHT).then(|| self.pixels[y * WIDTH + x])
    }

    /// Area that changed since the last flush.
    pub fn changed_area(&self) -> Option<Rectangle> {
        self.changed
            .map(|(top_left, bottom_right)| Rectangle::with_corners(top_left, bottom_right))
    }

    fn store(&mut self, point: Point, color: Rgb565) {
        let Some(idx) = index_of(point) else {
            return;
        };
        if self.pixels[idx] == color {
            return;
        }
        self.pixels[idx] = color;
        self.changed = Some(match self.changed {
            Some((top_left, bottom_right)) => (
                top_left.component_min(point),
                bottom_right.component_max(point),
            ),
            None => (point, point),
        });
    }

    /// Push the changed area to `display` and reset change tracking.
    ///
    /// No-op when nothing changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(area) = self.changed_area() else {
            return Ok(());
        };
        self.changed = None;

        debug!(
            "Flushing {}x{} region at ({}, {})",
            area.size.width, area.size.height, area.top_left.x, area.top_left.y
        );

        let pixels = &self.pixels;
        let colors = area.rows().flat_map(move |y| {
            area.columns()
                .map(move |x| pixels[y as usize * WIDTH + x as usize])
        });

        display.fill_contiguous(&area, colors)
    }
}

/// Buffer index of `point`, if it lies on the screen.
fn index_of(point: Point) -> Option<usize> {
    let x = usize::try_from(point.x).ok()?;
    let y = usize::try_from(point.y).ok()?;
    (x < WIDTH && y < HEIGHT).then_some(y * WIDTH + x)
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.store(point, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        for point in area.intersection(&self.bounding_box()).points() {
            self.store(point, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    /// Records the area of every `fill_contiguous` call.
    struct RecordingDisplay {
        fills: Vec<Rectangle>,
    }

    impl OriginDimensions for RecordingDisplay {
        fn size(&self) -> Size {
            Size::new(WIDTH as u32, HEIGHT as u32)
        }
    }

    impl DrawTarget for RecordingDisplay {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            Ok(())
        }

        fn fill_contiguous<I>(&mut self, area: &Rectangle, _colors: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Self::Color>,
        {
            self.fills.push(*area);
            Ok(())
        }
    }

    #[test]
    fn test_unchanged_pixels_are_not_dirty() {
        let mut fb = FrameBuffer::new();
        fb.clear(Rgb565::BLACK).ok();
        assert!(fb.changed_area().is_none());
    }

    #[test]
    fn test_flush_sends_bounding_box_once() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(10, 20), Size::new(5, 4))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut fb)
            .ok();
        Pixel(Point::new(30, 40), Rgb565::GREEN).draw(&mut fb).ok();

        let mut display = RecordingDisplay { fills: Vec::new() };
        fb.flush(&mut display).ok();
        fb.flush(&mut display).ok();

        assert_eq!(
            display.fills,
            [Rectangle::new(Point::new(10, 20), Size::new(21, 21))]
        );
        assert_eq!(fb.pixel(12, 22), Some(Rgb565::RED));
        assert_eq!(fb.pixel(30, 40), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(WIDTH, 0), None);
    }

    #[test]
    fn test_flush_copies_changed_pixels() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(5, 7), Rgb565::RED).draw(&mut fb).ok();
        Pixel(Point::new(8, 9), Rgb565::GREEN).draw(&mut fb).ok();

        let mut mirror = FrameBuffer::new();
        fb.flush(&mut mirror).ok();

        assert_eq!(mirror.pixel(5, 7), Some(Rgb565::RED));
        assert_eq!(mirror.pixel(8, 9), Some(Rgb565::GREEN));
        assert_eq!(mirror.pixel(6, 8), Some(Rgb565::BLACK));
        assert_eq!(
            mirror.changed_area(),
            Some(Rectangle::new(Point::new(5, 7), Size::new(4, 3)))
        );
        assert!(fb.changed_area().is_none());
    }

    #[test]
    fn test_out_of_bounds_fill_is_clipped() {
        let mut fb = FrameBuffer::new();
        fb.fill_solid(
            &Rectangle::new(Point::new(-10, 230), Size::new(20, 50)),
            Rgb565::BLUE,
        )
        .ok();
        assert_eq!(
            fb.changed_area(),
            Some(Rectangle::new(Point::new(0, 230), Size::new(10, 10)))
        );
    }
}
