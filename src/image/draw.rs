//! Drawing overlays onto an [`Image`].
//!
//! All functions return a guard object that performs the drawing when
//! dropped, after optional customization. Pixels outside the image are
//! silently discarded.

use std::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{self, Text, TextStyleBuilder},
};

use crate::image::{Color, Image};

/// Guard returned by [`line`]; draws the line when dropped.
pub struct DrawLine<'a> {
    image: &'a mut Image,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    stroke_width: u32,
}

impl DrawLine<'_> {
    /// Sets the line's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the line's stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

impl Drop for DrawLine<'_> {
    fn drop(&mut self) {
        let line = Line::new(
            Point::new(self.from.0, self.from.1),
            Point::new(self.to.0, self.to.1),
        );
        match line
            .into_styled(PrimitiveStyle::with_stroke(self.color, self.stroke_width))
            .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`marker`]; draws the marker when dropped.
pub struct DrawMarker<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    color: Color,
    size: u32,
}

impl DrawMarker<'_> {
    /// Sets the marker's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the width and height of the marker.
    ///
    /// The default size is 5. The size must be *uneven* and *non-zero*.
    pub fn size(&mut self, size: u32) -> &mut Self {
        assert!(size != 0, "marker size must be greater than zero");
        assert!(size % 2 == 1, "marker size must be an uneven number");
        self.size = size;
        self
    }
}

impl Drop for DrawMarker<'_> {
    fn drop(&mut self) {
        // A small "+" centered on the target pixel.
        let offset = ((self.size - 1) / 2) as i32;
        let mut target = Target(&mut *self.image);
        for d in -offset..=offset {
            let pixels = [
                Pixel(Point::new(self.x + d, self.y), self.color),
                Pixel(Point::new(self.x, self.y + d), self.color),
            ];
            match target.draw_iter(pixels) {
                Ok(_) => {}
                Err(infallible) => match infallible {},
            }
        }
    }
}

/// Guard returned by [`text`]; draws the text when dropped.
pub struct DrawText<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    text: &'a str,
    color: Color,
    alignment: text::Alignment,
    baseline: text::Baseline,
}

impl DrawText<'_> {
    /// Sets the text color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Aligns the top of the text with the `y` coordinate.
    pub fn align_top(&mut self) -> &mut Self {
        self.baseline = text::Baseline::Top;
        self
    }

    /// Centers the text horizontally around the `x` coordinate.
    pub fn align_center(&mut self) -> &mut Self {
        self.alignment = text::Alignment::Center;
        self
    }
}

impl Drop for DrawText<'_> {
    fn drop(&mut self) {
        let character_style = MonoTextStyle::new(&FONT_10X20, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(self.baseline)
            .build();
        match Text::with_text_style(
            self.text,
            Point::new(self.x, self.y),
            character_style,
            text_style,
        )
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Draws a line onto an image.
pub fn line(image: &mut Image, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> DrawLine<'_> {
    DrawLine {
        image,
        from: (from_x, from_y),
        to: (to_x, to_y),
        color: Color::BLUE,
        stroke_width: 1,
    }
}

/// Draws a marker onto an image.
///
/// This can be used to visualize landmarks or points of interest.
pub fn marker(image: &mut Image, x: i32, y: i32) -> DrawMarker<'_> {
    DrawMarker {
        image,
        x,
        y,
        color: Color::RED,
        size: 5,
    }
}

/// Draws a text string onto an image.
///
/// By default, the text's left edge is aligned with `x` and its baseline sits
/// on `y`, like OpenCV's `putText`.
pub fn text<'a>(image: &'a mut Image, x: i32, y: i32, text: &'a str) -> DrawText<'a> {
    DrawText {
        image,
        x,
        y,
        text,
        color: Color::RED,
        alignment: text::Alignment::Left,
        baseline: text::Baseline::Alphabetic,
    }
}

struct Target<'a>(&'a mut Image);

impl Dimensions for Target<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle {
            top_left: Point { x: 0, y: 0 },
            size: Size {
                width: self.0.width(),
                height: self.0.height(),
            },
        }
    }
}

impl DrawTarget for Target<'_> {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && (point.x as u32) < self.0.width()
                && point.y >= 0
                && (point.y as u32) < self.0.height()
            {
                self.0.set(point.x as u32, point.y as u32, color);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_hits_center_pixel() {
        let mut image = Image::new(9, 9);
        marker(&mut image, 4, 4);
        assert_eq!(image.get(4, 4), Color::RED);
        assert_eq!(image.get(2, 4), Color::RED);
        assert_eq!(image.get(4, 6), Color::RED);
        assert_eq!(image.get(3, 3), Color([0, 0, 0, 0]));
    }

    #[test]
    fn out_of_bounds_drawing_is_discarded() {
        let mut image = Image::new(4, 4);
        marker(&mut image, -10, 2);
        line(&mut image, -5, -5, 20, -5);
        text(&mut image, 100, 100, "offscreen");
        // Nothing to assert beyond "did not panic"; the image may be partially
        // painted where primitives clip into it.
    }

    #[test]
    fn text_paints_pixels() {
        let blank = Image::new(200, 50);
        let mut image = blank.clone();
        text(&mut image, 10, 30, "hi").color(Color::WHITE);
        assert_ne!(image.data(), blank.data());
    }
}
