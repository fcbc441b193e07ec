//! In-memory pixel buffer with text rendering.
//!
//! Pixels are stored row-major as `0x00RRGGBB`, the layout `minifb`
//! presents directly. Text goes through `embedded-graphics` with a
//! monospace font whose 13 px glyphs fit the panel's 15 px line height.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_8X13;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use rover_common::hal::types::Rgb;

/// Row-major 0RGB pixel buffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create a black buffer of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixel data.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, if inside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_0rgb());
    }

    /// Render `text` with its top-left corner at `(x, y)`. Clipped at the edges.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Rgb) {
        let style = MonoTextStyle::new(&FONT_8X13, Rgb888::new(color.r, color.g, color.b));
        // Infallible target.
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(self);
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x < self.width && y < self.height {
                self.pixels[y * self.width + x] =
                    Rgb::new(color.r(), color.g(), color.b()).to_0rgb();
            }
        }
        Ok(())
    }
}
