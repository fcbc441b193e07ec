//! Text panel layout.

use rover_common::hal::driver::DisplaySurface;
use rover_common::hal::types::Rgb;

/// Left margin [px].
pub const TEXT_ORIGIN_X: i32 = 10;
/// Top margin [px].
pub const TEXT_ORIGIN_Y: i32 = 10;
/// Vertical advance per line [px].
pub const LINE_HEIGHT: i32 = 15;

/// Position of the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCursor {
    /// Left edge [px].
    pub x: i32,
    /// Top edge [px].
    pub y: i32,
    /// Advance per line [px].
    pub line_height: i32,
}

impl TextCursor {
    /// Cursor at the top-left margin.
    pub const fn origin() -> Self {
        Self {
            x: TEXT_ORIGIN_X,
            y: TEXT_ORIGIN_Y,
            line_height: LINE_HEIGHT,
        }
    }

    /// Move down one line.
    pub fn advance(&mut self) {
        self.y += self.line_height;
    }
}

impl Default for TextCursor {
    fn default() -> Self {
        Self::origin()
    }
}

/// Draws telemetry lines onto a surface.
#[derive(Debug, Clone)]
pub struct TelemetryPresenter {
    color: Rgb,
}

impl TelemetryPresenter {
    /// Presenter drawing black text.
    pub const fn new() -> Self {
        Self { color: Rgb::BLACK }
    }

    /// Draw `lines` top-down from the origin. Does not clear or flip.
    pub fn render<S: AsRef<str>>(&self, surface: &mut dyn DisplaySurface, lines: &[S]) {
        let mut cursor = TextCursor::origin();
        for line in lines {
            surface.draw_text(line.as_ref(), cursor.x, cursor.y, self.color);
            cursor.advance();
        }
    }
}

impl Default for TelemetryPresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rover_hal::drivers::simulation::{DrawnText, SimulatedDisplay};

    #[test]
    fn lines_stack_from_origin() {
        let (mut display, probe) = SimulatedDisplay::new(500, 700);
        TelemetryPresenter::new().render(&mut display, &["first", "second", "third"]);
        display.flip().unwrap();

        let frame = probe.last_frame().unwrap();
        let positions: Vec<(i32, i32)> = frame.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(positions, vec![(10, 10), (10, 25), (10, 40)]);
        assert_eq!(
            frame[1],
            DrawnText {
                x: 10,
                y: 25,
                text: "second".to_string()
            }
        );
    }

    #[test]
    fn cursor_resets_every_render() {
        let (mut display, probe) = SimulatedDisplay::new(500, 700);
        let presenter = TelemetryPresenter::default();
        presenter.render(&mut display, &["a"]);
        presenter.render(&mut display, &["b"]);
        display.flip().unwrap();

        let frame = probe.last_frame().unwrap();
        assert!(frame.iter().all(|t| t.y == TEXT_ORIGIN_Y));
        assert_eq!(probe.fills(), 0);
    }

    #[test]
    fn empty_render_draws_nothing() {
        let (mut display, probe) = SimulatedDisplay::new(50, 50);
        TelemetryPresenter::new().render::<&str>(&mut display, &[]);
        display.flip().unwrap();
        assert!(probe.last_frame().unwrap().is_empty());
    }
}
