//! Draw-surface abstraction
//!
//! The scene renderer only talks to `DrawSurface`. The browser build backs it
//! with a 2D canvas context; tests and the native runner record commands.

use glam::Vec2;

use crate::sim::{BoundingBox, Color};

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }
}

impl From<BoundingBox> for Rect {
    fn from(b: BoundingBox) -> Self {
        Self::new(b.x, b.y, b.width, b.height)
    }
}

/// Immediate-mode 2D drawing target
pub trait DrawSurface {
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Copy `src` from the image at `key` into `dst`
    fn draw_image(&mut self, key: &str, src: Rect, dst: Rect);
    fn set_line_width(&mut self, width: f32);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect(Rect, Color),
    StrokeRect(Rect, Color),
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, color: Color },
    Image { key: String, src: Rect, dst: Rect },
    LineWidth(f32),
    Save,
    Restore,
    Translate(f32, f32),
    Scale(f32, f32),
}

/// Surface that records every call, for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands since the most recent full clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.last_frame().iter().filter(|c| pred(c)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::StrokeRect(rect, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_image(&mut self, key: &str, src: Rect, dst: Rect) {
        self.commands.push(DrawCommand::Image {
            key: key.to_string(),
            src,
            dst,
        });
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate(x, y));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Scale(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_bounding_box() {
        let b = BoundingBox::centered(Vec2::new(10.0, 20.0), 4.0, 6.0);
        assert_eq!(Rect::from(b), Rect::centered(Vec2::new(10.0, 20.0), 4.0, 6.0));
        assert_eq!(Rect::from(b), Rect::new(8.0, 17.0, 4.0, 6.0));
    }

    #[test]
    fn test_last_frame_starts_at_clear() {
        let mut surface = RecordingSurface::new();
        surface.save();
        surface.clear_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.restore();
        surface.clear_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.save();
        assert_eq!(surface.last_frame().len(), 2);
        assert_eq!(surface.count(|c| *c == DrawCommand::Save), 1);
    }
}
