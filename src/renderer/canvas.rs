//! `DrawSurface` over a browser 2D canvas context

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::surface::{DrawSurface, Rect};
use crate::platform::AssetCache;
use crate::sim::Color;

/// Borrowed context plus the loaded images, built once per frame
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    images: &'a AssetCache<HtmlImageElement>,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, images: &'a AssetCache<HtmlImageElement>) -> Self {
        Self { ctx, images }
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> bool {
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
    }
}

impl DrawSurface for CanvasSurface<'_> {
    fn clear_rect(&mut self, r: Rect) {
        self.ctx
            .clear_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    }

    fn fill_rect(&mut self, r: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    }

    fn stroke_rect(&mut self, r: Rect, color: Color) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx
            .stroke_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if self.circle_path(center, radius) {
            self.ctx.set_fill_style_str(&color.css());
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if self.circle_path(center, radius) {
            self.ctx.set_stroke_style_str(&color.css());
            self.ctx.stroke();
        }
    }

    fn draw_image(&mut self, key: &str, src: Rect, dst: Rect) {
        let Some(image) = self.images.get(key) else {
            log::warn!("Image {} not loaded", key);
            return;
        };
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                src.x as f64,
                src.y as f64,
                src.width as f64,
                src.height as f64,
                dst.x as f64,
                dst.y as f64,
                dst.width as f64,
                dst.height as f64,
            )
        {
            log::warn!("drawImage failed for {}: {:?}", key, e);
        }
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = self.ctx.scale(x as f64, y as f64);
    }
}
