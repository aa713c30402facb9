//! Browser canvas surface

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::renderer::{DrawSurface, TextAlign};

/// Id of the canvas element the game draws into
pub const CANVAS_ID: &str = "gameCanvas";

/// Canvas 2D context adapted to [`DrawSurface`]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl DrawSurface for CanvasSurface {
    fn set_fill_color(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_css());
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(x as f64, y as f64, radius as f64, 0.0, TAU) {
            log::warn!("Canvas arc failed: {:?}", e);
            return;
        }
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("Canvas text failed: {:?}", e);
        }
    }
}

/// Look up the game canvas and its 2D context
pub fn canvas_and_context(
    window: &Window,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;
    Ok((canvas, ctx))
}

/// Window inner size in CSS pixels
pub fn window_size(window: &Window) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width as f32, height as f32)
}

/// Resize the canvas backing store to match the window
pub fn fit_canvas(canvas: &HtmlCanvasElement, width: f32, height: f32) {
    canvas.set_width(width.max(1.0) as u32);
    canvas.set_height(height.max(1.0) as u32);
}
