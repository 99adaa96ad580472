//! Canvas2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::shapes::{DrawCmd, draw_list};
use crate::sim::GameState;

/// Draws the scene on a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Render the current frame
    pub fn render(&self, state: &GameState) -> Result<(), JsValue> {
        for cmd in draw_list(state) {
            self.draw(&cmd)?;
        }
        Ok(())
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match *cmd {
            DrawCmd::Clear { size } => {
                ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
            }
            DrawCmd::Rect { min, size, color } => {
                ctx.set_fill_style_str(color);
                ctx.fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::RoundRect {
                min,
                size,
                radius,
                color,
            } => {
                let (x, y, w, h, r) = (
                    min.x as f64,
                    min.y as f64,
                    size.x as f64,
                    size.y as f64,
                    radius as f64,
                );
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.move_to(x + r, y);
                ctx.arc_to(x + w, y, x + w, y + h, r)?;
                ctx.arc_to(x + w, y + h, x, y + h, r)?;
                ctx.arc_to(x, y + h, x, y, r)?;
                ctx.arc_to(x, y, x + w, y, r)?;
                ctx.close_path();
                ctx.fill();
            }
            DrawCmd::Ellipse {
                center,
                radii,
                color,
            } => {
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    0.0,
                    0.0,
                    TAU,
                )?;
                ctx.fill();
            }
        }
        Ok(())
    }
}
