//! Canvas 2D painter
//!
//! Sprites are `HtmlImageElement`s created once; until an image has decoded
//! its rectangle is filled with a flat color so the board stays readable.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Frame, Renderer, SpriteId};

const HUD_FONT: &str = "18px Arial";
const HUD_COLOR: &str = "white";

/// Paints frames onto a `<canvas>`
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    images: HashMap<SpriteId, HtmlImageElement>,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    /// Grab the 2D context and start loading sprite images
    ///
    /// Returns None if the canvas has no 2D context.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let mut images = HashMap::new();
        for sprite in SpriteId::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(sprite.asset_path());
                    images.insert(sprite, img);
                }
                Err(err) => log::warn!("Failed to create image for {:?}: {:?}", sprite, err),
            }
        }

        Some(Self {
            ctx,
            images,
            size: (canvas.width(), canvas.height()),
        })
    }

    fn loaded_image(&self, sprite: SpriteId) -> Option<&HtmlImageElement> {
        self.images
            .get(&sprite)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Frame) {
        let (w, h) = self.size;
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

        for cmd in &frame.sprites {
            let (x, y) = (cmd.pos.x as f64, cmd.pos.y as f64);
            let (dw, dh) = (cmd.size.x as f64, cmd.size.y as f64);
            match self.loaded_image(cmd.sprite) {
                Some(img) => {
                    let _ = self
                        .ctx
                        .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, dw, dh);
                }
                None => {
                    self.ctx.set_fill_style_str(cmd.sprite.fallback_color());
                    self.ctx.fill_rect(x, y, dw, dh);
                }
            }
        }

        self.ctx.set_fill_style_str(HUD_COLOR);
        self.ctx.set_font(HUD_FONT);
        for label in &frame.labels {
            let _ = self
                .ctx
                .fill_text(&label.text, label.pos.x as f64, label.pos.y as f64);
        }
    }
}
