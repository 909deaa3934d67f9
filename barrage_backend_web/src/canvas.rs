// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D-canvas implementation of the [`Surface`] contract.

use alloc::string::ToString;
use alloc::vec::Vec;

use kurbo::{Point, Rect, RoundedRect};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use barrage_core::style::{Color, Font};
use barrage_core::surface::{AvatarId, Surface};

/// Draws bullets onto a `CanvasRenderingContext2d`.
///
/// Avatar images are owned by the surface: [`register_avatar`]
/// (Self::register_avatar) kicks off an asynchronous load and returns an
/// [`AvatarId`]; the stage polls [`avatar_ready`](Surface::avatar_ready)
/// each frame and skips the avatar until the browser reports the image
/// `complete`.
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    avatars: Vec<HtmlImageElement>,
}

impl core::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("avatars", &self.avatars.len())
            .finish_non_exhaustive()
    }
}

impl CanvasSurface {
    /// Wraps an existing 2D context.
    #[must_use]
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self {
            context,
            avatars: Vec::new(),
        }
    }

    /// Starts loading the image at `url` and returns its handle.
    ///
    /// Returns `None` if the browser refuses to create an image element.
    /// The load itself is asynchronous; until it completes, bullets carrying
    /// the returned id render without their avatar.
    pub fn register_avatar(&mut self, url: &str) -> Option<AvatarId> {
        let image = HtmlImageElement::new().ok()?;
        image.set_src(url);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "an avatar registry with 2^32 entries is out of scope"
        )]
        let id = AvatarId(self.avatars.len() as u32);
        self.avatars.push(image);
        Some(id)
    }

    fn avatar(&self, id: AvatarId) -> Option<&HtmlImageElement> {
        self.avatars.get(id.0 as usize)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, region: Rect) {
        self.context
            .clear_rect(region.x0, region.y0, region.width(), region.height());
    }

    fn avatar_ready(&self, avatar: AvatarId) -> bool {
        self.avatar(avatar).is_some_and(HtmlImageElement::complete)
    }

    fn draw_avatar(&mut self, avatar: AvatarId, region: Rect) {
        if let Some(image) = self.avatar(avatar) {
            let _ = self.context.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                region.x0,
                region.y0,
                region.width(),
                region.height(),
            );
        }
    }

    /// Fills the panel as two semicircular caps joined by straight edges, the
    /// shape's radius taken from the rounded rect.
    fn fill_panel(&mut self, panel: RoundedRect, color: Color) {
        let rect = panel.rect();
        let radius = panel.radii().top_left;
        let body_width = rect.width() - 2.0 * radius;
        let cx_left = rect.x0 + radius;
        let cx_right = cx_left + body_width;
        let cy = rect.y0 + radius;

        let ctx = &self.context;
        ctx.save();
        ctx.set_fill_style_str(&color.to_string());
        ctx.begin_path();
        ctx.move_to(cx_left, rect.y0);
        // Left cap, top to bottom going anticlockwise (4.71 ≈ 3π/2, 1.57 ≈ π/2).
        let _ = ctx.arc_with_anticlockwise(cx_left, cy, radius, 4.71, 1.57, true);
        ctx.line_to(cx_right, rect.y1);
        let _ = ctx.arc_with_anticlockwise(cx_right, cy, radius, 1.57, 4.71, true);
        ctx.fill();
        ctx.restore();
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, color: Color) {
        let ctx = &self.context;
        ctx.set_font(&font.to_string());
        ctx.set_text_baseline("top");
        ctx.set_fill_style_str(&color.to_string());
        let _ = ctx.fill_text(text, origin.x, origin.y);
    }

    fn measure_text(&mut self, text: &str, font: &Font) -> f64 {
        self.context.set_font(&font.to_string());
        self.context
            .measure_text(text)
            .map_or(0.0, |metrics| metrics.width())
    }
}
