// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the core scheduler and platform drawing backends.

use kurbo::{Point, Rect, RoundedRect};

use crate::style::{Color, Font};

/// Identifies an avatar image registered with a backend surface.
///
/// The core never touches pixel data; it hands the id back to the surface at
/// draw time and asks [`Surface::avatar_ready`] whether the content has
/// finished loading. Ids are allocated by the backend (e.g. at image
/// registration) and are opaque to the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AvatarId(pub u32);

/// A 2D drawing target the stage renders onto.
///
/// Implemented by platform backends (the web backend wraps a canvas 2D
/// context) and by test doubles that record calls instead of drawing. All
/// coordinates are in surface pixels with the origin at the top left.
///
/// The stage drives a `Surface` in a fixed per-frame order:
///
/// ```text
/// loop {
///     // host tick (e.g. requestAnimationFrame) fires
///     surface.clear(stage_rect);
///     for each active bullet, back to front:
///         surface.draw_avatar(..);   // skipped until avatar_ready
///         surface.fill_panel(..);
///         surface.fill_text(..);
/// }
/// ```
///
/// [`measure_text`](Self::measure_text) is called once per bullet at
/// admission time, never during the draw pass.
pub trait Surface {
    /// Erases `region` to fully transparent.
    fn clear(&mut self, region: Rect);

    /// Returns whether the avatar's content is loaded and drawable.
    ///
    /// An unknown id reports `false` forever; the bullet then simply renders
    /// without an avatar.
    fn avatar_ready(&self, avatar: AvatarId) -> bool;

    /// Draws the avatar scaled into `region`.
    ///
    /// Only called after [`avatar_ready`](Self::avatar_ready) reported
    /// `true` for `avatar` this frame.
    fn draw_avatar(&mut self, avatar: AvatarId, region: Rect);

    /// Fills a rounded background panel.
    fn fill_panel(&mut self, panel: RoundedRect, color: Color);

    /// Draws `text` with its top-left anchor at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &Font, color: Color);

    /// Measures the advance width of `text` in `font`, in surface pixels.
    ///
    /// Implementations should round up to whole pixels so derived widths
    /// never undershoot the painted glyphs.
    fn measure_text(&mut self, text: &str, font: &Font) -> f64;
}
