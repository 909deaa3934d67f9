// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One scrolling bullet comment and its derived pixel layout.

use alloc::string::String;
use kurbo::{Point, Rect, RoundedRect};

use crate::style::{Color, Font};
use crate::surface::AvatarId;

/// Row height of a bullet, in pixels. Also the avatar edge length and twice
/// the panel corner radius.
pub const HEIGHT: f64 = 30.0;

/// Gap between the avatar and the text panel.
pub const MARGIN: f64 = 10.0;

/// Horizontal padding between the panel cap and the text run.
pub const PADDING: f64 = 5.0;

/// Vertical offset from the bullet's top edge to the text anchor.
const TEXT_OFFSET_Y: f64 = 6.0;

/// Creation-time parameters for a bullet; everything else is derived.
///
/// Mirrors the options accepted by [`Stage::add`](crate::stage::Stage::add):
/// unset fields fall back to the stock look (speed 1, near-black text on a
/// translucent white panel, 14px Microsoft Yahei).
#[derive(Clone, Debug)]
pub struct BulletParams {
    /// Comment text, drawn verbatim.
    pub text: String,
    /// Pixels moved left per tick.
    pub speed: f64,
    /// Avatar image registered with the surface, if any.
    pub avatar: Option<AvatarId>,
    /// Text fill color.
    pub text_color: Color,
    /// Panel background color.
    pub panel_color: Color,
    /// Text font.
    pub font: Font,
}

impl Default for BulletParams {
    fn default() -> Self {
        Self {
            text: String::new(),
            speed: 1.0,
            avatar: None,
            text_color: Color::TEXT,
            panel_color: Color::PANEL,
            font: Font::default(),
        }
    }
}

/// A single bullet: avatar + rounded text panel scrolling right to left.
///
/// Text metrics are fixed at construction; [`advance`](Self::advance) is the
/// only mutator of position and death. Death is one-way: once a bullet has
/// fully left the stage it stays dead until pruned.
#[derive(Clone, Debug)]
pub struct Bullet {
    /// Left edge of the whole bullet (avatar's left edge).
    pub x: f64,
    /// Top edge, fixed at creation.
    pub y: f64,
    /// Pixels moved left per tick.
    pub speed: f64,
    /// Comment text.
    pub text: String,
    /// Avatar image, drawn once its load completes.
    pub avatar: Option<AvatarId>,
    /// Text fill color.
    pub text_color: Color,
    /// Panel background color.
    pub panel_color: Color,
    /// Text font.
    pub font: Font,
    /// Click-selection toggle state.
    pub selected: bool,
    text_width: f64,
    panel_width: f64,
    total_width: f64,
    dead: bool,
}

impl Bullet {
    /// Builds a bullet at `(x, y)` from `params` and the measured advance
    /// width of its text.
    ///
    /// The measurement is rounded up to whole pixels; derived widths never
    /// undershoot the painted glyphs.
    #[must_use]
    pub fn new(params: BulletParams, measured_text_width: f64, x: f64, y: f64) -> Self {
        let text_width = measured_text_width.ceil();
        let panel_width = text_width + 2.0 * PADDING;
        // Avatar, margin, panel body, plus the two semicircular caps.
        let total_width = HEIGHT + MARGIN + panel_width + HEIGHT;
        Self {
            x,
            y,
            speed: params.speed,
            text: params.text,
            avatar: params.avatar,
            text_color: params.text_color,
            panel_color: params.panel_color,
            font: params.font,
            selected: false,
            text_width,
            panel_width,
            total_width,
            dead: false,
        }
    }

    /// Measured text width, rounded up to whole pixels.
    #[inline]
    #[must_use]
    pub const fn text_width(&self) -> f64 {
        self.text_width
    }

    /// Width of the panel body between the caps (`text_width + 2 * PADDING`).
    #[inline]
    #[must_use]
    pub const fn panel_width(&self) -> f64 {
        self.panel_width
    }

    /// Full footprint width from avatar to the trailing panel cap.
    #[inline]
    #[must_use]
    pub const fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Returns whether the bullet has fully left the stage.
    #[inline]
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.dead
    }

    /// Moves the bullet one tick leftwards and re-evaluates death.
    ///
    /// Death triggers only once the *entire* footprint has crossed the left
    /// edge, strictly: `x < -total_width`.
    pub fn advance(&mut self) {
        self.x -= self.speed;
        if self.x < -self.total_width {
            self.dead = true;
        }
    }

    /// Flips the selection toggle and returns the new state.
    pub const fn toggle_selected(&mut self) -> bool {
        self.selected = !self.selected;
        self.selected
    }

    /// The hit box: `[x, x + total_width) × [y, y + HEIGHT)`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.total_width, self.y + HEIGHT)
    }

    /// Half-open hit test against [`bounds`](Self::bounds): points on the
    /// left/top edges hit, points on the right/bottom edges miss.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.x < self.x + self.total_width
            && p.y >= self.y
            && p.y < self.y + HEIGHT
    }

    /// Destination square for the avatar image.
    #[must_use]
    pub fn avatar_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + HEIGHT, self.y + HEIGHT)
    }

    /// The rounded background panel, caps included.
    #[must_use]
    pub fn panel(&self) -> RoundedRect {
        let x0 = self.x + HEIGHT + MARGIN;
        RoundedRect::new(
            x0,
            self.y,
            x0 + self.panel_width + HEIGHT,
            self.y + HEIGHT,
            HEIGHT / 2.0,
        )
    }

    /// Top-left anchor for the text run inside the panel.
    #[must_use]
    pub fn text_origin(&self) -> Point {
        Point::new(
            self.x + HEIGHT + MARGIN + HEIGHT / 2.0 + PADDING,
            self.y + TEXT_OFFSET_Y,
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn bullet(text: &str, measured: f64, x: f64, speed: f64) -> Bullet {
        Bullet::new(
            BulletParams {
                text: text.to_string(),
                speed,
                ..BulletParams::default()
            },
            measured,
            x,
            0.0,
        )
    }

    #[test]
    fn derived_widths() {
        let b = bullet("hi", 15.4, 100.0, 1.0);
        assert_eq!(b.text_width(), 16.0, "measurement rounds up");
        assert_eq!(b.panel_width(), 16.0 + 2.0 * PADDING);
        assert_eq!(b.total_width(), HEIGHT + MARGIN + b.panel_width() + HEIGHT);
    }

    #[test]
    fn empty_text_still_has_a_panel() {
        let b = bullet("", 0.0, 0.0, 1.0);
        assert_eq!(b.panel_width(), 2.0 * PADDING);
        assert!(b.panel().rect().width() > 0.0, "degenerate panel still drawn");
    }

    #[test]
    fn death_is_strict_and_monotonic() {
        let w = bullet("x", 10.0, 0.0, 1.0).total_width();
        let mut b = bullet("x", 10.0, -w + 1.0, 1.0);

        b.advance(); // lands exactly on -total_width
        assert_eq!(b.x, -w);
        assert!(!b.is_dead(), "x == -total_width is still alive");

        b.advance(); // crosses it
        assert!(b.is_dead());

        // Death never reverts, whatever happens to x afterwards.
        b.advance();
        assert!(b.is_dead());
    }

    #[test]
    fn hit_test_half_open_edges() {
        let b = bullet("x", 10.0, 50.0, 1.0);
        let w = b.total_width();

        assert!(b.contains(Point::new(50.0, 0.0)), "left/top edges included");
        assert!(!b.contains(Point::new(50.0 + w, 0.0)), "right edge excluded");
        assert!(!b.contains(Point::new(50.0, HEIGHT)), "bottom edge excluded");
        assert!(b.contains(Point::new(50.0 + w - 0.001, HEIGHT - 0.001)));
        assert!(!b.contains(Point::new(49.999, 0.0)));
    }

    #[test]
    fn render_regions_follow_x() {
        let b = bullet("x", 10.0, 200.0, 1.0);
        assert_eq!(b.avatar_rect(), Rect::new(200.0, 0.0, 230.0, 30.0));

        let panel = b.panel();
        assert_eq!(panel.rect().x0, 200.0 + HEIGHT + MARGIN);
        assert_eq!(panel.rect().width(), b.panel_width() + HEIGHT);
        assert_eq!(panel.radii().top_left, HEIGHT / 2.0);

        let origin = b.text_origin();
        assert_eq!(origin.x, 200.0 + HEIGHT + MARGIN + HEIGHT / 2.0 + PADDING);
        assert_eq!(origin.y, 6.0);
    }

    #[test]
    fn toggle_flips_and_reports() {
        let mut b = bullet("x", 10.0, 0.0, 1.0);
        assert!(!b.selected);
        assert!(b.toggle_selected());
        assert!(!b.toggle_selected());
        assert!(!b.selected);
    }
}
