// Copyright 2026 the Barrage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color and font descriptors shared between the core and drawing backends.

use core::fmt;

use alloc::string::String;

/// An RGBA color, serialized for CSS-style consumers via [`Display`](fmt::Display).
///
/// Alpha is a coverage fraction in `[0, 1]`; channels are 8-bit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, `0.0` transparent to `1.0` opaque.
    pub a: f32,
}

impl Color {
    /// An opaque color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// A color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Default bullet text color (near-black, `#111`).
    pub const TEXT: Self = Self::rgb(0x11, 0x11, 0x11);

    /// Default panel background (translucent white).
    pub const PANEL: Self = Self::rgba(0xFF, 0xFF, 0xFF, 0.6);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// A font descriptor, serialized as a CSS shorthand (`"<size>px <family>"`).
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Size in CSS pixels.
    pub size: f64,
    /// Family name, passed through verbatim.
    pub family: String,
}

impl Font {
    /// A font of `size` pixels in `family`.
    #[must_use]
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }
}

impl Default for Font {
    /// The stock bullet font, 14px Microsoft Yahei.
    fn default() -> Self {
        Self::new(14.0, "Microsoft Yahei")
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size, self.family)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn color_css_form() {
        assert_eq!(Color::TEXT.to_string(), "rgba(17,17,17,1)");
        assert_eq!(Color::PANEL.to_string(), "rgba(255,255,255,0.6)");
        assert_eq!(Color::rgba(1, 2, 3, 0.25).to_string(), "rgba(1,2,3,0.25)");
    }

    #[test]
    fn font_css_shorthand() {
        assert_eq!(Font::default().to_string(), "14px Microsoft Yahei");
        assert_eq!(Font::new(20.0, "serif").to_string(), "20px serif");
    }
}
