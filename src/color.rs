//! ARGB color value used by all drawing operations.
//!
//! [`Color`] is semantically ARGB regardless of the surface's byte
//! layout; the pixel processors reorder channels on the way in and out.
//! Formats without an alpha channel treat every pixel as fully opaque on
//! read and ignore the supplied alpha on write.

use rgb::Rgba;
use rgb::alt::BGRA;

/// An 8-bit-per-channel ARGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Alpha (255 = opaque).
    pub a: u8,
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);

    /// Fully opaque color from RGB channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Color from all four channels.
    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Pack into a `0xAARRGGBB` value.
    #[inline]
    pub const fn to_argb_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack from a `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb_u32(v: u32) -> Self {
        Self {
            a: (v >> 24) as u8,
            r: (v >> 16) as u8,
            g: (v >> 8) as u8,
            b: v as u8,
        }
    }

    /// The same color with alpha forced to 255.
    #[inline]
    pub const fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }
}

impl From<Rgba<u8>> for Color {
    fn from(c: Rgba<u8>) -> Self {
        Self {
            a: c.a,
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl From<BGRA<u8>> for Color {
    fn from(c: BGRA<u8>) -> Self {
        Self {
            a: c.a,
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

impl From<Color> for BGRA<u8> {
    fn from(c: Color) -> Self {
        BGRA {
            b: c.b,
            g: c.g,
            r: c.r,
            a: c.a,
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:08X}", self.to_argb_u32())
    }
}
