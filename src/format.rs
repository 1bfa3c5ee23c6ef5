//! Pixel format tags and their byte-layout metadata.
//!
//! A [`PixelFormat`] identifies how one pixel is encoded in a bitmap's
//! scanline memory. Only a subset of formats is *drawable* — those have
//! a specialized pixel processor behind [`BitmapLock`](crate::BitmapLock).
//! The remaining formats can be stored in a [`Bitmap`](crate::Bitmap) and
//! locked, but every pixel operation on them fails with
//! [`SurfaceError::UnsupportedFormat`](crate::SurfaceError::UnsupportedFormat).

/// Byte layout of one pixel in scanline memory.
///
/// Channel bytes are listed in increasing memory order. The 32-bit
/// formats correspond to a little-endian packed `0xAARRGGBB` value.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 24 bits per pixel, `B G R` byte order. No alpha channel.
    Rgb24,
    /// 32 bits per pixel, `B G R x` byte order. The fourth byte is
    /// padding; reads report full opacity and writes force it to 0xFF.
    Rgb32,
    /// 32 bits per pixel, `B G R A` byte order, straight alpha.
    Argb32,
    /// 32 bits per pixel with premultiplied alpha. Storable, not drawable.
    Pargb32,
    /// 8-bit grayscale. Storable, not drawable.
    Gray8,
}

impl PixelFormat {
    /// The formats the drawing engine has a specialized processor for.
    ///
    /// Carried inside [`UnsupportedFormat`](crate::SurfaceError::UnsupportedFormat)
    /// errors so callers can pick a fallback path.
    pub const DRAWABLE: &'static [PixelFormat] =
        &[PixelFormat::Rgb24, PixelFormat::Rgb32, PixelFormat::Argb32];

    /// Byte size of one pixel.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgb32 | PixelFormat::Argb32 | PixelFormat::Pargb32 => 4,
            PixelFormat::Gray8 => 1,
        }
    }

    /// Whether the format stores an addressable alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb32 | PixelFormat::Pargb32)
    }

    /// Whether a specialized pixel processor exists for this format.
    #[inline]
    pub const fn is_drawable(self) -> bool {
        matches!(
            self,
            PixelFormat::Rgb24 | PixelFormat::Rgb32 | PixelFormat::Argb32
        )
    }
}

impl core::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            PixelFormat::Rgb24 => "24bpp RGB",
            PixelFormat::Rgb32 => "32bpp RGB",
            PixelFormat::Argb32 => "32bpp ARGB",
            PixelFormat::Pargb32 => "32bpp premultiplied ARGB",
            PixelFormat::Gray8 => "8bpp grayscale",
        })
    }
}
