//! The bitmap container: owned pixel memory that grants exclusive locks.
//!
//! [`Bitmap`] owns an alignment-padded byte buffer with 4-byte-aligned
//! scanlines. All pixel access goes through [`BitmapLock`]: the storage
//! sits behind a `RefCell`, so at most one lock is live at a time and a
//! second attempt fails with [`SurfaceError::AlreadyLocked`] instead of
//! handing out aliased memory. Dropping the lock releases it.

use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use imgref::ImgVec;
use rgb::{Rgb, Rgba};

use crate::error::SurfaceError;
use crate::format::PixelFormat;
use crate::lock::BitmapLock;
use crate::processor::BufferLayout;
use crate::rect::Rect;

/// Scanlines start on 4-byte boundaries, so 32bpp rows can be written
/// as whole words.
const SCANLINE_ALIGN: usize = 4;

/// Requested access for a lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LockMode {
    /// Pixel reads only.
    Read,
    /// Pixel writes only.
    Write,
    /// Both.
    #[default]
    ReadWrite,
}

impl LockMode {
    #[inline]
    pub(crate) fn readable(self) -> bool {
        matches!(self, LockMode::Read | LockMode::ReadWrite)
    }

    #[inline]
    pub(crate) fn writable(self) -> bool {
        matches!(self, LockMode::Write | LockMode::ReadWrite)
    }
}

/// Parameters for [`Bitmap::lock_bits`].
///
/// Defaults: the full image, [`LockMode::ReadWrite`], the bitmap's
/// native format.
#[derive(Clone, Copy, Debug, Default)]
pub struct LockOptions {
    region: Option<Rect>,
    mode: LockMode,
    format: Option<PixelFormat>,
}

impl LockOptions {
    /// Options with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock only the given region.
    pub fn region(mut self, region: Rect) -> Self {
        self.region = Some(region);
        self
    }

    /// Requested access mode.
    pub fn mode(mut self, mode: LockMode) -> Self {
        self.mode = mode;
        self
    }

    /// Requested pixel format. The container only grants verbatim
    /// access, so anything other than the native format is refused.
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// An image surface with owned scanline storage.
pub struct Bitmap {
    data: RefCell<Vec<u8>>,
    /// Byte offset from the buffer start to the first aligned scanline.
    offset: usize,
    stride: usize,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Bitmap {
    /// Allocate a zero-filled bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimensions`] when width or height
    /// is zero or the byte size overflows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, SurfaceError> {
        let stride = stride_for(width, height, format)?;
        let total = stride * height as usize;
        let data = vec![0u8; total + SCANLINE_ALIGN - 1];
        let offset = align_offset(data.as_ptr(), SCANLINE_ALIGN);
        Ok(Self {
            data: RefCell::new(data),
            offset,
            stride,
            width,
            height,
            format,
        })
    }

    /// Wrap an existing byte buffer as a bitmap.
    ///
    /// Rows are expected at the 4-byte-aligned stride for `width`,
    /// starting at the first aligned byte of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidDimensions`] for zero/overflowing
    /// dimensions and [`SurfaceError::BufferTooSmall`] when `data`
    /// cannot hold them.
    pub fn from_vec(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self, SurfaceError> {
        let stride = stride_for(width, height, format)?;
        let total = stride * height as usize;
        let offset = align_offset(data.as_ptr(), SCANLINE_ALIGN);
        if data.len() < offset + total {
            return Err(SurfaceError::BufferTooSmall);
        }
        Ok(Self {
            data: RefCell::new(data),
            offset,
            stride,
            width,
            height,
            format,
        })
    }

    /// Consume the bitmap and return the backing buffer for reuse.
    ///
    /// # Panics
    ///
    /// Panics if a lock is still live (impossible: locks borrow the
    /// bitmap, so the borrow checker rejects that call order).
    pub fn into_vec(self) -> Vec<u8> {
        self.data.into_inner()
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Native pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Byte stride between scanline starts.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Lock the full image for read-write access in the native format.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::AlreadyLocked`] while another lock is live.
    pub fn lock(&self) -> Result<BitmapLock<'_>, SurfaceError> {
        self.lock_bits(LockOptions::new())
    }

    /// Lock a sub-region for read-write access in the native format.
    ///
    /// # Errors
    ///
    /// As [`lock_bits`](Self::lock_bits).
    pub fn lock_region(&self, region: Rect) -> Result<BitmapLock<'_>, SurfaceError> {
        self.lock_bits(LockOptions::new().region(region))
    }

    /// Lock with explicit options. This is the full-parameter form the
    /// convenience methods reduce to.
    ///
    /// # Errors
    ///
    /// - [`SurfaceError::FormatNotSupported`] when a non-native format
    ///   is requested.
    /// - [`SurfaceError::InvalidRegion`] when the region is empty or
    ///   reaches outside the bitmap.
    /// - [`SurfaceError::AlreadyLocked`] while another lock is live.
    pub fn lock_bits(&self, options: LockOptions) -> Result<BitmapLock<'_>, SurfaceError> {
        let requested = options.format.unwrap_or(self.format);
        if requested != self.format {
            return Err(SurfaceError::FormatNotSupported(requested));
        }
        let region = options
            .region
            .unwrap_or(Rect::full(self.width as i32, self.height as i32));
        if region.is_empty()
            || region.x < 0
            || region.y < 0
            || region.right() > self.width as i32
            || region.bottom() > self.height as i32
        {
            return Err(SurfaceError::InvalidRegion);
        }

        let guard = self
            .data
            .try_borrow_mut()
            .map_err(|_| SurfaceError::AlreadyLocked)?;
        let layout = BufferLayout {
            origin: self.offset
                + region.y as usize * self.stride
                + region.x as usize * self.format.bytes_per_pixel(),
            stride: self.stride,
            width: region.width as u32,
            height: region.height as u32,
            format: self.format,
        };
        Ok(BitmapLock::new(guard, layout, options.mode))
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Bitmap({}x{}, {})",
            self.width, self.height, self.format
        )
    }
}

// ---------------------------------------------------------------------------
// imgref interop
// ---------------------------------------------------------------------------

impl TryFrom<ImgVec<Rgba<u8>>> for Bitmap {
    type Error = SurfaceError;

    /// Copy an RGBA image into a fresh ARGB32 bitmap, reordering
    /// channels into `B G R A` scanline order.
    fn try_from(img: ImgVec<Rgba<u8>>) -> Result<Self, SurfaceError> {
        let bitmap = Bitmap::new(img.width() as u32, img.height() as u32, PixelFormat::Argb32)?;
        {
            let mut data = bitmap.data.borrow_mut();
            for (y, row) in img.rows().enumerate() {
                let start = bitmap.offset + y * bitmap.stride;
                let dst = &mut data[start..start + row.len() * 4];
                for (s, d) in row.iter().zip(dst.chunks_exact_mut(4)) {
                    d.copy_from_slice(&[s.b, s.g, s.r, s.a]);
                }
            }
        }
        Ok(bitmap)
    }
}

impl TryFrom<ImgVec<Rgb<u8>>> for Bitmap {
    type Error = SurfaceError;

    /// Copy an RGB image into a fresh RGB24 bitmap (`B G R` order).
    fn try_from(img: ImgVec<Rgb<u8>>) -> Result<Self, SurfaceError> {
        let bitmap = Bitmap::new(img.width() as u32, img.height() as u32, PixelFormat::Rgb24)?;
        {
            let mut data = bitmap.data.borrow_mut();
            for (y, row) in img.rows().enumerate() {
                let start = bitmap.offset + y * bitmap.stride;
                let dst = &mut data[start..start + row.len() * 3];
                for (s, d) in row.iter().zip(dst.chunks_exact_mut(3)) {
                    d.copy_from_slice(&[s.b, s.g, s.r]);
                }
            }
        }
        Ok(bitmap)
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Aligned stride for the given dimensions, validating them.
fn stride_for(width: u32, height: u32, format: PixelFormat) -> Result<usize, SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions);
    }
    let raw = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or(SurfaceError::InvalidDimensions)?;
    let stride = align_up(raw, SCANLINE_ALIGN);
    stride
        .checked_mul(height as usize)
        .ok_or(SurfaceError::InvalidDimensions)?;
    Ok(stride)
}

/// Round `val` up to the next multiple of `align` (a power of 2).
const fn align_up(val: usize, align: usize) -> usize {
    (val + align - 1) & !(align - 1)
}

/// Byte offset needed to align `ptr` to `align`.
fn align_offset(ptr: *const u8, align: usize) -> usize {
    let addr = ptr as usize;
    align_up(addr, align) - addr
}
