//! The lock facade: exclusive, format-typed access to a bitmap region.
//!
//! A [`BitmapLock`] is handed out by [`Bitmap::lock_bits`](crate::Bitmap::lock_bits)
//! and owns the storage borrow for its whole lifetime — dropping the lock
//! (or calling [`unlock`](BitmapLock::unlock)) is what releases the
//! bitmap. The matching pixel processor is selected once at lock time;
//! every drawing operation forwards to it.
//!
//! Coordinates are a caller contract: the engine does not clip, and an
//! out-of-range pixel access panics on the internal bounds-described
//! slice rather than touching memory outside the region.

use alloc::vec::Vec;
use core::cell::RefMut;

use crate::bitmap::LockMode;
use crate::color::Color;
use crate::error::SurfaceError;
use crate::format::PixelFormat;
use crate::processor::{BufferLayout, Processor};
use crate::raster::walk_line;
use crate::rect::Rect;

/// Anything pixels can be pulled from, via the public read contract.
///
/// [`BitmapLock`] implements this, but so can foreign surfaces; the
/// generic [`copy_from_source`](BitmapLock::copy_from_source) path uses
/// only this trait and therefore never sees the source's memory layout.
pub trait PixelSource {
    /// Source width in pixels.
    fn source_width(&self) -> u32;
    /// Source height in pixels.
    fn source_height(&self) -> u32;
    /// Read one pixel. Coordinates must be in bounds.
    fn read_pixel(&self, x: u32, y: u32) -> Result<Color, SurfaceError>;
}

/// Exclusive lock over a bitmap region, with the drawing contract.
///
/// Not cloneable; exactly one may be live per bitmap. Releasing happens
/// exactly once, on drop.
pub struct BitmapLock<'a> {
    guard: RefMut<'a, Vec<u8>>,
    layout: BufferLayout,
    processor: Processor,
    mode: LockMode,
}

impl<'a> BitmapLock<'a> {
    pub(crate) fn new(guard: RefMut<'a, Vec<u8>>, layout: BufferLayout, mode: LockMode) -> Self {
        Self {
            guard,
            processor: Processor::select(layout.format),
            layout,
            mode,
        }
    }

    /// Locked region width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    /// Locked region height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.layout.height
    }

    /// Byte stride between scanline starts.
    #[inline]
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    /// Pixel format of the locked region.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.layout.format
    }

    /// Access mode this lock was granted with.
    #[inline]
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    fn ensure_readable(&self) -> Result<(), SurfaceError> {
        if self.mode.readable() {
            Ok(())
        } else {
            Err(SurfaceError::WrongLockMode(self.mode))
        }
    }

    fn ensure_writable(&self) -> Result<(), SurfaceError> {
        if self.mode.writable() {
            Ok(())
        } else {
            Err(SurfaceError::WrongLockMode(self.mode))
        }
    }

    /// Read the pixel at `(x, y)`. Formats without alpha report `a = 255`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the locked region.
    pub fn get(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        self.ensure_readable()?;
        self.processor.get(self.guard.as_slice(), &self.layout, x, y)
    }

    /// Write the pixel at `(x, y)`. Formats without alpha ignore `color.a`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the locked region.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        let layout = self.layout;
        self.processor
            .set(self.guard.as_mut_slice(), &layout, x, y, color)
    }

    /// Draw `count` pixels along increasing x starting at `(x, y)`.
    ///
    /// A negative `count` draws backward: the painted pixels are exactly
    /// those of `draw_horizontal_line(x + count, y, -count, ..)`. A zero
    /// count is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the run leaves the locked region.
    pub fn draw_horizontal_line(
        &mut self,
        x: i32,
        y: i32,
        count: i32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        if count == 0 {
            return Ok(());
        }
        let (x, count) = if count < 0 { (x + count, -count) } else { (x, count) };
        let layout = self.layout;
        self.processor.fill_run(
            self.guard.as_mut_slice(),
            &layout,
            x as u32,
            y as u32,
            count as u32,
            color,
        )
    }

    /// Draw `count` pixels along increasing y starting at `(x, y)`.
    ///
    /// Negative and zero counts behave as in
    /// [`draw_horizontal_line`](Self::draw_horizontal_line).
    ///
    /// # Panics
    ///
    /// Panics if the run leaves the locked region.
    pub fn draw_vertical_line(
        &mut self,
        x: i32,
        y: i32,
        count: i32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        if count == 0 {
            return Ok(());
        }
        let (y, count) = if count < 0 { (y + count, -count) } else { (y, count) };
        let layout = self.layout;
        self.processor.fill_column(
            self.guard.as_mut_slice(),
            &layout,
            x as u32,
            y as u32,
            count as u32,
            color,
        )
    }

    /// Draw the 1-pixel border of `rect`: full-width top and bottom
    /// rows, then the left/right columns strictly between them, so no
    /// corner is painted twice. Empty rectangles are a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the rectangle leaves the locked region.
    pub fn draw_rectangle(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        if rect.is_empty() {
            return Ok(());
        }
        self.draw_horizontal_line(rect.x, rect.y, rect.width, color)?;
        if rect.height > 1 {
            self.draw_horizontal_line(rect.x, rect.bottom() - 1, rect.width, color)?;
            let inner = rect.height - 2;
            if inner > 0 {
                self.draw_vertical_line(rect.x, rect.y + 1, inner, color)?;
                if rect.width > 1 {
                    self.draw_vertical_line(rect.right() - 1, rect.y + 1, inner, color)?;
                }
            }
        }
        Ok(())
    }

    /// Fill `rect` with `color`. Empty rectangles are a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the rectangle leaves the locked region.
    pub fn fill_rectangle(&mut self, rect: Rect, color: Color) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        if rect.is_empty() {
            return Ok(());
        }
        let layout = self.layout;
        self.processor.fill_rect(
            self.guard.as_mut_slice(),
            &layout,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
            color,
        )
    }

    /// Draw the segment `(x0, y0)`-`(x1, y1)`, both endpoints included.
    ///
    /// Axis-aligned segments take the bulk run/column paths; everything
    /// else goes through the integer line walker.
    ///
    /// # Panics
    ///
    /// Panics if any point of the segment leaves the locked region.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        if y0 == y1 {
            let (start, count) = if x1 >= x0 {
                (x0, x1 - x0 + 1)
            } else {
                (x1, x0 - x1 + 1)
            };
            return self.draw_horizontal_line(start, y0, count, color);
        }
        if x0 == x1 {
            let (start, count) = if y1 >= y0 {
                (y0, y1 - y0 + 1)
            } else {
                (y1, y0 - y1 + 1)
            };
            return self.draw_vertical_line(x0, start, count, color);
        }

        let layout = self.layout;
        let processor = self.processor;
        let data = self.guard.as_mut_slice();
        walk_line(x0, y0, x1, y1, |x, y| {
            processor.set(data, &layout, x as u32, y as u32, color)
        })
    }

    /// Copy a `w` x `h` block from another lock's region into this one.
    ///
    /// When both locks share a pixel format, whole rows are copied as
    /// raw bytes with no per-pixel work; otherwise each pixel is read,
    /// reordered, and written individually.
    ///
    /// # Panics
    ///
    /// Panics if either block leaves its locked region.
    pub fn copy_from(
        &mut self,
        src: &BitmapLock<'_>,
        src_x: u32,
        src_y: u32,
        dst_x: u32,
        dst_y: u32,
        w: u32,
        h: u32,
    ) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        src.ensure_readable()?;
        if w == 0 || h == 0 {
            return Ok(());
        }
        let dst_layout = self.layout;
        if src.layout.format == dst_layout.format {
            return self.processor.copy_rows(
                self.guard.as_mut_slice(),
                &dst_layout,
                src.guard.as_slice(),
                &src.layout,
                src_x,
                src_y,
                dst_x,
                dst_y,
                w,
                h,
            );
        }
        let processor = self.processor;
        let dst = self.guard.as_mut_slice();
        for y in 0..h {
            for x in 0..w {
                let c = src
                    .processor
                    .get(src.guard.as_slice(), &src.layout, src_x + x, src_y + y)?;
                processor.set(dst, &dst_layout, dst_x + x, dst_y + y, c)?;
            }
        }
        Ok(())
    }

    /// Copy a block from an arbitrary [`PixelSource`], pixel by pixel,
    /// using only its public read contract.
    ///
    /// # Panics
    ///
    /// Panics if the destination block leaves the locked region.
    pub fn copy_from_source(
        &mut self,
        src: &dyn PixelSource,
        src_x: u32,
        src_y: u32,
        dst_x: u32,
        dst_y: u32,
        w: u32,
        h: u32,
    ) -> Result<(), SurfaceError> {
        self.ensure_writable()?;
        let layout = self.layout;
        let processor = self.processor;
        let dst = self.guard.as_mut_slice();
        for y in 0..h {
            for x in 0..w {
                let c = src.read_pixel(src_x + x, src_y + y)?;
                processor.set(dst, &layout, dst_x + x, dst_y + y, c)?;
            }
        }
        Ok(())
    }

    /// Release the lock now. Equivalent to dropping it; the bitmap can
    /// be locked again afterwards.
    pub fn unlock(self) {}
}

impl PixelSource for BitmapLock<'_> {
    fn source_width(&self) -> u32 {
        self.layout.width
    }

    fn source_height(&self) -> u32 {
        self.layout.height
    }

    fn read_pixel(&self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        self.get(x, y)
    }
}

impl core::fmt::Debug for BitmapLock<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "BitmapLock({}x{}, {}, {:?})",
            self.layout.width, self.layout.height, self.layout.format, self.mode
        )
    }
}
