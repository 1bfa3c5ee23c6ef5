//! Format-specialized pixel processors.
//!
//! A [`Processor`] is the closed set of per-format read/write strategies
//! behind a [`BitmapLock`](crate::BitmapLock). The variant is selected
//! once from the locked format and never re-checked per call; formats
//! without a specialized variant get [`Processor::Unsupported`], whose
//! every operation fails with the offending format and the drawable set.
//!
//! Bulk writes dominate drawing cost, so the run/rect paths avoid the
//! generic per-pixel loop: 32-bit formats fill whole rows as `u32` words,
//! 24-bit rows tile a four-pixel byte pattern, and rectangle rows after
//! the first are raw byte-copies of the first row.

use crate::color::Color;
use crate::error::SurfaceError;
use crate::format::PixelFormat;

/// Byte layout of a locked region inside its backing storage.
///
/// `origin` is the byte offset of the region's top-left pixel; rows are
/// `stride` bytes apart, which may exceed `width * bytes_per_pixel` due
/// to scanline padding.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BufferLayout {
    pub(crate) origin: usize,
    pub(crate) stride: usize,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) format: PixelFormat,
}

impl BufferLayout {
    /// Byte offset of pixel `(x, y)` within the backing storage.
    #[inline]
    pub(crate) fn offset_of(&self, x: u32, y: u32) -> usize {
        self.origin + y as usize * self.stride + x as usize * self.format.bytes_per_pixel()
    }
}

/// Per-format pixel access strategy, fixed at lock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Processor {
    Rgb24,
    Rgb32,
    Argb32,
    Unsupported(PixelFormat),
}

impl Processor {
    /// Pick the variant matching `format`.
    pub(crate) fn select(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Rgb24 => Processor::Rgb24,
            PixelFormat::Rgb32 => Processor::Rgb32,
            PixelFormat::Argb32 => Processor::Argb32,
            other => Processor::Unsupported(other),
        }
    }

    fn refuse(format: PixelFormat) -> SurfaceError {
        SurfaceError::UnsupportedFormat {
            format,
            supported: PixelFormat::DRAWABLE,
        }
    }

    /// Fail for the `Unsupported` variant, succeed otherwise.
    pub(crate) fn ensure_supported(self) -> Result<(), SurfaceError> {
        match self {
            Processor::Unsupported(format) => Err(Self::refuse(format)),
            _ => Ok(()),
        }
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// Formats without an alpha channel report `a = 255`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the layout — in-bounds coordinates
    /// are the caller's contract.
    pub(crate) fn get(
        self,
        data: &[u8],
        layout: &BufferLayout,
        x: u32,
        y: u32,
    ) -> Result<Color, SurfaceError> {
        let o = layout.offset_of(x, y);
        match self {
            Processor::Rgb24 | Processor::Rgb32 => Ok(Color {
                a: 255,
                r: data[o + 2],
                g: data[o + 1],
                b: data[o],
            }),
            Processor::Argb32 => {
                let v = u32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
                Ok(Color::from_argb_u32(v))
            }
            Processor::Unsupported(format) => Err(Self::refuse(format)),
        }
    }

    /// Write the pixel at `(x, y)`.
    ///
    /// Formats without an alpha channel ignore `color.a`; the padding
    /// byte of `Rgb32` is forced to 0xFF so runs and single writes
    /// produce identical bytes.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the layout.
    pub(crate) fn set(
        self,
        data: &mut [u8],
        layout: &BufferLayout,
        x: u32,
        y: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        let o = layout.offset_of(x, y);
        match self {
            Processor::Rgb24 => {
                data[o..o + 3].copy_from_slice(&[color.b, color.g, color.r]);
                Ok(())
            }
            Processor::Rgb32 => {
                data[o..o + 4].copy_from_slice(&[color.b, color.g, color.r, 0xFF]);
                Ok(())
            }
            Processor::Argb32 => {
                data[o..o + 4].copy_from_slice(&color.to_argb_u32().to_le_bytes());
                Ok(())
            }
            Processor::Unsupported(format) => Err(Self::refuse(format)),
        }
    }

    /// Write `count` pixels rightward from `(x, y)`.
    ///
    /// Output is identical to `count` sequential [`set`](Self::set) calls.
    ///
    /// # Panics
    ///
    /// Panics if the run extends past the layout.
    pub(crate) fn fill_run(
        self,
        data: &mut [u8],
        layout: &BufferLayout,
        x: u32,
        y: u32,
        count: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        if count == 0 {
            return Ok(());
        }
        let o = layout.offset_of(x, y);
        match self {
            Processor::Rgb24 => {
                let row = &mut data[o..o + count as usize * 3];
                let px = [color.b, color.g, color.r];
                // Four-pixel tile so the bulk of the run goes out in
                // 12-byte writes; the remainder finishes pixel-by-pixel.
                let tile = [px[0], px[1], px[2], px[0], px[1], px[2], px[0], px[1], px[2], px[0], px[1], px[2]];
                let mut chunks = row.chunks_exact_mut(12);
                for chunk in &mut chunks {
                    chunk.copy_from_slice(&tile);
                }
                for rest in chunks.into_remainder().chunks_exact_mut(3) {
                    rest.copy_from_slice(&px);
                }
                Ok(())
            }
            Processor::Rgb32 => {
                fill_run_u32(
                    &mut data[o..o + count as usize * 4],
                    [color.b, color.g, color.r, 0xFF],
                );
                Ok(())
            }
            Processor::Argb32 => {
                fill_run_u32(
                    &mut data[o..o + count as usize * 4],
                    color.to_argb_u32().to_le_bytes(),
                );
                Ok(())
            }
            Processor::Unsupported(format) => Err(Self::refuse(format)),
        }
    }

    /// Write `count` pixels downward from `(x, y)`, stepping by stride.
    ///
    /// # Panics
    ///
    /// Panics if the column extends past the layout.
    pub(crate) fn fill_column(
        self,
        data: &mut [u8],
        layout: &BufferLayout,
        x: u32,
        y: u32,
        count: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        let (px, bpp) = match self {
            Processor::Rgb24 => ([color.b, color.g, color.r, 0], 3),
            Processor::Rgb32 => ([color.b, color.g, color.r, 0xFF], 4),
            Processor::Argb32 => (color.to_argb_u32().to_le_bytes(), 4),
            Processor::Unsupported(format) => return Err(Self::refuse(format)),
        };
        let mut o = layout.offset_of(x, y);
        for _ in 0..count {
            data[o..o + bpp].copy_from_slice(&px[..bpp]);
            o += layout.stride;
        }
        Ok(())
    }

    /// Fill a `w` x `h` block with `color`.
    ///
    /// The first row is produced by [`fill_run`](Self::fill_run); every
    /// following row is a raw byte-copy of it, valid because all rows of
    /// a solid fill are identical.
    ///
    /// # Panics
    ///
    /// Panics if the block extends past the layout.
    pub(crate) fn fill_rect(
        self,
        data: &mut [u8],
        layout: &BufferLayout,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        if w == 0 || h == 0 {
            return self.ensure_supported();
        }
        self.fill_run(data, layout, x, y, w, color)?;
        let row_len = w as usize * layout.format.bytes_per_pixel();
        let first = layout.offset_of(x, y);
        for row in 1..h {
            let dst = layout.offset_of(x, y + row);
            data.copy_within(first..first + row_len, dst);
        }
        Ok(())
    }

    /// Copy a `w` x `h` block between two buffers of the *same* format —
    /// whole rows as raw bytes, no channel reordering.
    ///
    /// # Panics
    ///
    /// Panics if either block extends past its layout.
    pub(crate) fn copy_rows(
        self,
        dst: &mut [u8],
        dst_layout: &BufferLayout,
        src: &[u8],
        src_layout: &BufferLayout,
        src_x: u32,
        src_y: u32,
        dst_x: u32,
        dst_y: u32,
        w: u32,
        h: u32,
    ) -> Result<(), SurfaceError> {
        self.ensure_supported()?;
        let len = w as usize * dst_layout.format.bytes_per_pixel();
        if len == 0 {
            return Ok(());
        }
        for row in 0..h {
            let so = src_layout.offset_of(src_x, src_y + row);
            let d = dst_layout.offset_of(dst_x, dst_y + row);
            dst[d..d + len].copy_from_slice(&src[so..so + len]);
        }
        Ok(())
    }
}

/// Fill a 4-bytes-per-pixel run with one pixel pattern.
///
/// When the run is 4-byte aligned the whole span is written as `u32`
/// words; caller-supplied storage without that alignment falls back to
/// per-pixel 4-byte copies.
fn fill_run_u32(row: &mut [u8], px: [u8; 4]) {
    match bytemuck::try_cast_slice_mut::<u8, u32>(row) {
        Ok(words) => words.fill(u32::from_ne_bytes(px)),
        Err(_) => {
            for chunk in row.chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn layout(w: u32, h: u32, format: PixelFormat) -> (Vec<u8>, BufferLayout) {
        let stride = w as usize * format.bytes_per_pixel();
        (
            vec![0u8; stride * h as usize],
            BufferLayout {
                origin: 0,
                stride,
                width: w,
                height: h,
                format,
            },
        )
    }

    // --- selection ---

    #[test]
    fn select_matches_format() {
        assert_eq!(Processor::select(PixelFormat::Rgb24), Processor::Rgb24);
        assert_eq!(Processor::select(PixelFormat::Rgb32), Processor::Rgb32);
        assert_eq!(Processor::select(PixelFormat::Argb32), Processor::Argb32);
        assert_eq!(
            Processor::select(PixelFormat::Gray8),
            Processor::Unsupported(PixelFormat::Gray8)
        );
    }

    // --- get/set byte layout ---

    #[test]
    fn argb32_set_writes_bgra_bytes() {
        let (mut data, l) = layout(2, 1, PixelFormat::Argb32);
        Processor::Argb32
            .set(&mut data, &l, 1, 0, Color::argb(0xAA, 0x11, 0x22, 0x33))
            .unwrap();
        assert_eq!(&data[4..8], &[0x33, 0x22, 0x11, 0xAA]);
    }

    #[test]
    fn rgb24_set_writes_bgr_bytes() {
        let (mut data, l) = layout(2, 1, PixelFormat::Rgb24);
        Processor::Rgb24
            .set(&mut data, &l, 1, 0, Color::rgb(10, 20, 30))
            .unwrap();
        assert_eq!(&data[3..6], &[30, 20, 10]);
    }

    #[test]
    fn rgb32_padding_byte_is_opaque() {
        let (mut data, l) = layout(1, 1, PixelFormat::Rgb32);
        Processor::Rgb32
            .set(&mut data, &l, 0, 0, Color::argb(7, 10, 20, 30))
            .unwrap();
        assert_eq!(&data[..4], &[30, 20, 10, 0xFF]);
    }

    #[test]
    fn roundtrip_alpha_semantics() {
        let c = Color::argb(9, 40, 50, 60);

        let (mut data, l) = layout(1, 1, PixelFormat::Argb32);
        Processor::Argb32.set(&mut data, &l, 0, 0, c).unwrap();
        assert_eq!(Processor::Argb32.get(&data, &l, 0, 0).unwrap(), c);

        let (mut data, l) = layout(1, 1, PixelFormat::Rgb24);
        Processor::Rgb24.set(&mut data, &l, 0, 0, c).unwrap();
        assert_eq!(Processor::Rgb24.get(&data, &l, 0, 0).unwrap(), c.opaque());

        let (mut data, l) = layout(1, 1, PixelFormat::Rgb32);
        Processor::Rgb32.set(&mut data, &l, 0, 0, c).unwrap();
        assert_eq!(Processor::Rgb32.get(&data, &l, 0, 0).unwrap(), c.opaque());
    }

    // --- runs and columns ---

    #[test]
    fn fill_run_equals_sequential_sets() {
        for format in [PixelFormat::Rgb24, PixelFormat::Rgb32, PixelFormat::Argb32] {
            let proc = Processor::select(format);
            let c = Color::argb(0x80, 1, 2, 3);

            // 9 pixels: exercises both the tiled body and the remainder.
            let (mut bulk, l) = layout(9, 1, format);
            proc.fill_run(&mut bulk, &l, 0, 0, 9, c).unwrap();

            let (mut reference, _) = layout(9, 1, format);
            for x in 0..9 {
                proc.set(&mut reference, &l, x, 0, c).unwrap();
            }
            assert_eq!(bulk, reference, "mismatch for {format}");
        }
    }

    #[test]
    fn fill_run_partial_leaves_neighbors() {
        let (mut data, l) = layout(5, 1, PixelFormat::Rgb24);
        Processor::Rgb24
            .fill_run(&mut data, &l, 1, 0, 3, Color::WHITE)
            .unwrap();
        assert_eq!(&data[..3], &[0, 0, 0]);
        assert_eq!(&data[3..12], &[255u8; 9]);
        assert_eq!(&data[12..], &[0, 0, 0]);
    }

    #[test]
    fn fill_run_unaligned_storage_falls_back() {
        // Region origin at byte 1 defeats the u32 cast; bytes must still
        // come out right.
        let mut data = vec![0u8; 1 + 3 * 4];
        let l = BufferLayout {
            origin: 1,
            stride: 12,
            width: 3,
            height: 1,
            format: PixelFormat::Argb32,
        };
        Processor::Argb32
            .fill_run(&mut data, &l, 0, 0, 3, Color::argb(4, 3, 2, 1))
            .unwrap();
        assert_eq!(&data[1..5], &[1, 2, 3, 4]);
        assert_eq!(&data[9..13], &[1, 2, 3, 4]);
    }

    #[test]
    fn fill_column_steps_by_stride() {
        let (mut data, l) = layout(3, 4, PixelFormat::Argb32);
        Processor::Argb32
            .fill_column(&mut data, &l, 1, 1, 2, Color::RED)
            .unwrap();
        for y in 0..4u32 {
            for x in 0..3u32 {
                let got = Processor::Argb32.get(&data, &l, x, y).unwrap();
                if x == 1 && (y == 1 || y == 2) {
                    assert_eq!(got, Color::RED);
                } else {
                    assert_eq!(got, Color::argb(0, 0, 0, 0));
                }
            }
        }
    }

    // --- rectangles ---

    #[test]
    fn fill_rect_matches_row_fills() {
        let (mut fast, l) = layout(6, 5, PixelFormat::Rgb24);
        let c = Color::rgb(9, 8, 7);
        Processor::Rgb24.fill_rect(&mut fast, &l, 1, 1, 4, 3, c).unwrap();

        let (mut slow, _) = layout(6, 5, PixelFormat::Rgb24);
        for row in 0..3u32 {
            Processor::Rgb24.fill_run(&mut slow, &l, 1, 1 + row, 4, c).unwrap();
        }
        assert_eq!(fast, slow);
    }

    #[test]
    fn fill_rect_respects_stride_padding() {
        // Stride wider than width * bpp: padding bytes must survive.
        let stride = 16;
        let mut data = vec![0xEEu8; stride * 3];
        let l = BufferLayout {
            origin: 0,
            stride,
            width: 3,
            height: 3,
            format: PixelFormat::Argb32,
        };
        Processor::Argb32
            .fill_rect(&mut data, &l, 0, 0, 3, 3, Color::BLACK)
            .unwrap();
        for y in 0..3 {
            assert_eq!(&data[y * stride + 12..(y + 1) * stride], &[0xEE; 4]);
        }
    }

    // --- block copy ---

    #[test]
    fn copy_rows_moves_block_between_buffers() {
        let (mut src, sl) = layout(4, 4, PixelFormat::Argb32);
        let (mut dst, dl) = layout(4, 4, PixelFormat::Argb32);
        for y in 0..4 {
            for x in 0..4 {
                let c = Color::argb(255, x as u8, y as u8, 0);
                Processor::Argb32.set(&mut src, &sl, x, y, c).unwrap();
            }
        }
        Processor::Argb32
            .copy_rows(&mut dst, &dl, &src, &sl, 1, 1, 0, 2, 2, 2)
            .unwrap();
        assert_eq!(
            Processor::Argb32.get(&dst, &dl, 0, 2).unwrap(),
            Color::argb(255, 1, 1, 0)
        );
        assert_eq!(
            Processor::Argb32.get(&dst, &dl, 1, 3).unwrap(),
            Color::argb(255, 2, 2, 0)
        );
        // Untouched destination pixel.
        assert_eq!(
            Processor::Argb32.get(&dst, &dl, 3, 0).unwrap(),
            Color::argb(0, 0, 0, 0)
        );
    }

    // --- unsupported variant fails loudly ---

    #[test]
    fn unsupported_refuses_every_operation() {
        let (mut data, l) = layout(2, 2, PixelFormat::Gray8);
        let proc = Processor::select(PixelFormat::Gray8);
        let expect = SurfaceError::UnsupportedFormat {
            format: PixelFormat::Gray8,
            supported: PixelFormat::DRAWABLE,
        };

        assert_eq!(proc.get(&data, &l, 0, 0), Err(expect));
        assert_eq!(proc.set(&mut data, &l, 0, 0, Color::RED), Err(expect));
        assert_eq!(proc.fill_run(&mut data, &l, 0, 0, 2, Color::RED), Err(expect));
        assert_eq!(
            proc.fill_column(&mut data, &l, 0, 0, 2, Color::RED),
            Err(expect)
        );
        assert_eq!(
            proc.fill_rect(&mut data, &l, 0, 0, 2, 2, Color::RED),
            Err(expect)
        );
        // Memory untouched.
        assert!(data.iter().all(|&b| b == 0));
    }
}
