//! Exclusive pixel-surface locking and primitive drawing over raw bitmap
//! memory.
//!
//! The crate is organized around three types:
//!
//! - [`Bitmap`] — owned scanline storage with a pixel format
//! - [`BitmapLock`] — the exclusive lock a bitmap hands out, carrying the
//!   whole drawing API (pixels, lines, rectangles, block copies)
//! - [`Color`] — the ARGB value every operation speaks, independent of
//!   the surface byte layout
//!
//! At most one lock is live per bitmap; a second attempt fails with
//! [`SurfaceError::AlreadyLocked`]. Formats split into drawable ones
//! (RGB24, RGB32, ARGB32) and storable-only ones, which lock fine but
//! fail with [`SurfaceError::UnsupportedFormat`] on the first pixel
//! operation.
//!
//! ```
//! use zensurface::{Bitmap, Color, PixelFormat, Rect};
//!
//! let bitmap = Bitmap::new(64, 64, PixelFormat::Argb32)?;
//! let mut lock = bitmap.lock()?;
//! lock.fill_rectangle(Rect::new(8, 8, 48, 48), Color::BLUE)?;
//! lock.draw_rectangle(Rect::new(8, 8, 48, 48), Color::WHITE)?;
//! lock.draw_line(8, 8, 55, 55, Color::RED)?;
//! # Ok::<(), zensurface::SurfaceError>(())
//! ```

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod bitmap;
mod color;
mod error;
mod format;
mod lock;
mod processor;
mod raster;
mod rect;

pub use bitmap::{Bitmap, LockMode, LockOptions};
pub use color::Color;
pub use error::SurfaceError;
pub use format::PixelFormat;
pub use lock::{BitmapLock, PixelSource};
pub use raster::walk_line;
pub use rect::Rect;

// Re-exports for interop with the imgref/rgb ecosystem.
pub use imgref::{Img, ImgRef, ImgRefMut, ImgVec};
pub use rgb;
pub use rgb::alt::BGRA as Bgra;
pub use rgb::{Rgb, Rgba};
