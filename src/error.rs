//! Error type for surface construction, locking, and drawing.

use crate::bitmap::LockMode;
use crate::format::PixelFormat;

/// Errors from bitmap construction, locking, and pixel operations.
///
/// Every variant is unrecoverable at the point of detection and is
/// surfaced to the caller immediately; nothing here is transient and no
/// operation retries internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SurfaceError {
    /// Width or height is zero, or the byte size overflows.
    InvalidDimensions,
    /// Lock region lies outside the bitmap or is empty.
    InvalidRegion,
    /// Supplied storage is too small for the dimensions and stride.
    BufferTooSmall,
    /// A lock is already open on this bitmap; only one may be live.
    AlreadyLocked,
    /// The container refused to grant a lock in the requested format.
    FormatNotSupported(PixelFormat),
    /// The locked format has no specialized pixel processor. Raised on
    /// the first pixel operation, not at lock time.
    UnsupportedFormat {
        /// The offending format.
        format: PixelFormat,
        /// The formats a processor exists for.
        supported: &'static [PixelFormat],
    },
    /// The operation is not permitted by the lock's access mode.
    WrongLockMode(LockMode),
}

impl core::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions => write!(f, "width or height is zero or causes overflow"),
            Self::InvalidRegion => write!(f, "lock region is empty or outside the bitmap"),
            Self::BufferTooSmall => {
                write!(f, "storage is too small for the given dimensions and stride")
            }
            Self::AlreadyLocked => write!(f, "bitmap already has a live lock"),
            Self::FormatNotSupported(fmt) => {
                write!(f, "container cannot grant a lock in format {fmt}")
            }
            Self::UnsupportedFormat { format, .. } => {
                write!(f, "no pixel processor for format {format}")
            }
            Self::WrongLockMode(mode) => {
                write!(f, "operation not permitted by {mode:?} lock mode")
            }
        }
    }
}
