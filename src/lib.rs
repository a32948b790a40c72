//! # doppel
//!
//! *Twice the pixels, none of the blur.*
//!
//! Edge-adaptive 2x upscaling for 16-bit RGB565 pixel buffers: the
//! classic 2xSaI filter, in safe Rust. Every source pixel becomes a 2x2
//! output block: the original sample survives untouched in the top-left
//! corner, and the other three pixels are synthesized from the local 4x4
//! pattern, so diagonal edges stay crisp where plain averaging would
//! smear them.
//!
//! ## Core operations (always available)
//!
//! All functions in the crate root operate on caller-owned `&[u16]` /
//! `&mut [u16]` buffers (native-endian RGB565 words), contiguous or
//! strided, with a `&[u8]` entry point for hosts that hold raw frame
//! bytes. The transform itself allocates nothing.
//!
//! Hosts with their own thread pool construct a [`Sai2x`] instance and
//! ask it for [`Slice`] work units: independent row bands that may be
//! executed in any order, on any threads. Output is byte-identical for
//! every worker count.
//!
//! ## Feature flags
//!
//! - **`parallel`** — [`parallel::scale_rgb565_parallel`] runs the work
//!   units on rayon's pool. Implies `std`.
//! - **`imgref`** — whole-image conversions using [`imgref`] types
//!   (`ImgRef<u16>`, `ImgVec<u16>`).

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod bands;
mod filter;
mod kernel;
mod mix;
mod neighbors;
mod scale;

pub use bands::{Band, Slice, partition};
pub use filter::{CreateError, PixelFormat, Sai2x, Upscaler};
pub use kernel::{Expanded, expand};
pub use mix::{corner_bias, corner_bias_rev, mix2, mix4};
pub use neighbors::Neighborhood;
pub use scale::{scale_rgb565, scale_rgb565_bytes, scale_rgb565_strided};

#[cfg(feature = "parallel")]
pub mod parallel;

#[cfg(feature = "imgref")]
pub mod imgref;

/// Buffer geometry rejected by a checked entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeError {
    /// Byte-level input is misaligned or not a whole number of pixels.
    NotPixelAligned,
    /// Zero dimension, stride smaller than the row width, or a geometry
    /// product that overflows.
    InvalidStride,
    /// Buffer shorter than the described geometry requires.
    PixelCountMismatch,
    /// Frame exceeds the maximum dimensions the instance was created for.
    FrameTooLarge,
}

impl core::fmt::Display for SizeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SizeError::NotPixelAligned => f.write_str("buffer is not aligned to whole pixels"),
            SizeError::InvalidStride => f.write_str("invalid stride or dimensions"),
            SizeError::PixelCountMismatch => f.write_str("buffer too small for the given geometry"),
            SizeError::FrameTooLarge => f.write_str("frame exceeds the declared maximum dimensions"),
        }
    }
}

impl core::error::Error for SizeError {}
