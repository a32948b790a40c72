// ---------------------------------------------------------------------------
// Filter lifecycle and capability surface: format negotiation, instance
// construction, and work-unit production for host-managed thread pools.
// ---------------------------------------------------------------------------

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use crate::SizeError;
use crate::bands::{Band, Slice, partition, split_units};
use crate::scale::check_frames;

/// Pixel layouts a filter can negotiate.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 16 bits per pixel: red 5, green 6, blue 5.
    Rgb565,
    /// 32 bits per pixel, alpha byte unused. Recognized but not accepted
    /// by this filter.
    Xrgb8888,
}

impl PixelFormat {
    /// Bytes per pixel for the layout.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 => 2,
            PixelFormat::Xrgb8888 => 4,
        }
    }
}

/// Instance construction failures. Either way no instance exists and no
/// state is retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    /// The requested input/output format pair is not supported.
    UnsupportedFormat {
        input: PixelFormat,
        output: PixelFormat,
    },
    /// The per-worker band table could not be reserved.
    ScratchAlloc(TryReserveError),
}

impl core::fmt::Display for CreateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CreateError::UnsupportedFormat { input, output } => {
                write!(f, "unsupported format pair: {input:?} -> {output:?}")
            }
            CreateError::ScratchAlloc(_) => f.write_str("could not reserve per-worker state"),
        }
    }
}

impl core::error::Error for CreateError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CreateError::ScratchAlloc(e) => Some(e),
            CreateError::UnsupportedFormat { .. } => None,
        }
    }
}

/// Capability surface of an upscaling filter.
///
/// One implementation exists today ([`Sai2x`]); further filters are
/// additional implementations of this trait, not variations of it.
pub trait Upscaler {
    /// Pixel formats accepted as input.
    fn input_formats(&self) -> &'static [PixelFormat];

    /// Output format produced for `input`, if the input is accepted.
    fn output_format(&self, input: PixelFormat) -> Option<PixelFormat>;

    /// Fixed (horizontal, vertical) scale factor.
    fn scale_factor(&self) -> (usize, usize);

    /// Worker count negotiated at construction. The filter imposes no
    /// cap of its own beyond normalizing zero to one.
    fn worker_count(&self) -> usize;

    /// Output dimensions for an input frame of `width` x `height`.
    fn output_size(&self, width: usize, height: usize) -> (usize, usize);
}

/// A configured 2xSaI filter instance.
///
/// Construction negotiates formats and reserves the per-worker band
/// table; [`Sai2x::work_units`] then partitions each frame into
/// independent [`Slice`] units for the host to execute. Dropping the
/// instance releases everything.
#[derive(Debug)]
pub struct Sai2x {
    workers: usize,
    max_width: usize,
    max_height: usize,
    bands: Vec<Band>,
}

impl Sai2x {
    /// Algorithm name, as a host would list it in a filter menu.
    pub const NAME: &'static str = "2xSaI";

    /// Creates an instance for frames up to `max_width` x `max_height`,
    /// partitioned across `workers` row bands per frame.
    pub fn new(
        input: PixelFormat,
        output: PixelFormat,
        max_width: usize,
        max_height: usize,
        workers: usize,
    ) -> Result<Self, CreateError> {
        if input != PixelFormat::Rgb565 || output != PixelFormat::Rgb565 {
            return Err(CreateError::UnsupportedFormat { input, output });
        }
        let workers = workers.max(1);
        let mut bands = Vec::new();
        bands
            .try_reserve_exact(workers)
            .map_err(CreateError::ScratchAlloc)?;
        Ok(Self {
            workers,
            max_width,
            max_height,
            bands,
        })
    }

    /// Partitions one frame into independent work units, one per worker.
    ///
    /// `src` holds `width` x `height` RGB565 pixels at `src_stride`
    /// pixels per row; `dst` must accommodate the doubled frame at
    /// `dst_stride`. The units borrow both buffers; each writes a
    /// disjoint destination band and they may run on any threads in any
    /// order. The transform itself cannot fail once the geometry checks
    /// pass.
    pub fn work_units<'f>(
        &mut self,
        src: &'f [u16],
        src_stride: usize,
        dst: &'f mut [u16],
        dst_stride: usize,
        width: usize,
        height: usize,
    ) -> Result<Vec<Slice<'f>>, SizeError> {
        if width > self.max_width || height > self.max_height {
            return Err(SizeError::FrameTooLarge);
        }
        check_frames(src, dst, width, height, src_stride, dst_stride)?;
        self.bands.clear();
        self.bands.extend(partition(height, self.workers));
        Ok(split_units(
            src,
            src_stride,
            dst,
            dst_stride,
            width,
            height,
            self.bands.iter().copied(),
        ))
    }
}

impl Upscaler for Sai2x {
    fn input_formats(&self) -> &'static [PixelFormat] {
        &[PixelFormat::Rgb565]
    }

    fn output_format(&self, input: PixelFormat) -> Option<PixelFormat> {
        (input == PixelFormat::Rgb565).then_some(PixelFormat::Rgb565)
    }

    fn scale_factor(&self) -> (usize, usize) {
        (2, 2)
    }

    fn worker_count(&self) -> usize {
        self.workers
    }

    fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        (width * 2, height * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn instance(workers: usize) -> Sai2x {
        Sai2x::new(PixelFormat::Rgb565, PixelFormat::Rgb565, 1024, 1024, workers).unwrap()
    }

    #[test]
    fn rejects_unsupported_formats() {
        let err = Sai2x::new(PixelFormat::Xrgb8888, PixelFormat::Rgb565, 64, 64, 1).unwrap_err();
        assert!(matches!(err, CreateError::UnsupportedFormat { .. }));
        let err = Sai2x::new(PixelFormat::Rgb565, PixelFormat::Xrgb8888, 64, 64, 1).unwrap_err();
        assert!(matches!(err, CreateError::UnsupportedFormat { .. }));
    }

    #[test]
    fn capability_queries() {
        let filt = instance(3);
        assert_eq!(filt.input_formats(), &[PixelFormat::Rgb565]);
        assert_eq!(
            filt.output_format(PixelFormat::Rgb565),
            Some(PixelFormat::Rgb565)
        );
        assert_eq!(filt.output_format(PixelFormat::Xrgb8888), None);
        assert_eq!(filt.scale_factor(), (2, 2));
        assert_eq!(filt.worker_count(), 3);
        assert_eq!(filt.output_size(320, 240), (640, 480));
        assert_eq!(Sai2x::NAME, "2xSaI");
    }

    #[test]
    fn zero_workers_normalizes_to_one() {
        assert_eq!(instance(0).worker_count(), 1);
    }

    #[test]
    fn work_units_cover_the_frame() {
        let mut filt = instance(4);
        let src = vec![0u16; 8 * 8];
        let mut dst = vec![0u16; 16 * 16];
        let units = filt.work_units(&src, 8, &mut dst, 16, 8, 8).unwrap();
        assert_eq!(units.len(), 4);
        let rows: usize = units.iter().map(|u| u.band().rows).sum();
        assert_eq!(rows, 8);
    }

    #[test]
    fn work_units_reject_oversized_frames() {
        let mut filt = Sai2x::new(PixelFormat::Rgb565, PixelFormat::Rgb565, 4, 4, 1).unwrap();
        let src = vec![0u16; 8 * 8];
        let mut dst = vec![0u16; 16 * 16];
        assert!(matches!(
            filt.work_units(&src, 8, &mut dst, 16, 8, 8),
            Err(SizeError::FrameTooLarge)
        ));
    }

    #[test]
    fn work_units_reject_bad_geometry() {
        let mut filt = instance(2);
        let src = vec![0u16; 4];
        let mut dst = vec![0u16; 64];
        // Stride below width.
        assert!(matches!(
            filt.work_units(&src, 1, &mut dst, 8, 2, 2),
            Err(SizeError::InvalidStride)
        ));
        // Source buffer too small.
        assert!(matches!(
            filt.work_units(&src, 4, &mut dst, 8, 4, 2),
            Err(SizeError::PixelCountMismatch)
        ));
    }
}
