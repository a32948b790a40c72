//! Rayon-backed execution of the band work units.
//!
//! The serial entry points and [`Sai2x`](crate::Sai2x) work units never
//! touch a thread; this module is the convenience layer for hosts that
//! are happy to borrow rayon's pool instead of bringing their own.

use rayon::prelude::*;

use crate::SizeError;
use crate::bands::{partition, split_units};
use crate::scale::check_frames;

/// 2x-upscales between strided RGB565 buffers, one rayon task per row
/// band.
///
/// Geometry rules match
/// [`scale_rgb565_strided`](crate::scale_rgb565_strided), and the output
/// is byte-identical to the serial entry points for every `workers`
/// value.
pub fn scale_rgb565_parallel(
    src: &[u16],
    dst: &mut [u16],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    workers: usize,
) -> Result<(), SizeError> {
    check_frames(src, dst, width, height, src_stride, dst_stride)?;
    let mut units = split_units(
        src,
        src_stride,
        dst,
        dst_stride,
        width,
        height,
        partition(height, workers),
    );
    units.par_iter_mut().for_each(|unit| unit.run());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn matches_serial_output() {
        let width = 17;
        let height = 11;
        let src: Vec<u16> = (0..width * height)
            .map(|v| (v as u16).wrapping_mul(0x9D2C).rotate_left(3))
            .collect();
        let mut serial = vec![0u16; width * height * 4];
        crate::scale_rgb565(&src, &mut serial, width, height).unwrap();
        for workers in [1, 2, 3, 8, 64] {
            let mut parallel = vec![0u16; width * height * 4];
            scale_rgb565_parallel(
                &src,
                &mut parallel,
                width,
                height,
                width,
                2 * width,
                workers,
            )
            .unwrap();
            assert_eq!(parallel, serial, "workers={workers}");
        }
    }
}
