// ---------------------------------------------------------------------------
// Checked public entry points over raw pixel slices.
// ---------------------------------------------------------------------------

use crate::SizeError;
use crate::bands::{partition, split_units};

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_strided(len: usize, width: usize, height: usize, stride: usize) -> Result<(), SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidStride);
    }
    if stride < width {
        return Err(SizeError::InvalidStride);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(SizeError::InvalidStride)?;
    if len < total {
        return Err(SizeError::PixelCountMismatch);
    }
    Ok(())
}

pub(crate) fn check_frames(
    src: &[u16],
    dst: &[u16],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_strided(src.len(), width, height, src_stride)?;
    let out_w = width.checked_mul(2).ok_or(SizeError::InvalidStride)?;
    let out_h = height.checked_mul(2).ok_or(SizeError::InvalidStride)?;
    check_strided(dst.len(), out_w, out_h, dst_stride)
}

// ===========================================================================
// Public API
// ===========================================================================

/// 2x-upscales a contiguous RGB565 frame.
///
/// `src` holds `width * height` pixels row-major with no padding; `dst`
/// receives `2 * width` by `2 * height` pixels, also unpadded. Every
/// source pixel lands unchanged at the even (column, row) of its output
/// block.
pub fn scale_rgb565(
    src: &[u16],
    dst: &mut [u16],
    width: usize,
    height: usize,
) -> Result<(), SizeError> {
    let dst_stride = width.checked_mul(2).ok_or(SizeError::InvalidStride)?;
    scale_rgb565_strided(src, dst, width, height, width, dst_stride)
}

/// 2x-upscales between strided RGB565 buffers.
///
/// `src_stride` / `dst_stride` are the distances in **pixels** between
/// the start of consecutive rows; each must be at least the respective
/// row width, and padding pixels are never read or written. The source
/// must hold at least `(height - 1) * src_stride + width` pixels and the
/// destination `(2 * height - 1) * dst_stride + 2 * width`.
pub fn scale_rgb565_strided(
    src: &[u16],
    dst: &mut [u16],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), SizeError> {
    check_frames(src, dst, width, height, src_stride, dst_stride)?;
    let mut units = split_units(
        src,
        src_stride,
        dst,
        dst_stride,
        width,
        height,
        partition(height, 1),
    );
    for unit in &mut units {
        unit.run();
    }
    Ok(())
}

/// 2x-upscales a contiguous frame held as raw bytes.
///
/// Both buffers are reinterpreted as native-endian RGB565 words; a
/// misaligned or odd-length buffer is rejected.
pub fn scale_rgb565_bytes(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), SizeError> {
    let src: &[u16] = bytemuck::try_cast_slice(src).map_err(|_| SizeError::NotPixelAligned)?;
    let dst: &mut [u16] =
        bytemuck::try_cast_slice_mut(dst).map_err(|_| SizeError::NotPixelAligned)?;
    scale_rgb565(src, dst, width, height)
}
