//! Whole-image upscaling using [`imgref`] types.
//!
//! The strided core operations do the work row-by-row; this layer only
//! adds the output allocation. Pixels are raw RGB565 words, so the image
//! type is `Img<u16>`.
//!
//! ```rust
//! use imgref::ImgVec;
//! use doppel::imgref::scale_img;
//!
//! let src = ImgVec::new(vec![0x7BEFu16; 320 * 240], 320, 240);
//! let big = scale_img(src.as_ref()).unwrap();
//! assert_eq!((big.width(), big.height()), (640, 480));
//! ```

use alloc::vec;

use ::imgref::{ImgRef, ImgVec};

use crate::SizeError;

/// Upscales a frame into a freshly allocated image of twice the width
/// and height. The source may be a strided sub-view; the output is
/// always contiguous.
pub fn scale_img(src: ImgRef<'_, u16>) -> Result<ImgVec<u16>, SizeError> {
    let w = src.width();
    let h = src.height();
    let pixels = w
        .checked_mul(h)
        .and_then(|v| v.checked_mul(4))
        .ok_or(SizeError::InvalidStride)?;
    let mut buf = vec![0u16; pixels];
    crate::scale_rgb565_strided(src.buf(), &mut buf, w, h, src.stride(), 2 * w)?;
    Ok(ImgVec::new(buf, 2 * w, 2 * h))
}
