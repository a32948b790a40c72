// ---------------------------------------------------------------------------
// Row-band partitioning and the per-band work units.
//
// Workers share the source read-only and each own a disjoint &mut range
// of destination rows, so a unit list can go to any thread pool with no
// locking and no ordering between units.
// ---------------------------------------------------------------------------

use alloc::vec::Vec;

use crate::kernel::expand_row;

/// One worker's contiguous band of source rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First source row of the band.
    pub y_start: usize,
    /// Number of source rows (zero when workers outnumber rows).
    pub rows: usize,
    /// The band starts at the image's first row.
    pub top_edge: bool,
    /// The band ends at the image's last row.
    pub bottom_edge: bool,
}

/// Splits `height` source rows into `workers` bands.
///
/// Band `w` covers `[height * w / workers, height * (w + 1) / workers)`:
/// gap-free, overlap-free, and identical every time for the same
/// `(height, workers)` pair. A `workers` of zero is treated as one.
pub fn partition(height: usize, workers: usize) -> impl Iterator<Item = Band> {
    let workers = workers.max(1);
    (0..workers).map(move |w| {
        let y_start = band_edge(height, w, workers);
        let y_end = band_edge(height, w + 1, workers);
        Band {
            y_start,
            rows: y_end - y_start,
            top_edge: y_start == 0,
            bottom_edge: y_end == height,
        }
    })
}

#[inline]
fn band_edge(height: usize, w: usize, workers: usize) -> usize {
    ((height as u128 * w as u128) / workers as u128) as usize
}

/// An independently executable work unit: one band of the output image.
///
/// The unit reads the shared source (including rows of neighboring bands
/// for context) and writes only its own destination rows. `Slice` is
/// `Send`, so a host thread pool may run a unit list in any order or
/// fully in parallel; the result never depends on the band layout.
pub struct Slice<'a> {
    pub(crate) src: &'a [u16],
    pub(crate) src_stride: usize,
    pub(crate) dst: &'a mut [u16],
    pub(crate) dst_stride: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) band: Band,
}

impl Slice<'_> {
    /// The source rows this unit covers.
    pub fn band(&self) -> Band {
        self.band
    }

    /// Expands every source row of the band into two destination rows.
    pub fn run(&mut self) {
        let w = self.width;
        for r in 0..self.band.rows {
            let y = self.band.y_start + r;
            let row = &self.src[y * self.src_stride..][..w];
            let first = self.band.top_edge && r == 0;
            let last = self.band.bottom_edge && r + 1 == self.band.rows;
            // Rows outside the image are replaced by the row itself. At
            // the image's last row every out-of-band lookup collapses,
            // the upward one included; elsewhere the band freely reads
            // its neighbors' rows from the shared source.
            let above = if first || last {
                row
            } else {
                &self.src[(y - 1) * self.src_stride..][..w]
            };
            let below = if last {
                row
            } else {
                &self.src[(y + 1) * self.src_stride..][..w]
            };
            let below2 = if last {
                row
            } else {
                let yy = (y + 2).min(self.height - 1);
                &self.src[yy * self.src_stride..][..w]
            };
            let (top, bottom) = self.dst[2 * r * self.dst_stride..].split_at_mut(self.dst_stride);
            expand_row(above, row, below, below2, &mut top[..2 * w], &mut bottom[..2 * w], w);
        }
    }
}

/// Binds each band to its destination rows, in order. The destination is
/// carved into disjoint `&mut` pieces, one per band.
pub(crate) fn split_units<'a>(
    src: &'a [u16],
    src_stride: usize,
    dst: &'a mut [u16],
    dst_stride: usize,
    width: usize,
    height: usize,
    bands: impl Iterator<Item = Band>,
) -> Vec<Slice<'a>> {
    let mut units = Vec::new();
    let mut rest = dst;
    for band in bands {
        let need = 2 * band.rows * dst_stride;
        // The final destination row may stop short of a full stride.
        let split = need.min(rest.len());
        let (mine, tail) = core::mem::take(&mut rest).split_at_mut(split);
        rest = tail;
        units.push(Slice {
            src,
            src_stride,
            dst: mine,
            dst_stride,
            width,
            height,
            band,
        });
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn partition_is_exact_and_ordered() {
        for height in [1usize, 2, 3, 7, 16, 240, 241] {
            for workers in [1usize, 2, 3, 4, 5, 8, 17] {
                let bands: Vec<Band> = partition(height, workers).collect();
                assert_eq!(bands.len(), workers);
                assert_eq!(bands[0].y_start, 0);
                assert!(bands[0].top_edge);
                assert!(bands[workers - 1].bottom_edge);
                let mut next = 0;
                for band in &bands {
                    assert_eq!(band.y_start, next, "h={height} n={workers}");
                    next = band.y_start + band.rows;
                    assert_eq!(band.top_edge, band.y_start == 0);
                    assert_eq!(band.bottom_edge, next == height);
                }
                assert_eq!(next, height);
            }
        }
    }

    #[test]
    fn partition_is_stable() {
        let a: Vec<Band> = partition(239, 6).collect();
        let b: Vec<Band> = partition(239, 6).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn partition_with_more_workers_than_rows() {
        let bands: Vec<Band> = partition(2, 5).collect();
        let total: usize = bands.iter().map(|b| b.rows).sum();
        assert_eq!(total, 2);
        assert!(bands.iter().all(|b| b.rows <= 1));
    }

    #[test]
    fn partition_normalizes_zero_workers() {
        let bands: Vec<Band> = partition(10, 0).collect();
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].rows, 10);
    }

    #[test]
    fn split_units_hands_out_disjoint_rows() {
        let width = 4;
        let height = 6;
        let src = vec![0u16; width * height];
        let mut dst = vec![0u16; width * height * 4];
        let units = split_units(&src, width, &mut dst, 2 * width, width, height, partition(height, 3));
        assert_eq!(units.len(), 3);
        let total: usize = units.iter().map(|u| u.dst.len()).sum();
        assert_eq!(total, width * height * 4);
        for unit in &units {
            assert_eq!(unit.dst.len(), unit.band.rows * 2 * 2 * width);
        }
    }

    #[test]
    fn unit_marks_its_band() {
        let src = vec![0u16; 8];
        let mut dst = vec![0u16; 32];
        let units = split_units(&src, 4, &mut dst, 8, 4, 2, partition(2, 2));
        assert_eq!(units[0].band().y_start, 0);
        assert!(units[0].band().top_edge);
        assert!(!units[0].band().bottom_edge);
        assert!(units[1].band().bottom_edge);
    }
}
