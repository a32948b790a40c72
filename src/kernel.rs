// ---------------------------------------------------------------------------
// The per-pixel decision procedure: classify the local equality pattern
// and synthesize the three new pixels of the 2x2 output block.
// ---------------------------------------------------------------------------

use crate::mix::{corner_bias, corner_bias_rev, mix2, mix4};
use crate::neighbors::Neighborhood;

/// The three synthesized pixels of one 2x2 output block, named by their
/// position relative to the source sample (which always occupies the
/// block's top-left corner unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expanded {
    /// Top-right output pixel.
    pub right: u16,
    /// Bottom-left output pixel.
    pub below: u16,
    /// Bottom-right output pixel.
    pub diag: u16,
}

/// Expands one pixel from its gathered neighborhood.
///
/// Pure and total: every equality pattern lands in exactly one arm, and
/// the arms are tried in a fixed order (main diagonal, anti-diagonal,
/// both diagonals, general). Pixel comparisons are bitwise.
pub fn expand(nb: &Neighborhood) -> Expanded {
    let Neighborhood {
        i,
        e,
        f,
        j,
        g,
        a,
        b,
        k,
        h,
        c,
        d,
        l,
        m,
        n,
        o,
    } = *nb;

    if a == d && b != c {
        // Main diagonal runs through the block; keep it solid where the
        // surrounding pattern continues it, blend where it does not.
        let right = if (a == e && b == l) || (a == c && a == f && b != e && b == j) {
            a
        } else {
            mix2(a, b)
        };
        let below = if (a == g && c == o) || (a == b && a == h && g != c && c == m) {
            a
        } else {
            mix2(a, c)
        };
        Expanded {
            right,
            below,
            diag: a,
        }
    } else if b == c && a != d {
        let right = if (b == f && a == h) || (b == e && b == d && a != f && a == i) {
            b
        } else {
            mix2(a, b)
        };
        let below = if (c == h && a == f) || (c == g && c == d && a != h && a == i) {
            c
        } else {
            mix2(a, c)
        };
        Expanded {
            right,
            below,
            diag: b,
        }
    } else if a == d && b == c {
        if a == b {
            // Flat block.
            Expanded {
                right: a,
                below: a,
                diag: a,
            }
        } else {
            // Both diagonals present: let the wider context vote on which
            // color owns the contested corner.
            let below = mix2(a, c);
            let right = mix2(a, b);
            let r = corner_bias(a, b, g, e)
                + corner_bias_rev(b, a, k, f)
                + corner_bias_rev(b, a, h, n)
                + corner_bias(a, b, l, o);
            let diag = if r > 0 {
                a
            } else if r < 0 {
                b
            } else {
                mix4(a, b, c, d)
            };
            Expanded { right, below, diag }
        }
    } else {
        let diag = mix4(a, b, c, d);
        let right = if a == c && a == f && b != e && b == j {
            a
        } else if b == e && b == d && a != f && a == i {
            b
        } else {
            mix2(a, b)
        };
        let below = if a == b && a == h && g != c && c == m {
            a
        } else if c == g && c == d && a != h && a == i {
            c
        } else {
            mix2(a, c)
        };
        Expanded { right, below, diag }
    }
}

/// Expands one source row into two output rows. `top` and `bottom`
/// receive `2 * width` pixels each.
pub(crate) fn expand_row(
    above: &[u16],
    row: &[u16],
    below: &[u16],
    below2: &[u16],
    top: &mut [u16],
    bottom: &mut [u16],
    width: usize,
) {
    for x in 0..width {
        let nb = Neighborhood::gather(above, row, below, below2, x, width);
        let out = expand(&nb);
        top[2 * x] = nb.a;
        top[2 * x + 1] = out.right;
        bottom[2 * x] = out.below;
        bottom[2 * x + 1] = out.diag;
    }
}
