//! Hilbert curve traversal of an image.
//!
//! The curve is laid over the smallest power-of-two square that covers the
//! image; points outside the image are skipped, so every pixel is visited
//! exactly once and in curve order.

/// Map a distance along the curve to `(x, y)` on an `n × n` grid.
///
/// `n` must be a power of two.
fn d2xy(n: usize, d: usize) -> (usize, usize) {
    let (mut x, mut y) = (0usize, 0usize);
    let mut t = d;
    let mut s = 1usize;
    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        if ry == 0 {
            if rx == 1 {
                x = s - 1 - x;
                y = s - 1 - y;
            }
            std::mem::swap(&mut x, &mut y);
        }
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }
    (x, y)
}

/// Lazy iterator over the pixels of a `width × height` image in Hilbert
/// order.
///
/// Cloning yields an independent iterator positioned at the same point,
/// so a path can be restarted by cloning it before use.
///
/// ```
/// use mono_dither::HilbertPath;
///
/// let path: Vec<_> = HilbertPath::new(2, 2).collect();
/// assert_eq!(path, vec![(0, 0), (0, 1), (1, 1), (1, 0)]);
/// ```
#[derive(Debug, Clone)]
pub struct HilbertPath {
    width: usize,
    height: usize,
    side: usize,
    next: usize,
    end: usize,
}

impl HilbertPath {
    /// Path over a `width × height` grid. Empty if either side is zero.
    pub fn new(width: usize, height: usize) -> Self {
        let side = width.max(height).max(1).next_power_of_two();
        let end = if width == 0 || height == 0 {
            0
        } else {
            side.saturating_mul(side)
        };
        Self {
            width,
            height,
            side,
            next: 0,
            end,
        }
    }

    /// Side of the covering square.
    pub fn side(&self) -> usize {
        self.side
    }
}

impl Iterator for HilbertPath {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.end {
            let (x, y) = d2xy(self.side, self.next);
            self.next += 1;
            if x < self.width && y < self.height {
                return Some((x, y));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.end - self.next))
    }
}

impl std::iter::FusedIterator for HilbertPath {}
