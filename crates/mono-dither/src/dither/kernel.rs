//! Error diffusion kernel definitions.
//!
//! Each kernel lists the (dx, dy, weight) neighbours that receive a share
//! of a pixel's quantization error. Every target lies after the current
//! pixel in row-major order: `dy > 0`, or `dy == 0` with `dx > 0`.

/// An error diffusion kernel.
///
/// The total error propagated is `sum(weights) / divisor`. All kernels here
/// propagate 100% except [`ATKINSON`], which deliberately keeps 6/8.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    pub entries: &'static [(i32, i32, u8)],

    /// Each neighbour receives `error * weight / divisor`.
    pub divisor: u8,

    /// Deepest row reached; the error buffer keeps `max_dy + 1` rows.
    pub max_dy: usize,
}

/// Two-neighbour kernel: half right, half below.
///
/// ```text
///    X   1
///    1
/// ```
pub const SIMPLE_2D: Kernel = Kernel {
    entries: &[(1, 0, 1), (0, 1, 1)],
    divisor: 2,
    max_dy: 1,
};

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

/// Jarvis-Judice-Ninke dithering kernel.
///
/// Twelve neighbours over three rows. Smoother gradients than
/// Floyd-Steinberg at roughly three times the work per pixel.
///
/// ```text
///            X   7   5
///    3   5   7   5   3
///    1   3   5   3   1
/// ```
pub const JARVIS_JUDICE_NINKE: Kernel = Kernel {
    entries: &[
        (1, 0, 7),
        (2, 0, 5),
        (-2, 1, 3),
        (-1, 1, 5),
        (0, 1, 7),
        (1, 1, 5),
        (2, 1, 3),
        (-2, 2, 1),
        (-1, 2, 3),
        (0, 2, 5),
        (1, 2, 3),
        (2, 2, 1),
    ],
    divisor: 48,
    max_dy: 2,
};

/// Atkinson dithering kernel.
///
/// Six neighbours at 1/8 each, so only 75% of the error moves on. The lost
/// quarter pushes midtones apart, giving the high-contrast look of the
/// original Macintosh renderer.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    max_dy: 2,
};
