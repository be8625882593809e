//! Fixed 3x3 weight grids, row-major (`[row][column]`).

/// Binomial approximation of a Gaussian, normalized to 1.
pub const GAUSSIAN_3X3: [[f32; 3]; 3] = [
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
    [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
];

/// `2 * identity - GAUSSIAN_3X3`. Sums to 1, so flat regions are unchanged.
pub const SHARPEN_3X3: [[f32; 3]; 3] = [
    [-1.0 / 16.0, -2.0 / 16.0, -1.0 / 16.0],
    [-2.0 / 16.0, 28.0 / 16.0, -2.0 / 16.0],
    [-1.0 / 16.0, -2.0 / 16.0, -1.0 / 16.0],
];

/// Horizontal Sobel gradient.
pub const SOBEL_X: [[f32; 3]; 3] = [
    [-1.0, 0.0, 1.0],
    [-2.0, 0.0, 2.0],
    [-1.0, 0.0, 1.0],
];

/// Vertical Sobel gradient.
pub const SOBEL_Y: [[f32; 3]; 3] = [
    [-1.0, -2.0, -1.0],
    [0.0, 0.0, 0.0],
    [1.0, 2.0, 1.0],
];
