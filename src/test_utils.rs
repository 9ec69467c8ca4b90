//! Test utilities for neon-filters
//!
//! This module provides common fixtures for testing the kernels, the
//! processor and the benchmarking harness. It is only compiled when running
//! tests.

#[cfg(test)]
use crate::neon_filters::pixel_buffer::PixelBuffer;
#[cfg(test)]
use crate::utils::pack_argb;

/// Creates a 2x2 test buffer with predefined ARGB values.
///
/// - (0,0): [255, 200, 150, 100] (opaque)
/// - (1,0): [128, 100, 200, 150] (semi-transparent)
/// - (0,1): [64, 150, 100, 200]  (more transparent)
/// - (1,1): [0, 50, 75, 25]      (fully transparent)
#[cfg(test)]
pub fn create_test_buffer() -> PixelBuffer {
    let mut buffer = PixelBuffer::new(2, 2);
    buffer.put_pixel(0, 0, pack_argb(255, 200, 150, 100));
    buffer.put_pixel(1, 0, pack_argb(128, 100, 200, 150));
    buffer.put_pixel(0, 1, pack_argb(64, 150, 100, 200));
    buffer.put_pixel(1, 1, pack_argb(0, 50, 75, 25));
    buffer
}

/// Creates an opaque gradient buffer of the given size.
///
/// Red follows x, green follows y and blue follows the diagonal, so every
/// channel spans most of its range on buffers larger than a few pixels.
#[cfg(test)]
pub fn create_gradient_buffer(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let red = ((x * 255) / width.max(1)) as u8;
        let green = ((y * 255) / height.max(1)) as u8;
        let blue = ((x + y) * 255 / (width + height).max(1)) as u8;
        pack_argb(255, red, green, blue)
    })
}
