//! Table-driven kernels.
//!
//! Each kernel precomputes per-channel lookup tables using exactly the
//! arithmetic of the reference kernels (same products, same summation order),
//! then walks the buffer four pixels at a time. The output is bit-identical
//! to [`ReferenceKernel`](crate::ReferenceKernel).

use crate::error::FilterError;
use crate::neon_filters::filter::Implementation;
use crate::neon_filters::kernel::{FilterKernel, KernelOp, SEPIA_MATRIX};
use crate::neon_filters::params::{BrightnessParams, ContrastParams, GrayscaleParams};
use crate::neon_filters::pixel_buffer::PixelBuffer;
use crate::utils::clamp_to_channel;

const ALPHA_MASK: u32 = 0xFF00_0000;
const COLOR_MASK: u32 = 0x00FF_FFFF;

/// Lookup-table kernels with a four-pixel unrolled inner loop
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceKernel;

impl FilterKernel for PerformanceKernel {
    fn implementation(&self) -> Implementation {
        Implementation::Performance
    }

    fn apply(&self, buffer: &mut PixelBuffer, op: &KernelOp) -> Result<(), FilterError> {
        buffer.validate()?;
        let pixels = buffer.pixels_mut();
        match op {
            KernelOp::Grayscale(params) => grayscale(pixels, params),
            KernelOp::Invert => map_unrolled(pixels, |pixel| pixel ^ COLOR_MASK),
            KernelOp::Brightness(params) => brightness(pixels, params),
            KernelOp::Contrast(params) => contrast(pixels, params),
            KernelOp::Sepia => sepia(pixels),
        }
        Ok(())
    }
}

#[inline(always)]
fn map_unrolled(pixels: &mut [u32], f: impl Fn(u32) -> u32) {
    let mut chunks = pixels.chunks_exact_mut(4);
    for chunk in &mut chunks {
        chunk[0] = f(chunk[0]);
        chunk[1] = f(chunk[1]);
        chunk[2] = f(chunk[2]);
        chunk[3] = f(chunk[3]);
    }
    for pixel in chunks.into_remainder() {
        *pixel = f(*pixel);
    }
}

#[inline(always)]
fn channel(pixel: u32, shift: u32) -> usize {
    ((pixel >> shift) & 0xFF) as usize
}

/// Same mapping applied to the red, green and blue channels.
fn map_channels(pixels: &mut [u32], table: &[u8; 256]) {
    map_unrolled(pixels, |pixel| {
        (pixel & ALPHA_MASK)
            | (u32::from(table[channel(pixel, 16)]) << 16)
            | (u32::from(table[channel(pixel, 8)]) << 8)
            | u32::from(table[channel(pixel, 0)])
    });
}

fn grayscale(pixels: &mut [u32], params: &GrayscaleParams) {
    let red: [f32; 256] = std::array::from_fn(|v| params.red * f32::from(v as u8));
    let green: [f32; 256] = std::array::from_fn(|v| params.green * f32::from(v as u8));
    let blue: [f32; 256] = std::array::from_fn(|v| params.blue * f32::from(v as u8));
    map_unrolled(pixels, |pixel| {
        let gray = clamp_to_channel(
            red[channel(pixel, 16)] + green[channel(pixel, 8)] + blue[channel(pixel, 0)],
        );
        (pixel & ALPHA_MASK) | (u32::from(gray) * 0x0001_0101)
    });
}

fn brightness(pixels: &mut [u32], params: &BrightnessParams) {
    let table: [u8; 256] =
        std::array::from_fn(|v| clamp_to_channel((v as i32).saturating_add(params.delta)));
    map_channels(pixels, &table);
}

fn contrast(pixels: &mut [u32], params: &ContrastParams) {
    let table: [u8; 256] = std::array::from_fn(|v| {
        clamp_to_channel((f32::from(v as u8) - 128.0) * params.factor + 128.0)
    });
    map_channels(pixels, &table);
}

fn sepia(pixels: &mut [u32]) {
    // Products of each source channel with its column of the matrix.
    let column = |index: usize| -> [[f64; 3]; 256] {
        std::array::from_fn(|v| {
            let value = f64::from(v as u8);
            [
                value * SEPIA_MATRIX[0][index],
                value * SEPIA_MATRIX[1][index],
                value * SEPIA_MATRIX[2][index],
            ]
        })
    };
    let (red, green, blue) = (column(0), column(1), column(2));
    map_unrolled(pixels, |pixel| {
        let r = &red[channel(pixel, 16)];
        let g = &green[channel(pixel, 8)];
        let b = &blue[channel(pixel, 0)];
        (pixel & ALPHA_MASK)
            | (u32::from(clamp_to_channel(r[0] + g[0] + b[0])) << 16)
            | (u32::from(clamp_to_channel(r[1] + g[1] + b[1])) << 8)
            | u32::from(clamp_to_channel(r[2] + g[2] + b[2]))
    });
}
