//! Portable per-pixel kernels.
//!
//! These are the kernels of record: every other implementation is checked
//! against the pixels produced here.

use crate::error::FilterError;
use crate::neon_filters::filter::Implementation;
use crate::neon_filters::kernel::{FilterKernel, KernelOp, SEPIA_MATRIX};
use crate::neon_filters::params::{BrightnessParams, ContrastParams, GrayscaleParams};
use crate::neon_filters::pixel_buffer::PixelBuffer;
use crate::utils::{clamp_to_channel, pack_argb, unpack_argb};

/// Straightforward kernels that decompose and rebuild every pixel
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceKernel;

impl FilterKernel for ReferenceKernel {
    fn implementation(&self) -> Implementation {
        Implementation::Reference
    }

    fn apply(&self, buffer: &mut PixelBuffer, op: &KernelOp) -> Result<(), FilterError> {
        buffer.validate()?;
        let pixels = buffer.pixels_mut();
        match op {
            KernelOp::Grayscale(params) => grayscale(pixels, params),
            KernelOp::Invert => invert(pixels),
            KernelOp::Brightness(params) => brightness(pixels, params),
            KernelOp::Contrast(params) => contrast(pixels, params),
            KernelOp::Sepia => sepia(pixels),
        }
        Ok(())
    }
}

fn grayscale(pixels: &mut [u32], params: &GrayscaleParams) {
    for pixel in pixels.iter_mut() {
        let (alpha, red, green, blue) = unpack_argb(*pixel);
        let gray = clamp_to_channel(
            params.red * f32::from(red)
                + params.green * f32::from(green)
                + params.blue * f32::from(blue),
        );
        *pixel = pack_argb(alpha, gray, gray, gray);
    }
}

fn invert(pixels: &mut [u32]) {
    for pixel in pixels.iter_mut() {
        let (alpha, red, green, blue) = unpack_argb(*pixel);
        *pixel = pack_argb(alpha, 255 - red, 255 - green, 255 - blue);
    }
}

fn brightness(pixels: &mut [u32], params: &BrightnessParams) {
    let delta = params.delta;
    for pixel in pixels.iter_mut() {
        let (alpha, red, green, blue) = unpack_argb(*pixel);
        *pixel = pack_argb(
            alpha,
            clamp_to_channel(i32::from(red).saturating_add(delta)),
            clamp_to_channel(i32::from(green).saturating_add(delta)),
            clamp_to_channel(i32::from(blue).saturating_add(delta)),
        );
    }
}

fn contrast(pixels: &mut [u32], params: &ContrastParams) {
    let factor = params.factor;
    let stretch = |channel: u8| clamp_to_channel((f32::from(channel) - 128.0) * factor + 128.0);
    for pixel in pixels.iter_mut() {
        let (alpha, red, green, blue) = unpack_argb(*pixel);
        *pixel = pack_argb(alpha, stretch(red), stretch(green), stretch(blue));
    }
}

fn sepia(pixels: &mut [u32]) {
    let tone = |row: [f64; 3], red: f64, green: f64, blue: f64| {
        clamp_to_channel(red * row[0] + green * row[1] + blue * row[2])
    };
    for pixel in pixels.iter_mut() {
        let (alpha, red, green, blue) = unpack_argb(*pixel);
        let (red, green, blue) = (f64::from(red), f64::from(green), f64::from(blue));
        *pixel = pack_argb(
            alpha,
            tone(SEPIA_MATRIX[0], red, green, blue),
            tone(SEPIA_MATRIX[1], red, green, blue),
            tone(SEPIA_MATRIX[2], red, green, blue),
        );
    }
}
