//! Internal utility functions for neon-filters.
//!
//! This module contains the channel packing and clamping helpers shared by
//! both kernel implementations.

use imageproc::definitions::Clamp;

use crate::error::FilterError;

const ALPHA_SHIFT: u32 = 24;
const RED_SHIFT: u32 = 16;
const GREEN_SHIFT: u32 = 8;

/// Splits a packed ARGB pixel into its `(alpha, red, green, blue)` channels.
#[inline]
pub fn unpack_argb(pixel: u32) -> (u8, u8, u8, u8) {
    (
        (pixel >> ALPHA_SHIFT) as u8,
        (pixel >> RED_SHIFT) as u8,
        (pixel >> GREEN_SHIFT) as u8,
        pixel as u8,
    )
}

/// Packs `(alpha, red, green, blue)` channels into a single ARGB pixel.
#[inline]
pub fn pack_argb(alpha: u8, red: u8, green: u8, blue: u8) -> u32 {
    (u32::from(alpha) << ALPHA_SHIFT)
        | (u32::from(red) << RED_SHIFT)
        | (u32::from(green) << GREEN_SHIFT)
        | u32::from(blue)
}

/// Clamps a value to `[0, 255]` and truncates it to a channel.
///
/// Floating-point inputs are truncated toward zero once inside the range,
/// so `254.9` becomes `254`.
///
/// # Arguments
///
/// * `value` - The computed channel value
///
/// # Returns
///
/// The clamped channel
#[inline]
pub fn clamp_to_channel<T>(value: T) -> u8
where
    u8: Clamp<T>,
{
    <u8 as Clamp<T>>::clamp(value)
}

/// Validates that a pixel buffer has non-zero dimensions and a consistent
/// pixel count.
///
/// # Arguments
///
/// * `width` - The width of the buffer
/// * `height` - The height of the buffer
/// * `len` - The number of pixels stored
///
/// # Returns
///
/// `Ok(())` if the buffer can be filtered, otherwise `FilterError::InvalidInput`
pub fn validate_non_empty_image(width: u32, height: u32, len: usize) -> Result<(), FilterError> {
    let expected = width as usize * height as usize;
    if width == 0 || height == 0 || len != expected {
        Err(FilterError::InvalidInput { width, height, len })
    } else {
        Ok(())
    }
}
