use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::FilterError;
use crate::utils::{pack_argb, unpack_argb, validate_non_empty_image};

/// A flat image of packed ARGB pixels
///
/// Pixels are stored row-major, one `u32` per pixel with alpha in the most
/// significant byte. The pixel count always equals `width * height`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Creates a buffer of transparent black pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_pixel(width, height, 0)
    }

    /// Creates a buffer where every pixel is `pixel`.
    pub fn from_pixel(width: u32, height: u32, pixel: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data.
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidInput` - When `pixels.len()` is not `width * height`
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, FilterError> {
        if pixels.len() != width as usize * height as usize {
            return Err(FilterError::InvalidInput {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a buffer by calling `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Converts a decoded RGBA8 image.
    pub fn from_rgba_image(image: &RgbaImage) -> Self {
        let pixels = image
            .pixels()
            .map(|&Rgba([red, green, blue, alpha])| pack_argb(alpha, red, green, blue))
            .collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    /// Converts back into an RGBA8 image.
    ///
    /// # Errors
    ///
    /// * `FilterError::ImageBufferCreationFailed` - When the image crate rejects the data
    pub fn to_rgba_image(&self) -> Result<RgbaImage, FilterError> {
        let raw = self
            .pixels
            .iter()
            .flat_map(|&pixel| {
                let (alpha, red, green, blue) = unpack_argb(pixel);
                [red, green, blue, alpha]
            })
            .collect();
        ImageBuffer::from_raw(self.width, self.height, raw)
            .ok_or(FilterError::ImageBufferCreationFailed)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns `true` if the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Returns the pixel at `(x, y)` split into `(alpha, red, green, blue)`.
    pub fn get_argb(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(unpack_argb)
    }

    /// Overwrites the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index] = pixel;
    }

    /// Checks that the buffer is non-empty and internally consistent.
    ///
    /// # Errors
    ///
    /// * `FilterError::InvalidInput` - When either dimension is zero
    pub fn validate(&self) -> Result<(), FilterError> {
        validate_non_empty_image(self.width, self.height, self.pixels.len())
    }

    pub fn into_raw(self) -> Vec<u32> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 4]).is_ok());
        assert_eq!(
            PixelBuffer::from_raw(2, 2, vec![0; 3]),
            Err(FilterError::InvalidInput {
                width: 2,
                height: 2,
                len: 3
            })
        );
        // Empty buffers are representable, filters reject them later.
        assert!(PixelBuffer::from_raw(0, 5, Vec::new()).is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(PixelBuffer::new(3, 1).validate().is_ok());
        assert!(PixelBuffer::new(0, 3).validate().is_err());
        assert!(PixelBuffer::new(3, 0).validate().is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut buffer = PixelBuffer::from_fn(3, 2, |x, y| pack_argb(255, x as u8, y as u8, 0));
        assert_eq!(buffer.get_argb(2, 1), Some((255, 2, 1, 0)));
        assert_eq!(buffer.get_pixel(3, 0), None);

        buffer.put_pixel(0, 1, 0xFF_0A_14_1E);
        assert_eq!(buffer.get_argb(0, 1), Some((255, 10, 20, 30)));
        buffer.put_pixel(9, 9, 0);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let mut image: RgbaImage = ImageBuffer::new(2, 1);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 40]));
        image.put_pixel(1, 0, Rgba([250, 128, 0, 255]));

        let buffer = PixelBuffer::from_rgba_image(&image);
        assert_eq!(buffer.dimensions(), (2, 1));
        assert_eq!(buffer.get_argb(0, 0), Some((40, 10, 20, 30)));
        assert_eq!(buffer.get_argb(1, 0), Some((255, 250, 128, 0)));

        let back = buffer.to_rgba_image().unwrap();
        assert_eq!(back, image);
    }
}
