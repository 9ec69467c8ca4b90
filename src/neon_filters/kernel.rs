use crate::error::FilterError;
use crate::neon_filters::filter::{Filter, Implementation};
use crate::neon_filters::params::{BrightnessParams, ContrastParams, GrayscaleParams};
use crate::neon_filters::pixel_buffer::PixelBuffer;

pub use crate::neon_filters::performance::PerformanceKernel;
pub use crate::neon_filters::reference::ReferenceKernel;

/// Sepia weights, one row per output channel, columns in `(r, g, b)` order.
pub(crate) const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// A fully resolved pixel transform, ready to hand to a kernel
///
/// Unlike [`Filter`], every variant here changes pixels: `Original` and
/// neutral parameter values never reach a kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelOp {
    Grayscale(GrayscaleParams),
    Invert,
    Brightness(BrightnessParams),
    Contrast(ContrastParams),
    Sepia,
}

impl KernelOp {
    pub const fn filter(&self) -> Filter {
        match self {
            Self::Grayscale(_) => Filter::Grayscale,
            Self::Invert => Filter::Invert,
            Self::Brightness(_) => Filter::Brightness,
            Self::Contrast(_) => Filter::Contrast,
            Self::Sepia => Filter::Sepia,
        }
    }
}

/// Trait implemented by each kernel family
///
/// A kernel transforms every pixel of `buffer` in place. Pixels are
/// independent of each other, and alpha is always preserved.
///
/// # Errors
///
/// * `FilterError::InvalidInput` - When the buffer is empty
/// * `FilterError::KernelFailure` - When the kernel cannot process the buffer
///
/// # Examples
///
/// ```
/// use neon_filters::{Implementation, KernelOp, PixelBuffer};
///
/// # fn example() -> Result<(), neon_filters::FilterError> {
/// let mut buffer = PixelBuffer::from_pixel(4, 4, 0xFF_0A_14_1E);
/// Implementation::Performance.kernel().apply(&mut buffer, &KernelOp::Invert)?;
/// assert_eq!(buffer.get_argb(0, 0), Some((255, 245, 235, 225)));
/// # Ok(())
/// # }
/// ```
pub trait FilterKernel: Sync {
    /// The implementation this kernel family stands for.
    fn implementation(&self) -> Implementation;

    /// Applies `op` to every pixel of `buffer`.
    fn apply(&self, buffer: &mut PixelBuffer, op: &KernelOp) -> Result<(), FilterError>;
}
