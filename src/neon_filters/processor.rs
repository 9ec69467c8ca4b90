use crate::error::FilterError;
use crate::neon_filters::filter::{Filter, Implementation};
use crate::neon_filters::kernel::KernelOp;
use crate::neon_filters::params::{FilterParams, GrayscaleParams};
use crate::neon_filters::pixel_buffer::PixelBuffer;

/// What applying a filter with given parameters amounts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterPlan {
    /// `Original`: the copy is returned as is
    Identity,
    /// Neutral parameters: the kernel is not invoked
    NoOp(Filter),
    /// A kernel must run
    Run(KernelOp),
}

impl FilterPlan {
    /// Resolves `filter` and optional `params` into a plan.
    ///
    /// Missing parameters are replaced by the filter's defaults. The default
    /// brightness and contrast values are neutral, so those filters resolve to
    /// [`FilterPlan::NoOp`] without parameters.
    ///
    /// # Errors
    ///
    /// * `FilterError::MismatchedParams` - When `params` belongs to another filter
    pub fn resolve(filter: Filter, params: Option<FilterParams>) -> Result<Self, FilterError> {
        if let Some(params) = params {
            if params.filter() != filter {
                return Err(FilterError::MismatchedParams {
                    filter,
                    params: params.filter(),
                });
            }
        }

        let plan = match filter {
            Filter::Original => Self::Identity,
            Filter::Invert => Self::Run(KernelOp::Invert),
            Filter::Sepia => Self::Run(KernelOp::Sepia),
            Filter::Grayscale => match params {
                Some(FilterParams::Grayscale(params)) => Self::Run(KernelOp::Grayscale(params)),
                _ => Self::Run(KernelOp::Grayscale(GrayscaleParams::default())),
            },
            Filter::Brightness => match params {
                Some(FilterParams::Brightness(params)) if !params.is_no_op() => {
                    Self::Run(KernelOp::Brightness(params))
                }
                _ => Self::NoOp(filter),
            },
            Filter::Contrast => match params {
                Some(FilterParams::Contrast(params)) if !params.is_no_op() => {
                    Self::Run(KernelOp::Contrast(params))
                }
                _ => Self::NoOp(filter),
            },
        };
        Ok(plan)
    }

    /// The kernel operation to run, if any.
    pub fn kernel_op(&self) -> Option<&KernelOp> {
        match self {
            Self::Run(op) => Some(op),
            Self::Identity | Self::NoOp(_) => None,
        }
    }
}

/// Applies `filter` to a private copy of `source` and returns the copy.
///
/// `source` is never modified. `Original` and neutral parameter values
/// (brightness `0`, contrast `1.0`) return an unmodified copy without
/// invoking a kernel.
///
/// # Arguments
///
/// * `source` - The image to filter; must be non-empty
/// * `filter` - The filter to apply
/// * `params` - Parameters for the filter, or `None` for its defaults
/// * `implementation` - Which kernel family runs the filter
///
/// # Errors
///
/// * `FilterError::InvalidInput` - When `source` has a zero dimension
/// * `FilterError::MismatchedParams` - When `params` belongs to another filter
/// * `FilterError::KernelFailure` - When the kernel fails
///
/// # Examples
///
/// ```
/// use neon_filters::{apply_filter, Filter, Implementation, PixelBuffer};
///
/// # fn example() -> Result<(), neon_filters::FilterError> {
/// let source = PixelBuffer::from_pixel(2, 2, 0xFF_FF_00_00);
/// let gray = apply_filter(&source, Filter::Grayscale, None, Implementation::Reference)?;
/// assert_eq!(gray.get_argb(1, 1), Some((255, 76, 76, 76)));
/// assert_eq!(source.get_argb(1, 1), Some((255, 255, 0, 0)));
/// # Ok(())
/// # }
/// ```
pub fn apply_filter(
    source: &PixelBuffer,
    filter: Filter,
    params: Option<FilterParams>,
    implementation: Implementation,
) -> Result<PixelBuffer, FilterError> {
    source.validate()?;
    let plan = FilterPlan::resolve(filter, params)?;

    let mut processed = source.clone();
    if let Some(op) = plan.kernel_op() {
        implementation.kernel().apply(&mut processed, op)?;
    }
    Ok(processed)
}

/// Trait providing filter application on pixel buffers
pub trait ApplyFilter {
    /// Applies `filter` and returns a new buffer, leaving `self` untouched.
    ///
    /// See [`apply_filter`] for the full contract.
    fn apply_filter(
        &self,
        filter: Filter,
        params: Option<FilterParams>,
        implementation: Implementation,
    ) -> Result<PixelBuffer, FilterError>;
}

impl ApplyFilter for PixelBuffer {
    fn apply_filter(
        &self,
        filter: Filter,
        params: Option<FilterParams>,
        implementation: Implementation,
    ) -> Result<PixelBuffer, FilterError> {
        apply_filter(self, filter, params, implementation)
    }
}
