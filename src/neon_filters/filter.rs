use std::fmt;

use crate::neon_filters::kernel::{FilterKernel, PerformanceKernel, ReferenceKernel};
use crate::neon_filters::params::FilterParams;

/// The filters a caller can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Filter {
    /// Leaves the image untouched
    Original,
    /// Weighted luminance
    Grayscale,
    /// Channel complement
    Invert,
    /// Constant channel offset
    Brightness,
    /// Scaling around mid-gray
    Contrast,
    /// Fixed warm-tone matrix
    Sepia,
}

impl Filter {
    /// Every filter, in display order.
    pub const ALL: [Self; 6] = [
        Self::Original,
        Self::Grayscale,
        Self::Invert,
        Self::Brightness,
        Self::Contrast,
        Self::Sepia,
    ];

    /// Stable name used as the `filter_name` of benchmark results.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Grayscale => "Grayscale",
            Self::Invert => "Invert",
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Sepia => "Sepia",
        }
    }

    /// Default parameter set for this filter, or `None` when it has no
    /// tunables.
    pub fn default_params(self) -> Option<FilterParams> {
        FilterParams::default_for(self)
    }

    /// Returns `true` if the filter transforms pixels and can be timed.
    pub const fn is_benchmarkable(self) -> bool {
        !matches!(self, Self::Original)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which kernel family executes a filter
///
/// Both families produce identical pixels; `Reference` is the one the other
/// is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Implementation {
    /// Portable per-pixel kernels
    Reference,
    /// Table-driven, unrolled kernels
    Performance,
}

impl Implementation {
    /// Both implementations, reference first.
    pub const ALL: [Self; 2] = [Self::Reference, Self::Performance];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reference => "Reference",
            Self::Performance => "Performance",
        }
    }

    /// The kernel family backing this implementation.
    pub fn kernel(self) -> &'static dyn FilterKernel {
        match self {
            Self::Reference => &ReferenceKernel,
            Self::Performance => &PerformanceKernel,
        }
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
