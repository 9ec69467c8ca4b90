mod error;
mod neon_filters;
mod test_utils;
mod utils;

pub use error::{BenchmarkError, FilterError};
pub use neon_filters::batch::{BatchReport, BenchmarkJob, UnitFailure};
pub use neon_filters::benchmark::{
    measure_filter, BenchmarkConfig, BenchmarkHarness, BenchmarkResult, TimingStats,
};
pub use neon_filters::filter::{Filter, Implementation};
pub use neon_filters::kernel::{FilterKernel, KernelOp, PerformanceKernel, ReferenceKernel};
pub use neon_filters::params::{
    default_params, BrightnessParams, ContrastParams, FilterParams, GrayscaleParams,
};
pub use neon_filters::pixel_buffer::PixelBuffer;
pub use neon_filters::processor::{apply_filter, ApplyFilter, FilterPlan};
pub use neon_filters::result_set::ResultSet;
pub use utils::{pack_argb, unpack_argb};
