use std::any::Any;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use log::{debug, warn};

use crate::error::{BenchmarkError, FilterError};
use crate::neon_filters::filter::{Filter, Implementation};
use crate::neon_filters::kernel::KernelOp;
use crate::neon_filters::params::FilterParams;
use crate::neon_filters::pixel_buffer::PixelBuffer;
use crate::neon_filters::processor::{apply_filter, FilterPlan};

/// Iteration counts for a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Untimed runs before measuring
    pub warmup_iterations: usize,
    /// Timed runs feeding the statistics
    pub measured_iterations: usize,
}

impl BenchmarkConfig {
    pub const DEFAULT_WARMUP_ITERATIONS: usize = 10;
    pub const DEFAULT_MEASURED_ITERATIONS: usize = 50;

    pub const fn with_warmup_iterations(self, warmup_iterations: usize) -> Self {
        Self {
            warmup_iterations,
            ..self
        }
    }

    pub const fn with_measured_iterations(self, measured_iterations: usize) -> Self {
        Self {
            measured_iterations,
            ..self
        }
    }

    /// # Errors
    ///
    /// * `BenchmarkError::InvalidConfig` - When no timed runs are requested
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.measured_iterations == 0 {
            return Err(BenchmarkError::InvalidConfig(
                "measured_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: Self::DEFAULT_WARMUP_ITERATIONS,
            measured_iterations: Self::DEFAULT_MEASURED_ITERATIONS,
        }
    }
}

/// Mean and population standard deviation of a set of durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingStats {
    pub mean_ns: f64,
    pub std_dev_ns: f64,
}

impl TimingStats {
    /// Computes statistics over `samples_ns`, or `None` when empty.
    pub fn from_samples(samples_ns: &[u64]) -> Option<Self> {
        if samples_ns.is_empty() {
            return None;
        }
        let count = samples_ns.len() as f64;
        let mean_ns = samples_ns.iter().map(|&d| d as f64).sum::<f64>() / count;
        let variance = samples_ns
            .iter()
            .map(|&d| (d as f64 - mean_ns).powi(2))
            .sum::<f64>()
            / count;
        Some(Self {
            mean_ns,
            std_dev_ns: variance.sqrt(),
        })
    }

    /// Pixels processed per second at the mean duration, `0.0` for a zero mean.
    pub fn pixels_per_second(&self, pixel_count: usize) -> f64 {
        if self.mean_ns > 0.0 {
            pixel_count as f64 / (self.mean_ns / 1_000_000_000.0)
        } else {
            0.0
        }
    }
}

/// Summary of one completed benchmark run
///
/// Results are identified by `(filter_name, implementation)`; see
/// [`ResultSet`](crate::ResultSet).
///
/// Timings are not symmetric between implementations: `Reference` runs are
/// timed through the whole [`apply_filter`] path, including its defensive
/// copy, while `Performance` runs time the kernel call alone. Comparisons
/// between the two include that allocation overhead.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub filter_name: String,
    pub implementation: Implementation,
    pub average_time_ms: f64,
    pub std_dev_ms: f64,
    pub pixels_per_second: f64,
}

impl BenchmarkResult {
    /// Label such as `"Sepia (Performance)"`.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.filter_name, self.implementation)
    }

    pub fn key(&self) -> (&str, Implementation) {
        (&self.filter_name, self.implementation)
    }
}

/// Drives warmup and timed runs of a filter and summarises them
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchmarkHarness {
    config: BenchmarkConfig,
}

impl BenchmarkHarness {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Benchmarks one filter with one implementation.
    ///
    /// # Errors
    ///
    /// * `BenchmarkError::NotBenchmarkable` - For `Filter::Original`
    /// * `BenchmarkError::NoOpSkipped` - When the parameters are neutral
    /// * `BenchmarkError::InvalidConfig` - When no timed runs are configured
    /// * `BenchmarkError::Filter` - When the source is empty, the parameters
    ///   belong to another filter, or a kernel fails. A kernel that panics is
    ///   reported as `FilterError::KernelFailure`.
    pub fn try_measure(
        &self,
        source: &PixelBuffer,
        filter: Filter,
        params: Option<FilterParams>,
        implementation: Implementation,
    ) -> Result<BenchmarkResult, BenchmarkError> {
        isolate_panics(filter, implementation, || {
            self.run_protocol(source, filter, params, implementation)
        })
    }

    /// Warmup and timed runs, without panic isolation.
    pub(crate) fn run_protocol(
        &self,
        source: &PixelBuffer,
        filter: Filter,
        params: Option<FilterParams>,
        implementation: Implementation,
    ) -> Result<BenchmarkResult, BenchmarkError> {
        self.config.validate()?;
        if !filter.is_benchmarkable() {
            return Err(BenchmarkError::NotBenchmarkable(filter));
        }
        source.validate()?;

        let op = match FilterPlan::resolve(filter, params)? {
            FilterPlan::Run(op) => op,
            FilterPlan::NoOp(filter) => return Err(BenchmarkError::NoOpSkipped { filter }),
            FilterPlan::Identity => return Err(BenchmarkError::NotBenchmarkable(filter)),
        };

        for _ in 0..self.config.warmup_iterations {
            let warmup = source.clone();
            black_box(apply_filter(&warmup, filter, params, implementation)?);
        }

        let samples_ns = (0..self.config.measured_iterations)
            .map(|_| time_once(source, &op, params, implementation))
            .collect::<Result<Vec<_>, _>>()?;

        let stats = TimingStats::from_samples(&samples_ns).ok_or_else(|| {
            BenchmarkError::InvalidConfig("no timed runs were recorded".to_string())
        })?;
        let result = BenchmarkResult {
            filter_name: filter.name().to_string(),
            implementation,
            average_time_ms: stats.mean_ns / 1_000_000.0,
            std_dev_ms: stats.std_dev_ns / 1_000_000.0,
            pixels_per_second: stats.pixels_per_second(source.len()),
        };

        debug!(
            "{}: average {:.2} ms (std dev {:.2} ms), {:.2} pixels/s over {} runs",
            result.display_name(),
            result.average_time_ms,
            result.std_dev_ms,
            result.pixels_per_second,
            samples_ns.len()
        );
        Ok(result)
    }

    /// Benchmarks one filter, returning `None` when there is nothing to
    /// report.
    ///
    /// Failures are logged, never propagated.
    pub fn measure(
        &self,
        source: &PixelBuffer,
        filter: Filter,
        params: Option<FilterParams>,
        implementation: Implementation,
    ) -> Option<BenchmarkResult> {
        match self.try_measure(source, filter, params, implementation) {
            Ok(result) => Some(result),
            Err(error) if error.is_skip() => {
                debug!("Skipping {filter} ({implementation}): {error}");
                None
            }
            Err(error) => {
                warn!("Benchmark of {filter} ({implementation}) failed: {error}");
                None
            }
        }
    }
}

/// Runs `measure`, turning a panic into `FilterError::KernelFailure`.
pub(crate) fn isolate_panics<T>(
    filter: Filter,
    implementation: Implementation,
    measure: impl FnOnce() -> Result<T, BenchmarkError>,
) -> Result<T, BenchmarkError> {
    panic::catch_unwind(AssertUnwindSafe(measure)).unwrap_or_else(|payload| {
        Err(BenchmarkError::Filter(FilterError::KernelFailure {
            filter,
            implementation,
            reason: panic_reason(payload.as_ref()),
        }))
    })
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|reason| reason.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "kernel panicked".to_string())
}

/// Times a single run on a fresh copy of `source`.
fn time_once(
    source: &PixelBuffer,
    op: &KernelOp,
    params: Option<FilterParams>,
    implementation: Implementation,
) -> Result<u64, FilterError> {
    let mut buffer = source.clone();
    let elapsed = match implementation {
        Implementation::Performance => {
            let kernel = implementation.kernel();
            let start = Instant::now();
            kernel.apply(&mut buffer, op)?;
            let elapsed = start.elapsed();
            black_box(&buffer);
            elapsed
        }
        Implementation::Reference => {
            let start = Instant::now();
            let processed = apply_filter(&buffer, op.filter(), params, implementation)?;
            let elapsed = start.elapsed();
            black_box(processed);
            elapsed
        }
    };
    Ok(u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX))
}

/// Benchmarks `filter` with the default configuration.
///
/// Returns `None` for `Original`, empty buffers, neutral parameters and
/// kernel failures, including kernels that panic.
///
/// # Examples
///
/// ```
/// use neon_filters::{measure_filter, Filter, Implementation, PixelBuffer};
///
/// let source = PixelBuffer::from_pixel(64, 64, 0xFF_40_80_C0);
/// let result = measure_filter(&source, Filter::Sepia, None, Implementation::Performance).unwrap();
/// assert_eq!(result.filter_name, "Sepia");
/// assert!(result.std_dev_ms >= 0.0);
///
/// assert!(measure_filter(&source, Filter::Original, None, Implementation::Reference).is_none());
/// ```
pub fn measure_filter(
    source: &PixelBuffer,
    filter: Filter,
    params: Option<FilterParams>,
    implementation: Implementation,
) -> Option<BenchmarkResult> {
    BenchmarkHarness::default().measure(source, filter, params, implementation)
}
