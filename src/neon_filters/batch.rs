use std::sync::atomic::{AtomicBool, Ordering};

use itertools::iproduct;
use log::{info, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::BenchmarkError;
use crate::neon_filters::benchmark::{isolate_panics, BenchmarkHarness, BenchmarkResult};
use crate::neon_filters::filter::{Filter, Implementation};
use crate::neon_filters::params::FilterParams;
use crate::neon_filters::pixel_buffer::PixelBuffer;
use crate::neon_filters::result_set::ResultSet;

/// A filter and the parameters to benchmark it with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkJob {
    pub filter: Filter,
    pub params: Option<FilterParams>,
}

impl BenchmarkJob {
    pub fn new(filter: Filter, params: Option<FilterParams>) -> Self {
        Self { filter, params }
    }

    /// One job per benchmarkable filter, each with its default parameters.
    ///
    /// Brightness and contrast defaults are neutral, so those two units are
    /// reported as skipped unless the caller substitutes parameters.
    pub fn all_defaults() -> Vec<Self> {
        Filter::ALL
            .into_iter()
            .filter(|filter| filter.is_benchmarkable())
            .map(|filter| Self::new(filter, filter.default_params()))
            .collect()
    }
}

impl From<Filter> for BenchmarkJob {
    fn from(filter: Filter) -> Self {
        Self::new(filter, None)
    }
}

/// A unit of a batch that produced no result
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFailure {
    pub filter: Filter,
    pub implementation: Implementation,
    pub error: BenchmarkError,
}

/// Outcome of a batch benchmark run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Results of every unit that completed
    pub results: ResultSet,
    /// Units that were skipped, cancelled or failed
    pub failures: Vec<UnitFailure>,
}

impl BatchReport {
    /// Failures other than skips and cancellations.
    pub fn errors(&self) -> impl Iterator<Item = &UnitFailure> {
        self.failures.iter().filter(|failure| !failure.error.is_skip())
    }
}

impl BenchmarkHarness {
    /// Benchmarks every `(job, implementation)` pair as an independent unit.
    ///
    /// Units run on the rayon pool when the `rayon` feature is enabled and
    /// sequentially otherwise. `source` is shared read-only; every unit
    /// works on its own copies. A unit that fails, or panics, is recorded in
    /// [`BatchReport::failures`] without affecting the others.
    ///
    /// Setting `cancel` stops units that have not started yet; they are
    /// reported as `BenchmarkError::Cancelled`. Units already running finish.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::atomic::AtomicBool;
    /// use neon_filters::{
    ///     BenchmarkConfig, BenchmarkHarness, BenchmarkJob, Filter, Implementation, PixelBuffer,
    /// };
    ///
    /// let harness = BenchmarkHarness::new(BenchmarkConfig::default().with_measured_iterations(5));
    /// let source = PixelBuffer::from_pixel(16, 16, 0xFF_20_40_60);
    /// let jobs = [BenchmarkJob::from(Filter::Invert), BenchmarkJob::from(Filter::Sepia)];
    ///
    /// let stop = AtomicBool::new(false);
    /// let report = harness.measure_batch(&source, &jobs, &Implementation::ALL, &stop);
    /// assert_eq!(report.results.len(), 4);
    /// assert!(report.failures.is_empty());
    /// ```
    pub fn measure_batch(
        &self,
        source: &PixelBuffer,
        jobs: &[BenchmarkJob],
        implementations: &[Implementation],
        cancel: &AtomicBool,
    ) -> BatchReport {
        let units: Vec<(BenchmarkJob, Implementation)> =
            iproduct!(jobs.iter().copied(), implementations.iter().copied()).collect();

        run_units(&units, cancel, |job, implementation| {
            self.run_protocol(source, job.filter, job.params, implementation)
        })
    }
}

/// Runs every unit through `measure` and folds the outcomes into a report.
fn run_units<M>(
    units: &[(BenchmarkJob, Implementation)],
    cancel: &AtomicBool,
    measure: M,
) -> BatchReport
where
    M: Fn(BenchmarkJob, Implementation) -> Result<BenchmarkResult, BenchmarkError> + Sync,
{
    let run = |&(job, implementation): &(BenchmarkJob, Implementation)| {
        run_unit(job, implementation, cancel, &measure)
    };

    #[cfg(feature = "rayon")]
    let outcomes: Vec<_> = units.par_iter().map(run).collect();
    #[cfg(not(feature = "rayon"))]
    let outcomes: Vec<_> = units.iter().map(run).collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(result) => {
                report.results.insert(result);
            }
            Err(failure) => {
                if !failure.error.is_skip() {
                    warn!(
                        "Dropping {} ({}) from batch: {}",
                        failure.filter, failure.implementation, failure.error
                    );
                }
                report.failures.push(failure);
            }
        }
    }

    info!(
        "Benchmark batch finished: {} results, {} units without a result",
        report.results.len(),
        report.failures.len()
    );
    report
}

fn run_unit<M>(
    job: BenchmarkJob,
    implementation: Implementation,
    cancel: &AtomicBool,
    measure: &M,
) -> Result<BenchmarkResult, UnitFailure>
where
    M: Fn(BenchmarkJob, Implementation) -> Result<BenchmarkResult, BenchmarkError>,
{
    if cancel.load(Ordering::Relaxed) {
        return Err(UnitFailure {
            filter: job.filter,
            implementation,
            error: BenchmarkError::Cancelled,
        });
    }

    isolate_panics(job.filter, implementation, || measure(job, implementation)).map_err(|error| {
        UnitFailure {
            filter: job.filter,
            implementation,
            error,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::neon_filters::benchmark::BenchmarkConfig;
    use crate::neon_filters::params::{BrightnessParams, ContrastParams};
    use crate::test_utils::create_gradient_buffer;

    fn quick_harness() -> BenchmarkHarness {
        BenchmarkHarness::new(
            BenchmarkConfig::default()
                .with_warmup_iterations(1)
                .with_measured_iterations(3),
        )
    }

    #[test]
    fn test_all_defaults_excludes_original() {
        let jobs = BenchmarkJob::all_defaults();
        assert_eq!(jobs.len(), 5);
        assert!(jobs.iter().all(|job| job.filter != Filter::Original));
    }

    #[test]
    fn test_batch_collects_results_and_skips() {
        let source = create_gradient_buffer(16, 16);
        let report = quick_harness().measure_batch(
            &source,
            &BenchmarkJob::all_defaults(),
            &Implementation::ALL,
            &AtomicBool::new(false),
        );

        // Grayscale, Invert and Sepia for both implementations.
        assert_eq!(report.results.len(), 6);
        // Neutral brightness and contrast for both implementations.
        assert_eq!(report.failures.len(), 4);
        assert_eq!(report.errors().count(), 0);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, BenchmarkError::NoOpSkipped { .. })));
    }

    #[test]
    fn test_batch_keeps_partial_results() {
        let source = create_gradient_buffer(8, 8);
        let jobs = [
            BenchmarkJob::new(Filter::Brightness, Some(BrightnessParams::new(25).into())),
            // Wrong parameter kind: this unit fails.
            BenchmarkJob::new(Filter::Sepia, Some(ContrastParams::new(1.5).into())),
            BenchmarkJob::new(Filter::Contrast, Some(ContrastParams::new(1.5).into())),
        ];
        let report = quick_harness().measure_batch(
            &source,
            &jobs,
            &[Implementation::Performance],
            &AtomicBool::new(false),
        );

        assert_eq!(report.results.len(), 2);
        assert!(report
            .results
            .get("Brightness", Implementation::Performance)
            .is_some());
        assert!(report
            .results
            .get("Contrast", Implementation::Performance)
            .is_some());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.failures[0].filter, Filter::Sepia);
    }

    #[test]
    fn test_panicking_unit_is_isolated() {
        let source = create_gradient_buffer(8, 8);
        let harness = quick_harness();
        let units: Vec<_> = iproduct!(
            [Filter::Invert, Filter::Sepia, Filter::Grayscale].map(BenchmarkJob::from),
            Implementation::ALL
        )
        .collect();

        let report = run_units(&units, &AtomicBool::new(false), |job, implementation| {
            if job.filter == Filter::Sepia && implementation == Implementation::Performance {
                panic!("sepia table corrupted");
            }
            harness.run_protocol(&source, job.filter, job.params, implementation)
        });

        assert_eq!(report.results.len(), 5);
        assert!(report.results.get("Sepia", Implementation::Reference).is_some());
        assert!(report.results.get("Sepia", Implementation::Performance).is_none());
        assert_eq!(
            report.failures,
            vec![UnitFailure {
                filter: Filter::Sepia,
                implementation: Implementation::Performance,
                error: BenchmarkError::Filter(FilterError::KernelFailure {
                    filter: Filter::Sepia,
                    implementation: Implementation::Performance,
                    reason: "sepia table corrupted".to_string(),
                }),
            }]
        );
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn test_cancelled_batch_runs_nothing() {
        let source = create_gradient_buffer(8, 8);
        let report = quick_harness().measure_batch(
            &source,
            &[BenchmarkJob::from(Filter::Invert)],
            &Implementation::ALL,
            &AtomicBool::new(true),
        );
        assert!(report.results.is_empty());
        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .all(|f| f.error == BenchmarkError::Cancelled));
    }

    #[test]
    fn test_source_is_not_mutated() {
        let source = create_gradient_buffer(8, 8);
        let snapshot = source.clone();
        quick_harness().measure_batch(
            &source,
            &BenchmarkJob::all_defaults(),
            &Implementation::ALL,
            &AtomicBool::new(false),
        );
        assert_eq!(source, snapshot);
    }
}
