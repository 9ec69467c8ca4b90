use thiserror::Error;

use crate::neon_filters::filter::{Filter, Implementation};

/// Error type for filter application
///
/// Every variant carries enough context for the calling layer to present
/// the failure; none of the messages are meant for end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The pixel buffer is empty or its length disagrees with its dimensions
    ///
    /// Fatal to the single call; retrying with the same buffer fails again.
    #[error("Invalid input: {width}x{height} buffer holding {len} pixels")]
    InvalidInput {
        width: u32,
        height: u32,
        /// Number of pixels actually present
        len: usize,
    },

    /// The parameter set belongs to a different filter
    ///
    /// For example, contrast parameters handed to the brightness filter.
    #[error("Parameters for {params} cannot be applied to the {filter} filter")]
    MismatchedParams {
        /// Filter that was requested
        filter: Filter,
        /// Filter the parameters were created for
        params: Filter,
    },

    /// A kernel failed while processing pixels
    #[error("{implementation} kernel failed while applying {filter}: {reason}")]
    KernelFailure {
        filter: Filter,
        implementation: Implementation,
        reason: String,
    },

    /// Failed to create ImageBuffer from processed pixels
    #[error("Failed to create ImageBuffer from processed pixels")]
    ImageBufferCreationFailed,
}

/// Error type for the benchmarking harness
///
/// The harness reports these as "no result"; see [`BenchmarkError::is_skip`]
/// for telling defined short-circuits apart from real failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BenchmarkError {
    /// The filter never transforms pixels and has nothing to time
    #[error("The {0} filter cannot be benchmarked")]
    NotBenchmarkable(Filter),

    /// The effective parameters make the filter an identity transform
    #[error("{filter} is a no-op with the given parameters; nothing to measure")]
    NoOpSkipped { filter: Filter },

    /// The harness configuration cannot produce statistics
    #[error("Invalid benchmark configuration: {0}")]
    InvalidConfig(String),

    /// The batch was cancelled before this unit started
    #[error("Benchmark batch was cancelled before this unit started")]
    Cancelled,

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl BenchmarkError {
    /// Returns `true` for outcomes that mean "nothing to measure" rather
    /// than a failure.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::NotBenchmarkable(_) | Self::NoOpSkipped { .. } | Self::Cancelled
        )
    }
}
