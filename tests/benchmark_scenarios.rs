//! Benchmark harness scenarios
//!
//! Runs the harness with its default protocol (10 warmup runs, 50 timed runs)
//! on realistic buffers and checks the reported statistics, plus batch runs
//! mixing successful, skipped and failing units.

use std::sync::atomic::AtomicBool;

use neon_filters::{
    measure_filter, pack_argb, BenchmarkConfig, BenchmarkHarness, BenchmarkJob, BrightnessParams,
    ContrastParams, Filter, FilterParams, GrayscaleParams, Implementation, PixelBuffer, ResultSet,
};

fn create_gradient_buffer(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let r = ((x * 255) / width) as u8;
        let g = ((y * 255) / height) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        pack_argb(255, r, g, b)
    })
}

#[test]
fn test_default_protocol_statistics() {
    let source = create_gradient_buffer(64, 64);
    let cases: [(Filter, Option<FilterParams>); 5] = [
        (Filter::Grayscale, None),
        (Filter::Invert, None),
        (Filter::Brightness, Some(BrightnessParams::new(40).into())),
        (Filter::Contrast, Some(ContrastParams::new(1.5).into())),
        (Filter::Sepia, None),
    ];

    for (filter, params) in cases {
        for implementation in Implementation::ALL {
            let result = measure_filter(&source, filter, params, implementation)
                .unwrap_or_else(|| panic!("{filter} ({implementation}) produced no result"));
            assert_eq!(result.filter_name, filter.name());
            assert_eq!(result.implementation, implementation);
            assert!(result.average_time_ms > 0.0);
            assert!(result.std_dev_ms >= 0.0);
            assert!(result.pixels_per_second > 0.0);

            // pixels_per_second is derived from the mean.
            let expected_pps = (64.0 * 64.0) / (result.average_time_ms / 1000.0);
            let relative = (result.pixels_per_second - expected_pps).abs() / expected_pps;
            assert!(relative < 1e-9, "{relative}");
        }
    }
}

#[test]
fn test_no_op_and_original_produce_no_result() {
    let source = create_gradient_buffer(16, 16);
    for implementation in Implementation::ALL {
        assert!(measure_filter(&source, Filter::Original, None, implementation).is_none());
        assert!(measure_filter(&source, Filter::Brightness, None, implementation).is_none());
        assert!(measure_filter(
            &source,
            Filter::Brightness,
            Some(BrightnessParams::new(0).into()),
            implementation
        )
        .is_none());
        assert!(measure_filter(
            &source,
            Filter::Contrast,
            Some(ContrastParams::new(1.0).into()),
            implementation
        )
        .is_none());
    }
}

#[test]
fn test_batch_over_every_filter_and_implementation() {
    let source = create_gradient_buffer(32, 24);
    let snapshot = source.clone();
    let harness = BenchmarkHarness::new(
        BenchmarkConfig::default()
            .with_warmup_iterations(2)
            .with_measured_iterations(10),
    );
    let jobs = [
        BenchmarkJob::new(Filter::Original, None),
        BenchmarkJob::new(Filter::Grayscale, Some(GrayscaleParams::new(0.2, 0.7, 0.1).into())),
        BenchmarkJob::from(Filter::Invert),
        BenchmarkJob::new(Filter::Brightness, Some(BrightnessParams::new(-30).into())),
        BenchmarkJob::new(Filter::Contrast, Some(ContrastParams::new(1.0).into())),
        BenchmarkJob::from(Filter::Sepia),
    ];

    let stop = AtomicBool::new(false);
    let report = harness.measure_batch(&source, &jobs, &Implementation::ALL, &stop);

    assert_eq!(source, snapshot);
    assert_eq!(report.results.len(), 8);
    // Original and neutral contrast, once per implementation.
    assert_eq!(report.failures.len(), 4);
    assert_eq!(report.errors().count(), 0);
    for name in ["Grayscale", "Invert", "Brightness", "Sepia"] {
        assert!(report.results.speedup(name).is_some(), "{name}");
    }
}

#[test]
fn test_later_results_replace_earlier_ones() {
    let source = create_gradient_buffer(16, 16);
    let harness = BenchmarkHarness::new(BenchmarkConfig::default().with_measured_iterations(5));
    let jobs = [BenchmarkJob::from(Filter::Invert)];
    let stop = AtomicBool::new(false);

    let mut results = ResultSet::new();
    results.extend(harness.measure_batch(&source, &jobs, &Implementation::ALL, &stop).results);
    results.extend(harness.measure_batch(&source, &jobs, &Implementation::ALL, &stop).results);

    assert_eq!(results.len(), 2);
    assert!(results.get("Invert", Implementation::Reference).is_some());
    assert!(results.get("Invert", Implementation::Performance).is_some());
}
