//! Performance benchmarks for neon-filters
//!
//! Compares the reference and performance kernels of every filter across
//! image sizes, reporting pixel throughput.

use criterion::*;
use itertools::iproduct;
use neon_filters::{
    pack_argb, BrightnessParams, ContrastParams, FilterKernel, GrayscaleParams, Implementation,
    KernelOp, PixelBuffer,
};
use std::hint::black_box;

/// Helper function to create a gradient buffer with specific dimensions
fn create_buffer(width: u32, height: u32) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);

    // Fill with realistic pattern (gradient + varying alpha)
    iproduct!(0..height, 0..width).for_each(|(y, x)| {
        let r = ((x * 255) / width) as u8;
        let g = ((y * 255) / height) as u8;
        let b = ((x + y) * 255 / (width + height)) as u8;
        let a = if (x + y) % 3 == 0 { 128 } else { 255 };
        buffer.put_pixel(x, y, pack_argb(a, r, g, b));
    });

    buffer
}

fn kernel_ops() -> Vec<(&'static str, KernelOp)> {
    vec![
        ("grayscale", KernelOp::Grayscale(GrayscaleParams::default())),
        ("invert", KernelOp::Invert),
        ("brightness", KernelOp::Brightness(BrightnessParams::new(40))),
        ("contrast", KernelOp::Contrast(ContrastParams::new(1.5))),
        ("sepia", KernelOp::Sepia),
    ]
}

/// Benchmark every kernel for both implementations across image sizes
fn bench_kernels(c: &mut Criterion) {
    let sizes = vec![
        (100, 100),   // Small
        (500, 500),   // Medium
        (1920, 1080), // HD
    ];

    for (name, op) in kernel_ops() {
        let mut group = c.benchmark_group(name);
        group.sample_size(10);

        for &(width, height) in &sizes {
            let pixels = width * height;
            group.throughput(Throughput::Elements(pixels as u64));
            let buffer = create_buffer(width, height);

            for implementation in Implementation::ALL {
                let kernel = implementation.kernel();
                group.bench_with_input(
                    BenchmarkId::new(implementation.name(), format!("{}x{}", width, height)),
                    &buffer,
                    |b, buf| {
                        b.iter_batched_ref(
                            || buf.clone(),
                            |target| kernel.apply(black_box(target), &op).unwrap(),
                            BatchSize::LargeInput,
                        )
                    },
                );
            }
        }

        group.finish();
    }
}

criterion_group!(benches, bench_kernels);
criterion_main!(benches);
