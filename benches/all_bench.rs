use criterion::{black_box, Criterion};
use std::time::Instant;

use resqit::rendering::{paint_commands, rasterize, Palette};
use resqit::{format_payload, validate, PayloadFormat, RasterMatrix, RawFields};

// Consolidated benchmark suite for resqit. Run with:
//    cargo bench

fn sample_fields() -> RawFields {
    RawFields {
        full_name: "John Doe".into(),
        emergency_contact_name: "Jane Doe".into(),
        emergency_contact_phone: "(555) 123-4567".into(),
        blood_type: "O+".into(),
        allergies: Some("Penicillin allergy, Type 2 diabetes".into()),
    }
}

/// Checkerboard so roughly half the modules are painted
fn checkerboard(side: usize) -> RasterMatrix {
    let cells = (0..side * side).map(|i| (i / side + i % side) % 2 == 0).collect();
    RasterMatrix::from_cells(side, cells).expect("square")
}

/// Bench: validate + format
fn bench_format_payload(c: &mut Criterion) {
    let raw = sample_fields();
    c.bench_function("validate_and_format", |b| {
        b.iter(|| {
            let rec = validate(black_box(&raw)).unwrap();
            format_payload(&rec, PayloadFormat::Readable)
        })
    });
}

/// Bench: paint command generation vs full rasterization for common sizes
fn bench_rasterize(c: &mut Criterion) {
    for side in [21usize, 57, 177] {
        let m = checkerboard(side);
        c.bench_function(&format!("paint_commands_{}", side), |b| {
            b.iter(|| paint_commands(black_box(&m), 300, &Palette::default()).unwrap())
        });
        c.bench_function(&format!("rasterize_{}", side), |b| {
            b.iter(|| rasterize(black_box(&m), 300).unwrap())
        });
    }
}

/// Bench: full text -> matrix -> PNG pipeline, printed as percentiles
fn bench_pipeline_percentiles(_c: &mut Criterion) {
    if !cfg!(feature = "qr") {
        return;
    }
    let encoder = resqit::new_encoder();
    let rec = validate(&sample_fields()).unwrap();
    let payload = format_payload(&rec, PayloadFormat::Readable);

    let iterations: usize = std::env::var("BENCH_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(50);

    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let t0 = Instant::now();
        let m = encoder
            .encode(&payload, resqit::ErrorCorrection::High)
            .expect("encode failed");
        rasterize(&m, 300).expect("rasterize failed");
        samples.push(t0.elapsed().as_micros() as u64);
    }

    samples.sort_unstable();
    println!(
        "[pipeline_percentiles] p50={}us p95={}us p99={}us",
        percentile(&samples, 50.0),
        percentile(&samples, 95.0),
        percentile(&samples, 99.0)
    );
}

fn percentile(samples: &[u64], pct: f64) -> u64 {
    if samples.is_empty() {
        return 0;
    }
    let n = samples.len();
    let rank = ((pct / 100.0) * (n as f64)).ceil() as usize;
    let idx = if rank == 0 {
        0
    } else {
        rank.saturating_sub(1).min(n - 1)
    };
    samples[idx]
}

// Run benches manually so we can print percentile output to the console
fn main() {
    let mut c = Criterion::default();

    bench_format_payload(&mut c);
    bench_rasterize(&mut c);

    c.final_summary();

    bench_pipeline_percentiles(&mut c);
}
