//! Pipeline benchmark: per-iteration command construction and per-frame
//! record decoding.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rover_common::control::axis::normalize;
use rover_common::control::command::ActuationCommand;
use rover_control::sensor::parse_record;

const READY: &str = "72 01 4b 46 7f ff 0e 10 57 : crc=57 YES\n\
                     72 01 4b 46 7f ff 0e 10 57 t=23625\n";
const NOT_READY: &str = "72 01 4b 46 7f ff 0e 10 57 : crc=57 NO\n\
                         72 01 4b 46 7f ff 0e 10 57 t=23625\n";

fn bench_normalize(c: &mut Criterion) {
    let samples: Vec<f64> = (0..256).map(|i| (i as f64 - 128.0) / 64.0).collect();

    c.bench_function("normalize_256", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for &v in &samples {
                acc += normalize(black_box(v));
            }
            acc
        })
    });

    c.bench_function("actuation_command", |b| {
        b.iter(|| ActuationCommand::new(black_box(0.5), black_box(-1.7)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_record");
    for (name, record) in [("ready", READY), ("not_ready", NOT_READY)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &record, |b, r| {
            b.iter(|| parse_record(black_box(r)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_parse);
criterion_main!(benches);
