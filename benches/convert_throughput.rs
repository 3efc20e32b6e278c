//! Benchmark suite for record conversion throughput
//!
//! Measures how fast decoded records convert into Airbyte values for flat
//! and nested schemas at different batch sizes.
//!
//! # Configuration
//!
//! - `BENCH_SAMPLE_SIZE`: Number of samples to collect (default: 100)
//! - `BENCH_MEASUREMENT_TIME`: Measurement time in seconds (default: 5)
//!
//! ```bash
//! BENCH_SAMPLE_SIZE=50 BENCH_MEASUREMENT_TIME=3 cargo bench
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::time::Duration;

use avro_airbyte::{
    parse_json_schema, AirbyteType, AvroValue, ConverterConfig, RecordConverter,
};

/// Configure Criterion based on environment variables
fn configure_criterion() -> Criterion {
    let mut criterion = Criterion::default();

    if let Ok(sample_size) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(size) = sample_size.parse::<usize>() {
            criterion = criterion.sample_size(size);
        } else {
            eprintln!("Warning: Invalid BENCH_SAMPLE_SIZE value: {}", sample_size);
        }
    }

    if let Ok(measurement_time) = std::env::var("BENCH_MEASUREMENT_TIME") {
        if let Ok(secs) = measurement_time.parse::<u64>() {
            criterion = criterion.measurement_time(Duration::from_secs(secs));
        } else {
            eprintln!(
                "Warning: Invalid BENCH_MEASUREMENT_TIME value: {}",
                measurement_time
            );
        }
    }

    criterion
}

fn flat_schema() -> AirbyteType {
    parse_json_schema(
        r#"{
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"},
                "score": {"type": "number"},
                "active": {"type": "boolean"},
                "created_at": {"type": "string", "format": "date-time"},
                "birthday": {"type": "string", "format": "date"}
            }
        }"#,
    )
    .expect("benchmark schema parses")
}

fn nested_schema() -> AirbyteType {
    parse_json_schema(
        r#"{
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "tags": {"type": "array", "items": {"type": "string"}},
                "owner": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "contact": {"oneOf": [{"type": "integer"}, {"type": "string"}]}
                    }
                }
            }
        }"#,
    )
    .expect("benchmark schema parses")
}

fn flat_records(count: usize) -> Vec<AvroValue> {
    (0..count as i64)
        .map(|i| {
            AvroValue::record([
                ("id", AvroValue::Long(i)),
                ("name", AvroValue::from("benchmark user")),
                ("score", AvroValue::Double(i as f64 * 0.25)),
                ("active", AvroValue::Boolean(i % 2 == 0)),
                ("created_at", AvroValue::TimestampMicros(1_700_000_000_000_000 + i)),
                ("birthday", AvroValue::Date(10_000 + (i % 365) as i32)),
            ])
        })
        .collect()
}

fn nested_records(count: usize) -> Vec<AvroValue> {
    (0..count as i64)
        .map(|i| {
            AvroValue::record([
                ("id", AvroValue::Long(i)),
                (
                    "tags",
                    AvroValue::Array(vec![AvroValue::from("a"), AvroValue::from("b")]),
                ),
                (
                    "owner",
                    AvroValue::record([
                        ("name", AvroValue::from("owner")),
                        ("contact", AvroValue::from("owner@example.com")),
                    ]),
                ),
            ])
        })
        .collect()
}

fn bench_batch_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_sizes");

    for &count in &[1_000usize, 10_000, 100_000] {
        let records = flat_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("flat", count), &records, |b, records| {
            b.iter(|| {
                let mut converter = RecordConverter::new(flat_schema(), ConverterConfig::new());
                black_box(converter.convert_all(records).expect("records convert"))
            })
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested");
    let records = nested_records(10_000);
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("nested_10k", |b| {
        b.iter(|| {
            let mut converter = RecordConverter::new(nested_schema(), ConverterConfig::new());
            black_box(converter.convert_all(&records).expect("records convert"))
        })
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_batch_sizes, bench_nested
}

criterion_main!(benches);
