//! Criterion benchmarks for the dial report decoders.
//!
//! Both decoders sit on the hot path of every dial detent, so they must stay
//! in the nanosecond range.
//!
//! Run with:
//! ```bash
//! cargo bench --package dial-core --bench decode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dial_core::report::raw::MAX_REPORT_LEN;
use dial_core::{decode_input_event, decode_raw_report, RelAxis};

fn make_report(trigger: u8) -> [u8; MAX_REPORT_LEN] {
    let mut buf = [0u8; MAX_REPORT_LEN];
    buf[0] = 0x03;
    buf[3] = trigger;
    buf
}

fn bench_raw_decoder(c: &mut Criterion) {
    let turn = make_report(0x08);
    let idle = make_report(0x00);
    let foreign = {
        let mut buf = make_report(0x08);
        buf[0] = 0x01;
        buf
    };

    let mut group = c.benchmark_group("decode_raw_report");
    group.bench_function("turn", |b| b.iter(|| decode_raw_report(black_box(&turn))));
    group.bench_function("idle", |b| b.iter(|| decode_raw_report(black_box(&idle))));
    group.bench_function("foreign_report_id", |b| {
        b.iter(|| decode_raw_report(black_box(&foreign)))
    });
    group.finish();
}

fn bench_input_decoder(c: &mut Criterion) {
    let wheel = RelAxis::Wheel.linux_code();

    let mut group = c.benchmark_group("decode_input_event");
    group.bench_function("wheel_turn", |b| {
        b.iter(|| decode_input_event(black_box(0x02), black_box(wheel), black_box(-3)))
    });
    group.bench_function("syn_report", |b| {
        b.iter(|| decode_input_event(black_box(0x00), black_box(0), black_box(0)))
    });
    group.finish();
}

criterion_group!(benches, bench_raw_decoder, bench_input_decoder);
criterion_main!(benches);
