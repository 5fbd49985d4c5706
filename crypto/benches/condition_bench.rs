use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xrpl_crypto::{escrow_finish_fee, Condition, Fulfillment};
use xrpl_types::XrpAmount;

fn derive_preimage_condition_bench(c: &mut Criterion) {
    let fulfillment = Fulfillment::preimage(vec![0x42u8; 256]);

    c.bench_function("derive_condition_preimage_256B", |b| {
        b.iter(|| black_box(&fulfillment).derive_condition())
    });
}

fn decode_condition_bench(c: &mut Criterion) {
    let der = Fulfillment::preimage(vec![0x42u8; 32]).derive_condition().to_der();

    c.bench_function("condition_from_der", |b| {
        b.iter(|| Condition::from_der(black_box(&der)))
    });
}

fn decode_threshold_fulfillment_bench(c: &mut Criterion) {
    let fulfillment = Fulfillment::ThresholdSha256 {
        subfulfillments: (0u8..4).map(|i| Fulfillment::preimage(vec![i; 64])).collect(),
        subconditions: Vec::new(),
    };
    let der = fulfillment.to_der();

    c.bench_function("threshold_fulfillment_from_der", |b| {
        b.iter(|| Fulfillment::from_der(black_box(&der)))
    });
}

fn escrow_fee_bench(c: &mut Criterion) {
    let base = XrpAmount::of_drops(10).unwrap();
    let fulfillment = Fulfillment::preimage(vec![0u8; 128]);

    c.bench_function("escrow_finish_fee", |b| {
        b.iter(|| escrow_finish_fee(black_box(base), &fulfillment))
    });
}

criterion_group!(
    benches,
    derive_preimage_condition_bench,
    decode_condition_bench,
    decode_threshold_fulfillment_bench,
    escrow_fee_bench,
);
criterion_main!(benches);
