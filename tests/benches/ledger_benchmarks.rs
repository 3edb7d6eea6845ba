//! # Heritage Shipping Ledger Benchmarks
//!
//! | Component | Operation |
//! |-----------|-----------|
//! | hs-01 Identifiers | candidate generation |
//! | hs-02 Shipment Ledger | booking, status update, tracking lookup |
//! | hs-03 Quote Ledger | submission |
//! | hs-04 Access Gate | constant-time key comparison |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hs_01_identifiers::{IdentifierGenerator, IdentifierPrefix, RandomIdentifierGenerator};
use hs_02_shipment_ledger::{ShipmentLedgerApi, TransitionRequest};
use hs_03_quote_ledger::QuoteLedgerApi;
use hs_04_access_gate::constant_time_compare;
use hs_tests::fixtures::{admin, new_quote, new_shipment, subject, Harness};
use shared_types::{ShipmentStatus, SubjectId};
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime")
}

// ============================================================================
// HS-01: Identifier generation
// ============================================================================

fn bench_identifier_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hs-01-identifiers");
    let generator = RandomIdentifierGenerator::new();
    let prefix = IdentifierPrefix::tracking();

    group.bench_function("random_candidate", |b| {
        b.iter(|| black_box(generator.generate(&prefix)))
    });
    group.finish();
}

// ============================================================================
// HS-02: Shipment ledger
// ============================================================================

fn bench_shipment_ledger(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("hs-02-shipment-ledger");
    group.measurement_time(Duration::from_secs(5));

    let booking = Harness::random();
    let h = &booking;
    group.bench_function("create", |b| {
        b.to_async(&rt).iter(|| async move {
            black_box(
                h.shipments
                    .create(&admin(), new_shipment(Some("u")))
                    .await
                    .expect("booking"),
            )
        })
    });

    let reporting = Harness::random();
    let h = &reporting;
    let departed = rt.block_on(async {
        let shipment = h
            .shipments
            .create(&admin(), new_shipment(Some("u")))
            .await
            .expect("booking");
        let tn = shipment.tracking_number.into_string();
        h.shipments
            .transition(&admin(), &tn, TransitionRequest::new(ShipmentStatus::InTransit, "Shanghai"))
            .await
            .expect("departure");
        tn
    });
    let tn = departed.as_str();
    group.bench_function("position_report", |b| {
        b.to_async(&rt).iter(|| async move {
            black_box(
                h.shipments
                    .transition(
                        &admin(),
                        tn,
                        TransitionRequest::new(ShipmentStatus::InTransit, "Indian Ocean"),
                    )
                    .await
                    .expect("position report"),
            )
        })
    });

    // Lookup cost grows with history length.
    for history in [10usize, 100, 1000] {
        let h = Harness::random();
        let tn = rt.block_on(async {
            let tn = h
                .shipments
                .create(&admin(), new_shipment(Some("u")))
                .await
                .expect("booking")
                .tracking_number
                .into_string();
            h.shipments
                .transition(&admin(), &tn, TransitionRequest::new(ShipmentStatus::InTransit, "Shanghai"))
                .await
                .expect("departure");
            for i in 1..history {
                h.shipments
                    .transition(
                        &admin(),
                        &tn,
                        TransitionRequest::new(ShipmentStatus::InTransit, format!("Waypoint {i}")),
                    )
                    .await
                    .expect("position report");
            }
            tn
        });

        group.throughput(Throughput::Elements(history as u64));
        group.bench_with_input(BenchmarkId::new("track", history), &tn, |b, tn| {
            let caller = subject("u");
            let (h, caller, tn) = (&h, &caller, tn.as_str());
            b.to_async(&rt).iter(|| async move {
                black_box(h.shipments.get(caller, tn).await.expect("tracking"))
            })
        });
    }
    group.finish();
}

// ============================================================================
// HS-03: Quote ledger
// ============================================================================

fn bench_quote_ledger(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("hs-03-quote-ledger");

    let h = Harness::random();
    let owner = SubjectId::new("u");
    let (h, owner) = (&h, &owner);
    group.bench_function("submit", |b| {
        b.to_async(&rt).iter(|| async move {
            black_box(h.quotes.create(new_quote(), owner).await.expect("submission"))
        })
    });
    group.finish();
}

// ============================================================================
// HS-04: Access gate
// ============================================================================

fn bench_constant_time_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("hs-04-access-gate");
    let expected = "k".repeat(64);
    let wrong_first = format!("x{}", "k".repeat(63));
    let wrong_last = format!("{}x", "k".repeat(63));

    group.bench_function("compare_mismatch_first_byte", |b| {
        b.iter(|| black_box(constant_time_compare(&wrong_first, &expected)))
    });
    group.bench_function("compare_mismatch_last_byte", |b| {
        b.iter(|| black_box(constant_time_compare(&wrong_last, &expected)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_identifier_generation,
    bench_shipment_ledger,
    bench_quote_ledger,
    bench_constant_time_compare,
);
criterion_main!(benches);
