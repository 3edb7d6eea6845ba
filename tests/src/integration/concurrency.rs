//! # Concurrency and Identifier Uniqueness
//!
//! Racing writers against one record, and identifier generation under
//! collisions and exhaustion.

#[cfg(test)]
mod tests {
    use crate::fixtures::{admin, new_quote, new_shipment, Harness};
    use hs_01_identifiers::{GenerationExhausted, ScriptedIdentifierGenerator};
    use hs_02_shipment_ledger::domain::invariant_contiguous_history;
    use hs_02_shipment_ledger::{
        ShipmentError, ShipmentLedgerApi, ShipmentLedgerConfig, ShipmentRepository,
        TransitionRequest,
    };
    use hs_03_quote_ledger::{QuoteError, QuoteLedgerApi, QuoteLedgerConfig};
    use rust_decimal_macros::dec;
    use shared_types::{Caller, ShipmentStatus, SubjectId};
    use std::collections::HashSet;
    use std::sync::Arc;

    const WRITERS: usize = 32;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_position_reports_lose_nothing() {
        let h = Harness::new();
        let tn = h
            .shipments
            .create(&admin(), new_shipment(None))
            .await
            .unwrap()
            .tracking_number
            .into_string();
        h.shipments
            .transition(&admin(), &tn, TransitionRequest::new(ShipmentStatus::InTransit, "Shanghai"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..WRITERS {
            let ledger = Arc::clone(&h.shipments);
            let tn = tn.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .transition(
                        &admin(),
                        &tn,
                        TransitionRequest::new(ShipmentStatus::InTransit, format!("Waypoint {i}")),
                    )
                    .await
            }));
        }

        let mut sequences = HashSet::new();
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(update) => assert!(sequences.insert(update.sequence)),
                Err(ShipmentError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(sequences.len() + conflicts, WRITERS);

        let record = h
            .shipment_repo
            .get(&tn.parse().unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(record.updates.len(), sequences.len() + 1);
        assert!(invariant_contiguous_history(&record.updates));
        assert_eq!(record.shipment.version, record.updates.len() as u64 + 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_status_changes_end_consistent() {
        let h = Harness::build(
            Arc::new(ScriptedIdentifierGenerator::counting(1)),
            Arc::new(ScriptedIdentifierGenerator::counting(1)),
            ShipmentLedgerConfig {
                max_conflict_retries: 16,
            },
            QuoteLedgerConfig::default(),
        );
        let tn = h
            .shipments
            .create(&admin(), new_shipment(None))
            .await
            .unwrap()
            .tracking_number
            .into_string();
        h.shipments
            .transition(&admin(), &tn, TransitionRequest::new(ShipmentStatus::InTransit, "Shanghai"))
            .await
            .unwrap();

        let targets = [
            ShipmentStatus::Customs,
            ShipmentStatus::OutForDelivery,
            ShipmentStatus::Delayed,
            ShipmentStatus::Delivered,
        ];
        let mut handles = Vec::new();
        for target in targets.into_iter().cycle().take(WRITERS) {
            let ledger = Arc::clone(&h.shipments);
            let tn = tn.clone();
            handles.push(tokio::spawn(async move {
                ledger
                    .transition(&admin(), &tn, TransitionRequest::new(target, "Singapore Port"))
                    .await
            }));
        }
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) | Err(ShipmentError::InvalidTransition { .. }) => {}
                Err(ShipmentError::Conflict(_)) => {}
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }

        let tracked = h.shipments.get(&Caller::Admin, &tn).await.unwrap();
        let last = tracked
            .updates
            .iter()
            .max_by_key(|u| u.sequence)
            .unwrap();
        assert_eq!(tracked.shipment.status, last.status);
        assert_eq!(
            tracked.shipment.actual_delivery.is_some(),
            tracked.shipment.status == ShipmentStatus::Delivered
        );
        let delivered = tracked
            .updates
            .iter()
            .filter(|u| u.status == ShipmentStatus::Delivered)
            .count();
        assert!(delivered <= 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_quote_priced_by_exactly_one_operator() {
        let h = Harness::new();
        h.quotes
            .create(new_quote(), &SubjectId::new("u"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..WRITERS {
            let ledger = Arc::clone(&h.quotes);
            handles.push(tokio::spawn(async move {
                ledger
                    .mark_processed(&admin(), "HQ00000001", dec!(100.00) + rust_decimal::Decimal::from(i))
                    .await
            }));
        }

        let mut winners = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(quote) => winners.push(quote),
                Err(QuoteError::AlreadyProcessed(_)) | Err(QuoteError::Conflict(_)) => {}
                Err(other) => panic!("unexpected error: {other:?}"),
            }
        }
        assert_eq!(winners.len(), 1);

        let stored = h.quotes.get(&Caller::Admin, "HQ00000001").await.unwrap();
        assert_eq!(stored.quoted_price, winners[0].quoted_price);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_bookings_get_distinct_numbers() {
        let h = Harness::random();

        let mut handles = Vec::new();
        for _ in 0..200 {
            let ledger = Arc::clone(&h.shipments);
            handles.push(tokio::spawn(async move {
                ledger.create(&admin(), new_shipment(Some("u"))).await
            }));
        }

        let mut numbers = HashSet::new();
        for handle in handles {
            let shipment = handle.await.unwrap().unwrap();
            assert!(shipment.tracking_number.as_str().starts_with("HS"));
            assert!(numbers.insert(shipment.tracking_number.into_string()));
        }
        assert_eq!(h.shipment_repo.len(), 200);
        assert_eq!(
            h.shipments
                .list_for_owner(&SubjectId::new("u"))
                .await
                .unwrap()
                .len(),
            200
        );
    }

    #[tokio::test]
    async fn test_collision_regenerates() {
        let generator = Arc::new(ScriptedIdentifierGenerator::new([1, 1], 2));
        let h = Harness::with_generators(
            generator.clone(),
            Arc::new(ScriptedIdentifierGenerator::counting(1)),
        );

        let first = h.shipments.create(&admin(), new_shipment(None)).await.unwrap();
        let second = h.shipments.create(&admin(), new_shipment(None)).await.unwrap();

        assert_eq!(first.tracking_number.as_str(), "HS00000001");
        assert_eq!(second.tracking_number.as_str(), "HS00000002");
        assert_eq!(generator.calls(), 3);
    }

    #[tokio::test]
    async fn test_generation_exhausted_after_bounded_attempts() {
        let generator = Arc::new(ScriptedIdentifierGenerator::constant(7));
        let h = Harness::with_generators(
            generator.clone(),
            Arc::new(ScriptedIdentifierGenerator::counting(1)),
        );

        h.shipments.create(&admin(), new_shipment(None)).await.unwrap();
        let err = h
            .shipments
            .create(&admin(), new_shipment(None))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ShipmentError::GenerationExhausted(GenerationExhausted {
                prefix: "HS".into(),
                attempts: hs_01_identifiers::DEFAULT_MAX_ATTEMPTS,
            })
        );
        assert_eq!(generator.calls(), 1 + hs_01_identifiers::DEFAULT_MAX_ATTEMPTS);
        assert_eq!(h.shipment_repo.len(), 1);
    }

    #[tokio::test]
    async fn test_shipment_and_quote_numbers_never_collide() {
        let h = Harness::new();
        let shipment = h.shipments.create(&admin(), new_shipment(None)).await.unwrap();
        let quote = h
            .quotes
            .create(new_quote(), &SubjectId::new("u"))
            .await
            .unwrap();

        assert_eq!(shipment.tracking_number.digits(), quote.quote_number.digits());
        assert_ne!(shipment.tracking_number.as_str(), quote.quote_number.as_str());
        assert!(h
            .shipments
            .get(&Caller::Admin, quote.quote_number.as_str())
            .await
            .is_err());
    }
}
