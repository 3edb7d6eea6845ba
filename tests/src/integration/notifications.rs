//! # Notification Dispatch
//!
//! Ledger commits flow over the bus to a sink. Sink failures are logged and
//! never reach the caller.

#[cfg(test)]
mod tests {
    use crate::fixtures::{admin, new_quote, new_shipment, FailingSink, Harness, RecordingSink};
    use hs_02_shipment_ledger::{ShipmentLedgerApi, TransitionRequest};
    use hs_03_quote_ledger::QuoteLedgerApi;
    use rust_decimal_macros::dec;
    use shared_bus::{EventFilter, NotificationDispatcher, NotifierConfig};
    use shared_types::{ShipmentStatus, SubjectId};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;

    async fn wait_until(mut done: impl FnMut() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !done() {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_quote_submission_reaches_quotes_mailbox() {
        let h = Harness::new();
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = NotificationDispatcher::new(
            h.bus.subscribe(EventFilter::all()),
            sink.clone(),
            NotifierConfig::default(),
        );
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = tokio::spawn(dispatcher.run(shutdown_rx));

        h.quotes
            .create(new_quote(), &SubjectId::new("u"))
            .await
            .unwrap();
        h.quotes
            .mark_processed(&admin(), "HQ00000001", dec!(4850.00))
            .await
            .unwrap();

        wait_until(|| sink.seen.lock().len() == 2).await;
        let seen = sink.seen.lock().clone();
        assert_eq!(seen[0].recipient, "quotes@heritageshipping.com");
        assert_eq!(seen[0].subject, "New Quote Request: HQ00000001");
        assert!(seen[0].body.contains("Acme Ltd"));
        assert_eq!(seen[1].recipient, "jane@acme.example");
        assert!(seen[1].body.contains("4850.00"));

        shutdown_tx.send(true).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_affect_ledger() {
        let h = Harness::new();
        let dispatcher = NotificationDispatcher::new(
            h.bus.subscribe(EventFilter::all()),
            Arc::new(FailingSink),
            NotifierConfig::default(),
        );
        let stats = dispatcher.stats();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = tokio::spawn(dispatcher.run(shutdown_rx));

        let quote = h
            .quotes
            .create(new_quote(), &SubjectId::new("u"))
            .await
            .unwrap();
        let shipment = h.shipments.create(&admin(), new_shipment(None)).await.unwrap();
        let update = h
            .shipments
            .transition(
                &admin(),
                shipment.tracking_number.as_str(),
                TransitionRequest::new(ShipmentStatus::InTransit, "Singapore Port"),
            )
            .await
            .unwrap();

        assert_eq!(quote.quote_number.as_str(), "HQ00000001");
        assert_eq!(update.status, ShipmentStatus::InTransit);

        // Booking renders nothing; the other two fail at the sink.
        wait_until(|| stats.processed() == 3).await;
        assert_eq!(stats.failed(), 2);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.delivered(), 0);

        shutdown_tx.send(true).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_no_subscriber_is_not_an_error() {
        let h = Harness::new();
        let shipment = h.shipments.create(&admin(), new_shipment(None)).await.unwrap();
        h.shipments
            .transition(
                &admin(),
                shipment.tracking_number.as_str(),
                TransitionRequest::new(ShipmentStatus::InTransit, "Colombo"),
            )
            .await
            .unwrap();
        assert_eq!(h.bus.subscriber_count(), 0);
        assert_eq!(h.bus.events_dropped(), 2);
    }
}
