//! # Shipment Lifecycle Flows
//!
//! Booking, tracking and delivery through the public ledger API, with the
//! ownership gate and the state machine checked end to end.

#[cfg(test)]
mod tests {
    use crate::fixtures::{admin, new_shipment, start, subject, Harness};
    use chrono::Duration;
    use hs_02_shipment_ledger::domain::{check_shipment, invariant_contiguous_history};
    use hs_02_shipment_ledger::{
        ShipmentError, ShipmentLedgerApi, ShipmentRepository, TransitionRequest,
    };
    use shared_types::{Caller, ShipmentStatus, SubjectId};

    use ShipmentStatus::*;

    #[tokio::test]
    async fn test_full_lifecycle_scenario() {
        let h = Harness::new();

        // 1. Create: pending, empty history.
        let shipment = h
            .shipments
            .create(&admin(), new_shipment(Some("u")))
            .await
            .unwrap();
        let tn = shipment.tracking_number.as_str().to_string();
        assert_eq!(tn, "HS00000001");
        assert_eq!(shipment.status, Pending);
        assert!(shipment.actual_delivery.is_none());
        let tracked = h.shipments.get(&subject("u"), &tn).await.unwrap();
        assert!(tracked.updates.is_empty());

        // 2. in_transit at Singapore Port.
        h.clock.advance(Duration::hours(6));
        let update = h
            .shipments
            .transition(&admin(), &tn, TransitionRequest::new(InTransit, "Singapore Port"))
            .await
            .unwrap();
        assert_eq!(update.status, InTransit);
        assert_eq!(update.sequence, 0);
        let tracked = h.shipments.get(&subject("u"), &tn).await.unwrap();
        assert_eq!(tracked.shipment.status, InTransit);
        assert_eq!(tracked.updates.len(), 1);
        assert_eq!(tracked.updates[0].location, "Singapore Port");

        // 3. Through out_for_delivery to delivered.
        for (status, location) in [(OutForDelivery, "Rotterdam"), (Delivered, "Rotterdam")] {
            h.clock.advance(Duration::days(1));
            h.shipments
                .transition(&admin(), &tn, TransitionRequest::new(status, location))
                .await
                .unwrap();
            let current = h.shipments.get(&Caller::Admin, &tn).await.unwrap();
            assert!(check_shipment(&current.shipment));
        }
        let delivered = h.shipments.get(&subject("u"), &tn).await.unwrap();
        assert_eq!(delivered.shipment.status, Delivered);
        assert_eq!(
            delivered.shipment.actual_delivery,
            Some(start() + Duration::hours(6) + Duration::days(2))
        );

        // 4. Nothing leaves delivered, and the rejected attempt writes nothing.
        let err = h
            .shipments
            .transition(&admin(), &tn, TransitionRequest::new(Customs, "Rotterdam"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ShipmentError::InvalidTransition {
                from: Delivered,
                to: Customs
            }
        );
        let after = h.shipments.get(&subject("u"), &tn).await.unwrap();
        assert_eq!(after, delivered);
    }

    #[tokio::test]
    async fn test_every_move_out_of_delivered_rejected() {
        let h = Harness::new();
        let tn = h
            .shipments
            .create(&admin(), new_shipment(None))
            .await
            .unwrap()
            .tracking_number
            .into_string();
        for status in [InTransit, OutForDelivery, Delivered] {
            h.shipments
                .transition(&admin(), &tn, TransitionRequest::new(status, "Port"))
                .await
                .unwrap();
        }
        let before = h.shipments.get(&Caller::Admin, &tn).await.unwrap();

        for target in ShipmentStatus::ALL {
            let result = h
                .shipments
                .transition(&admin(), &tn, TransitionRequest::new(target, "Port"))
                .await;
            assert!(
                matches!(result, Err(ShipmentError::InvalidTransition { .. })),
                "delivered -> {target} was accepted"
            );
        }
        assert_eq!(h.shipments.get(&Caller::Admin, &tn).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_side_states_return_to_resume_status() {
        let h = Harness::new();
        let tn = h
            .shipments
            .create(&admin(), new_shipment(None))
            .await
            .unwrap()
            .tracking_number
            .into_string();

        for status in [InTransit, Delayed, Exception, InTransit] {
            h.shipments
                .transition(&admin(), &tn, TransitionRequest::new(status, "Colombo"))
                .await
                .unwrap();
        }
        let tracked = h.shipments.get(&Caller::Admin, &tn).await.unwrap();
        assert_eq!(tracked.shipment.status, InTransit);
        assert_eq!(tracked.shipment.resume_status, None);
        assert_eq!(tracked.updates.len(), 4);

        h.shipments
            .transition(&admin(), &tn, TransitionRequest::new(Delayed, "Colombo"))
            .await
            .unwrap();
        let err = h
            .shipments
            .transition(&admin(), &tn, TransitionRequest::new(Customs, "Colombo"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShipmentError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_history_is_newest_event_first_and_contiguous() {
        let h = Harness::new();
        let tn = h
            .shipments
            .create(&admin(), new_shipment(Some("u")))
            .await
            .unwrap()
            .tracking_number
            .into_string();

        h.shipments
            .transition(&admin(), &tn, TransitionRequest::new(InTransit, "Shanghai"))
            .await
            .unwrap();
        // Backdated customs event recorded after the position report.
        h.clock.advance(Duration::hours(2));
        h.shipments
            .transition(&admin(), &tn, TransitionRequest::new(InTransit, "Singapore Port"))
            .await
            .unwrap();
        h.shipments
            .transition(
                &admin(),
                &tn,
                TransitionRequest::new(Customs, "Singapore Port").at(start() + Duration::hours(1)),
            )
            .await
            .unwrap();

        let tracked = h.shipments.get(&subject("u"), &tn).await.unwrap();
        let locations: Vec<&str> = tracked.updates.iter().map(|u| u.location.as_str()).collect();
        let sequences: Vec<u32> = tracked.updates.iter().map(|u| u.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 0]);
        assert_eq!(locations[0], "Singapore Port");

        let record = h
            .shipment_repo
            .get(&tracked.shipment.tracking_number)
            .unwrap()
            .unwrap();
        assert!(invariant_contiguous_history(&record.updates));
    }

    #[tokio::test]
    async fn test_foreign_and_missing_are_indistinguishable() {
        let h = Harness::new();
        let owned = h
            .shipments
            .create(&admin(), new_shipment(Some("u")))
            .await
            .unwrap()
            .tracking_number
            .into_string();
        let ownerless = h
            .shipments
            .create(&admin(), new_shipment(None))
            .await
            .unwrap()
            .tracking_number
            .into_string();

        let foreign = h.shipments.get(&subject("v"), &owned).await.unwrap_err();
        let hidden = h.shipments.get(&subject("v"), &ownerless).await.unwrap_err();
        let missing = h
            .shipments
            .get(&subject("v"), "HS99999999")
            .await
            .unwrap_err();
        let malformed = h.shipments.get(&subject("v"), "not-a-number").await.unwrap_err();

        assert_eq!(foreign, ShipmentError::NotFound);
        assert_eq!(foreign.to_string(), missing.to_string());
        assert_eq!(hidden, missing);
        assert_eq!(malformed, missing);

        assert!(h.shipments.get(&Caller::Admin, &ownerless).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_for_owner_in_creation_order() {
        let h = Harness::new();
        for owner in ["u", "v", "u", "u"] {
            h.shipments
                .create(&admin(), new_shipment(Some(owner)))
                .await
                .unwrap();
        }
        let listed: Vec<String> = h
            .shipments
            .list_for_owner(&SubjectId::new("u"))
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.tracking_number.into_string())
            .collect();
        assert_eq!(listed, vec!["HS00000001", "HS00000003", "HS00000004"]);
    }

    #[tokio::test]
    async fn test_detach_vessel_keeps_shipments() {
        let h = Harness::new();
        let mut booking = new_shipment(Some("u"));
        booking.vessel = Some("MV Heritage Star".into());
        let tn = h
            .shipments
            .create(&admin(), booking.clone())
            .await
            .unwrap()
            .tracking_number
            .into_string();
        h.shipments.create(&admin(), booking).await.unwrap();
        h.shipments
            .create(&admin(), new_shipment(Some("u")))
            .await
            .unwrap();

        let cleared = h
            .shipments
            .detach_vessel(&admin(), "MV Heritage Star")
            .await
            .unwrap();
        assert_eq!(cleared, 2);

        let tracked = h.shipments.get(&subject("u"), &tn).await.unwrap();
        assert!(tracked.shipment.vessel.is_none());
        assert_eq!(h.shipment_repo.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_booking_writes_nothing() {
        let h = Harness::new();
        let mut booking = new_shipment(Some("u"));
        booking.weight = rust_decimal::Decimal::ZERO;
        booking.sender_name.clear();

        let err = h.shipments.create(&admin(), booking).await.unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|f| f.field.as_str()).collect();
        assert!(fields.contains(&"weight"));
        assert!(fields.contains(&"sender_name"));
        assert!(h.shipment_repo.is_empty());
    }
}
