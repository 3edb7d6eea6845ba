//! # Shipment Ledger Service
//!
//! Application service implementing [`ShipmentLedgerApi`].
//!
//! ## Write Path
//!
//! 1. Validate input (no side effects on failure)
//! 2. Read the record and its version
//! 3. Evaluate the state machine against what was read
//! 4. Commit guarded by the version; on conflict go back to 2
//! 5. Notify (fire-and-forget) once the commit succeeded

use crate::domain::{
    check_shipment, plan_transition, validate_new_shipment, validate_transition, NewShipment,
    Shipment, ShipmentError, ShipmentLedgerConfig, ShipmentUpdate, TrackedShipment,
    TransitionRequest, VesselRef,
};
use crate::ports::{ShipmentLedgerApi, ShipmentRepository};
use async_trait::async_trait;
use hs_01_identifiers::{
    generate_with_retry, Identifier, IdentifierConfig, IdentifierGenerator, PersistOutcome,
};
use hs_04_access_gate::{gate, AdminGrant};
use shared_bus::{Notifier, ShippingEvent};
use shared_types::{Caller, RepositoryError, SubjectId, TimeSource};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Dependencies for [`ShipmentLedger`].
pub struct ShipmentLedgerDependencies {
    pub repository: Arc<dyn ShipmentRepository>,
    pub generator: Arc<dyn IdentifierGenerator>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn TimeSource>,
}

/// The Shipment Ledger.
pub struct ShipmentLedger {
    repository: Arc<dyn ShipmentRepository>,
    generator: Arc<dyn IdentifierGenerator>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn TimeSource>,
    identifiers: IdentifierConfig,
    config: ShipmentLedgerConfig,
}

impl ShipmentLedger {
    pub fn new(
        deps: ShipmentLedgerDependencies,
        identifiers: IdentifierConfig,
        config: ShipmentLedgerConfig,
    ) -> Self {
        Self {
            repository: deps.repository,
            generator: deps.generator,
            notifier: deps.notifier,
            clock: deps.clock,
            identifiers,
            config,
        }
    }

    /// Well-formed tracking number with this ledger's prefix, or `None`.
    fn parse_tracking_number(&self, value: &str) -> Option<Identifier> {
        Identifier::parse_with_prefix(value, &self.identifiers.tracking_prefix).ok()
    }

    fn storage_failure(err: RepositoryError) -> ShipmentError {
        let err = ShipmentError::from(err);
        if let ShipmentError::Storage(detail) = &err {
            error!(error = %detail, "[hs-02] Shipment storage failure");
        }
        err
    }

    fn persist_new(&self, candidate: Shipment) -> PersistOutcome<Shipment, ShipmentError> {
        match self.repository.insert(candidate) {
            Ok(stored) => PersistOutcome::Stored(stored.record),
            Err(RepositoryError::Duplicate(_)) => PersistOutcome::Collision,
            Err(e) => PersistOutcome::Rejected(Self::storage_failure(e)),
        }
    }
}

#[async_trait]
impl ShipmentLedgerApi for ShipmentLedger {
    async fn create(
        &self,
        _grant: &AdminGrant,
        fields: NewShipment,
    ) -> Result<Shipment, ShipmentError> {
        let errors = validate_new_shipment(&fields);
        if !errors.is_empty() {
            return Err(ShipmentError::Validation(errors));
        }

        let now = self.clock.now();
        let shipment = generate_with_retry(
            self.generator.as_ref(),
            &self.identifiers.tracking_prefix,
            self.identifiers.max_attempts,
            |tracking_number| self.persist_new(Shipment::book(tracking_number, &fields, now)),
        )?;

        info!(
            tracking_number = %shipment.tracking_number,
            origin = %shipment.origin_port,
            destination = %shipment.destination_port,
            "[hs-02] Shipment booked"
        );

        self.notifier.notify(ShippingEvent::ShipmentCreated {
            tracking_number: shipment.tracking_number.to_string(),
            owner: shipment.owner.clone(),
            origin_port: shipment.origin_port.clone(),
            destination_port: shipment.destination_port.clone(),
            estimated_delivery: shipment.estimated_delivery,
        });

        Ok(shipment)
    }

    async fn transition(
        &self,
        _grant: &AdminGrant,
        tracking_number: &str,
        request: TransitionRequest,
    ) -> Result<ShipmentUpdate, ShipmentError> {
        let errors = validate_transition(&request);
        if !errors.is_empty() {
            return Err(ShipmentError::Validation(errors));
        }
        let id = self
            .parse_tracking_number(tracking_number)
            .ok_or(ShipmentError::NotFound)?;
        let location = request.location.trim().to_string();
        let description = request.description.trim().to_string();

        for attempt in 0..=self.config.max_conflict_retries {
            let record = self
                .repository
                .get(&id)
                .map_err(Self::storage_failure)?
                .ok_or(ShipmentError::NotFound)?;
            let current = &record.shipment.record;

            let plan = plan_transition(current.status, current.resume_status, request.status)
                .map_err(|d| ShipmentError::InvalidTransition {
                    from: d.from,
                    to: d.to,
                })?;

            let now = self.clock.now();
            let event_time = request.event_time.unwrap_or(now);

            let mut next = current.clone();
            next.status = plan.to;
            next.resume_status = plan.resume_status;
            if plan.delivers() {
                next.actual_delivery = Some(event_time);
            }
            next.updated_at = now;
            debug_assert!(check_shipment(&next));

            let update = ShipmentUpdate {
                sequence: u32::try_from(record.updates.len()).unwrap_or(u32::MAX),
                location: location.clone(),
                status: plan.to,
                description: description.clone(),
                timestamp: event_time,
                recorded_at: now,
            };

            match self
                .repository
                .commit_transition(next, update.clone(), record.shipment.version)
            {
                Ok(version) => {
                    info!(
                        tracking_number = %id,
                        from = %plan.from,
                        to = %plan.to,
                        version,
                        "[hs-02] Shipment status updated"
                    );
                    self.notifier.notify(ShippingEvent::ShipmentStatusChanged {
                        tracking_number: id.to_string(),
                        owner: current.owner.clone(),
                        from: plan.from,
                        to: plan.to,
                        location: update.location.clone(),
                        event_time,
                    });
                    return Ok(update);
                }
                Err(RepositoryError::Conflict { .. }) => {
                    debug!(tracking_number = %id, attempt, "[hs-02] Lost version race, re-reading");
                }
                Err(e) => return Err(Self::storage_failure(e)),
            }
        }

        warn!(
            tracking_number = %id,
            retries = self.config.max_conflict_retries,
            "[hs-02] Transition abandoned after repeated conflicts"
        );
        Err(ShipmentError::Conflict(id.into_string()))
    }

    async fn get(
        &self,
        caller: &Caller,
        tracking_number: &str,
    ) -> Result<TrackedShipment, ShipmentError> {
        let found = match self.parse_tracking_number(tracking_number) {
            Some(id) => self.repository.get(&id).map_err(Self::storage_failure)?,
            None => None,
        };

        let record = gate(caller, found, |r| r.shipment.record.owner.as_ref())
            .ok_or(ShipmentError::NotFound)?;

        Ok(TrackedShipment::new(record.shipment.record, record.updates))
    }

    async fn list_for_owner(&self, owner: &SubjectId) -> Result<Vec<Shipment>, ShipmentError> {
        self.repository
            .list_by_owner(owner)
            .map_err(Self::storage_failure)
    }

    async fn detach_vessel(
        &self,
        _grant: &AdminGrant,
        vessel: &str,
    ) -> Result<usize, ShipmentError> {
        let vessel = vessel.trim();
        if vessel.is_empty() {
            return Ok(0);
        }
        let cleared = self
            .repository
            .clear_vessel(&VesselRef::new(vessel), self.clock.now())
            .map_err(Self::storage_failure)?;

        info!(vessel, cleared, "[hs-02] Vessel reference cleared");
        Ok(cleared)
    }
}
