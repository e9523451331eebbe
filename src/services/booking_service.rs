//! Booking service for flat-viewing reservations.
//!
//! Owns the reservation state machine: tenants reserve a timeslot, landlords
//! approve or reject it, and either side may cancel. Every operation loads the
//! flat from the repository, mutates it, saves it back and then notifies the
//! other party.

use std::sync::Arc;

use jiff::civil::DateTime;

use super::flat_locks::FlatLocks;
use super::identity::{FixedIdentityProvider, IdentityProvider};
use super::notifications::Notifier;
use crate::error::{AppError, AppResult, TimeslotViolation};
use crate::models::{
    BookingRules, Flat, ReservationSlot, ReservationStatus, SlotRequest, format_slot_time,
};
use crate::repositories::FlatRepository;
use crate::utils::clock::{Clock, SystemClock};

const PENDING_NOTICE: &str = "the reservation for your flat is pending, please approve or reject it";
const APPROVED_NOTICE: &str = "Your reservation has been approved";
const REJECTED_NOTICE: &str = "Your reservation has been rejected";
const CANCELLED_NOTICE: &str = "Your reservation has been cancelled";

/// Booking service handling reservation requests and landlord decisions.
///
/// Cloning is cheap; all collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct BookingService {
    flats: Arc<dyn FlatRepository>,
    notifier: Arc<dyn Notifier>,
    identity: Arc<dyn IdentityProvider>,
    clock: Arc<dyn Clock>,
    rules: BookingRules,
    locks: Arc<FlatLocks>,
}

impl BookingService {
    /// Creates a booking service with the system clock, the placeholder
    /// tenant identity, default booking rules and per-flat locking enabled.
    pub fn new(flats: Arc<dyn FlatRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            flats,
            notifier,
            identity: Arc::new(FixedIdentityProvider::default()),
            clock: Arc::new(SystemClock),
            rules: BookingRules::default(),
            locks: Arc::new(FlatLocks::new(true)),
        }
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_rules(mut self, rules: BookingRules) -> Self {
        self.rules = rules;
        self
    }

    /// Enables or disables serialization of operations per flat id.
    pub fn with_flat_locks(mut self, enabled: bool) -> Self {
        self.locks = Arc::new(FlatLocks::new(enabled));
        self
    }

    pub fn rules(&self) -> &BookingRules {
        &self.rules
    }

    /// Requests a viewing slot on a flat.
    ///
    /// # Returns
    /// The id of the new pending reservation
    ///
    /// # Errors
    /// - `IllegalTimeslot` when the timestamp breaks a booking rule, or the
    ///   same timeslot is already taken or was rejected by the landlord
    /// - `FlatNotFound` when the flat does not exist
    pub async fn reserve(&self, flat_id: &str, request: SlotRequest) -> AppResult<String> {
        let date_time = self
            .validate_slot_time(request.date_time)
            .inspect_err(|violation| {
                tracing::debug!(flat_id = %flat_id, reason = %violation, "Timeslot refused");
            })?;

        let (landlord_id, reservation_id) = {
            let _guard = self.locks.acquire(flat_id).await;
            let mut flat = self.load_flat(flat_id).await?;

            let slot = ReservationSlot::pending(date_time, self.identity.current_tenant_id());
            check_conflict(&flat, slot.date_time)?;

            let reservation_id = slot.id.clone();
            tracing::info!(
                flat_id = %flat_id,
                reservation_id = %reservation_id,
                tenant_id = %slot.tenant_id,
                date_time = %format_slot_time(slot.date_time),
                "Reservation requested"
            );
            flat.add_reservation(slot);

            let landlord_id = flat.landlord.id.clone();
            self.flats.save(flat).await?;
            (landlord_id, reservation_id)
        };

        self.notify(&landlord_id, PENDING_NOTICE).await;
        Ok(reservation_id)
    }

    /// Approves a reservation on behalf of the landlord.
    ///
    /// # Errors
    /// - `FlatNotFound` when the flat does not exist
    /// - `ReservationNotFound` when the reservation does not exist or was
    ///   already cancelled
    pub async fn approve(&self, flat_id: &str, reservation_id: &str) -> AppResult<String> {
        let (_, slot) = self
            .transition(flat_id, reservation_id, |slot| {
                if slot.status == ReservationStatus::Canceled {
                    return Err(AppError::reservation_cancelled());
                }
                slot.status = ReservationStatus::Approved;
                Ok(())
            })
            .await?;

        self.notify(&slot.tenant_id, APPROVED_NOTICE).await;
        Ok(slot.id)
    }

    /// Rejects a reservation on behalf of the landlord.
    ///
    /// The status is overwritten whatever it was before.
    pub async fn reject(&self, flat_id: &str, reservation_id: &str) -> AppResult<String> {
        let (_, slot) = self
            .transition(flat_id, reservation_id, |slot| {
                slot.status = ReservationStatus::Rejected;
                Ok(())
            })
            .await?;

        self.notify(&slot.tenant_id, REJECTED_NOTICE).await;
        Ok(slot.id)
    }

    /// Cancels a reservation; either party may call this.
    ///
    /// The status is overwritten whatever it was before, and the landlord is
    /// the one notified.
    pub async fn cancel(&self, flat_id: &str, reservation_id: &str) -> AppResult<String> {
        let (landlord_id, slot) = self
            .transition(flat_id, reservation_id, |slot| {
                slot.status = ReservationStatus::Canceled;
                Ok(())
            })
            .await?;

        self.notify(&landlord_id, CANCELLED_NOTICE).await;
        Ok(slot.id)
    }

    /// Lists the timestamps of pending and approved reservations, in the
    /// order they were requested.
    pub async fn view_occupied_dates(&self, flat_id: &str) -> AppResult<Vec<String>> {
        let flat = self.load_flat(flat_id).await?;
        Ok(flat
            .reservations()
            .iter()
            .filter(|r| r.status.is_occupied())
            .map(|r| format_slot_time(r.date_time))
            .collect())
    }

    /// Checks a requested timestamp against the booking rules.
    ///
    /// Rules are checked in a fixed order and the first failure wins.
    fn validate_slot_time(
        &self,
        date_time: Option<DateTime>,
    ) -> Result<DateTime, TimeslotViolation> {
        let date_time = date_time.ok_or(TimeslotViolation::Missing)?;
        let now = self.clock.now();

        if date_time < now {
            return Err(TimeslotViolation::InPast);
        }

        let lead_time = now.duration_until(date_time);
        if lead_time >= self.rules.max_lead_time() {
            return Err(TimeslotViolation::too_far_ahead(&self.rules));
        }
        if lead_time < self.rules.min_lead_time() {
            return Err(TimeslotViolation::too_soon(&self.rules));
        }

        if !self.rules.is_on_grid(date_time.minute()) {
            return Err(TimeslotViolation::off_grid(&self.rules));
        }
        if !self.rules.is_viewing_hour(date_time.hour()) {
            return Err(TimeslotViolation::outside_viewing_hours(&self.rules));
        }

        Ok(date_time)
    }

    async fn load_flat(&self, flat_id: &str) -> AppResult<Flat> {
        self.flats
            .find_by_id(flat_id)
            .await?
            .ok_or_else(|| AppError::flat_not_found(flat_id))
    }

    /// Applies `apply` to one reservation and saves the flat.
    ///
    /// # Returns
    /// The landlord id and the reservation as saved
    async fn transition<F>(
        &self,
        flat_id: &str,
        reservation_id: &str,
        apply: F,
    ) -> AppResult<(String, ReservationSlot)>
    where
        F: FnOnce(&mut ReservationSlot) -> AppResult<()>,
    {
        let _guard = self.locks.acquire(flat_id).await;
        let mut flat = self.load_flat(flat_id).await?;
        let landlord_id = flat.landlord.id.clone();

        let slot = flat
            .reservation_mut(reservation_id)
            .ok_or_else(|| AppError::reservation_not_found(reservation_id))?;
        let previous = slot.status;
        apply(slot)?;
        let slot = slot.clone();

        tracing::info!(
            flat_id = %flat_id,
            reservation_id = %reservation_id,
            from = %previous,
            to = %slot.status,
            "Reservation status changed"
        );

        self.flats.save(flat).await?;
        Ok((landlord_id, slot))
    }

    async fn notify(&self, user_id: &str, message: &str) {
        if let Err(e) = self.notifier.send(user_id, message).await {
            tracing::warn!(
                notifier = self.notifier.name(),
                user_id = %user_id,
                error = %e,
                "Notification could not be delivered"
            );
        }
    }
}

/// Refuses a timestamp held by an earlier reservation.
///
/// Cancelled reservations free their timeslot; a rejected one keeps it
/// blocked for every tenant.
fn check_conflict(flat: &Flat, date_time: DateTime) -> Result<(), TimeslotViolation> {
    let existing = flat
        .reservations_at(date_time)
        .find(|r| r.status != ReservationStatus::Canceled);

    match existing.map(|r| r.status) {
        Some(ReservationStatus::Rejected) => Err(TimeslotViolation::RejectedByLandlord),
        Some(_) => Err(TimeslotViolation::AlreadyOccupied),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Landlord;
    use crate::repositories::InMemoryFlatRepository;
    use crate::utils::clock::FixedClock;
    use async_trait::async_trait;
    use jiff::civil::{Date, date};
    use std::sync::Mutex;

    /// Monday 2024-03-04 09:00
    const NOW_DAY: Date = date(2024, 3, 4);

    fn now() -> DateTime {
        NOW_DAY.at(9, 0, 0, 0)
    }

    fn days_ahead(days: i64, hour: i8, minute: i8) -> DateTime {
        NOW_DAY
            .checked_add(jiff::Span::new().days(days))
            .unwrap()
            .at(hour, minute, 0, 0)
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingNotifier {
        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, user_id: &str, message: &str) -> AppResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((user_id.to_string(), message.to_string()));
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _user_id: &str, _message: &str) -> AppResult<()> {
            Err(anyhow::anyhow!("channel down").into())
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct Fixture {
        service: BookingService,
        repo: Arc<InMemoryFlatRepository>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Fixture {
        async fn new() -> Self {
            let repo = Arc::new(InMemoryFlatRepository::new());
            repo.save(Flat::new(
                "f1",
                "Cozy apartment",
                "London",
                Landlord::new("L1", "Murad", "Imanbayli"),
            ))
            .await
            .unwrap();
            let notifier = Arc::new(RecordingNotifier::default());
            let service = BookingService::new(repo.clone(), notifier.clone())
                .with_clock(Arc::new(FixedClock(now())))
                .with_identity(Arc::new(FixedIdentityProvider::new("t1")));
            Self {
                service,
                repo,
                notifier,
            }
        }

        async fn flat(&self) -> Flat {
            self.repo.find_by_id("f1").await.unwrap().unwrap()
        }

        /// Stores a slot directly, bypassing validation.
        async fn seed_slot(&self, date_time: DateTime, status: ReservationStatus) -> String {
            let mut flat = self.flat().await;
            let mut slot = ReservationSlot::pending(date_time, "t0");
            slot.status = status;
            let id = slot.id.clone();
            flat.add_reservation(slot);
            self.repo.save(flat).await.unwrap();
            id
        }

        async fn reserve(&self, date_time: DateTime) -> AppResult<String> {
            self.service.reserve("f1", SlotRequest::at(date_time)).await
        }
    }

    fn violation(result: AppResult<String>) -> TimeslotViolation {
        match result {
            Err(AppError::IllegalTimeslot(v)) => v,
            other => panic!("expected IllegalTimeslot, got {:?}", other),
        }
    }

    // ========================================================================
    // reserve: timeslot validation
    // ========================================================================

    #[tokio::test]
    async fn test_reserve_without_datetime() {
        let fx = Fixture::new().await;
        let result = fx.service.reserve("f1", SlotRequest::default()).await;
        assert_eq!(violation(result).to_string(), "Datetime cannot be null");
    }

    #[tokio::test]
    async fn test_reserve_in_past() {
        let fx = Fixture::new().await;
        let result = fx.reserve(days_ahead(-30, 14, 20)).await;
        assert_eq!(violation(result).to_string(), "You cannot book time in past");
    }

    #[tokio::test]
    async fn test_reserve_more_than_seven_days_ahead() {
        let fx = Fixture::new().await;
        let result = fx.reserve(days_ahead(8, 14, 20)).await;
        assert_eq!(
            violation(result).to_string(),
            "You can only book for the next 7 days"
        );
    }

    #[tokio::test]
    async fn test_reserve_exactly_seven_days_ahead_is_refused() {
        let fx = Fixture::new().await;
        let result = fx.reserve(days_ahead(7, 9, 0)).await;
        assert_eq!(
            violation(result),
            TimeslotViolation::TooFarAhead { max_days_ahead: 7 }
        );
    }

    #[tokio::test]
    async fn test_reserve_less_than_24_hours_ahead() {
        let fx = Fixture::new().await;
        let result = fx.reserve(days_ahead(0, 23, 0)).await;
        assert_eq!(
            violation(result).to_string(),
            "You cannot book appointment for time less than 24 hours"
        );
    }

    #[tokio::test]
    async fn test_reserve_exactly_24_hours_ahead_is_accepted() {
        let service = Fixture::new()
            .await
            .service
            .with_clock(Arc::new(FixedClock(NOW_DAY.at(10, 0, 0, 0))));
        let result = service
            .reserve("f1", SlotRequest::at(days_ahead(1, 10, 0)))
            .await;
        assert!(result.is_ok(), "{:?}", result);
    }

    #[tokio::test]
    async fn test_reserve_off_grid_minute() {
        let fx = Fixture::new().await;
        let result = fx.reserve(days_ahead(4, 14, 25)).await;
        assert_eq!(
            violation(result).to_string(),
            "You can only book a timeslot of 20 minutes"
        );
    }

    #[tokio::test]
    async fn test_reserve_outside_viewing_hours() {
        let fx = Fixture::new().await;
        let result = fx.reserve(days_ahead(4, 21, 20)).await;
        assert_eq!(
            violation(result).to_string(),
            "You can only book a timeslot between 10:00 and 20:00"
        );
    }

    #[tokio::test]
    async fn test_reserve_viewing_hour_boundaries() {
        let fx = Fixture::new().await;
        assert!(fx.reserve(days_ahead(2, 10, 0)).await.is_ok());
        assert!(fx.reserve(days_ahead(2, 19, 40)).await.is_ok());
        assert_eq!(
            violation(fx.reserve(days_ahead(2, 20, 0)).await),
            TimeslotViolation::OutsideViewingHours {
                first_hour: 10,
                closing_hour: 20
            }
        );
    }

    #[tokio::test]
    async fn test_validation_runs_before_flat_lookup() {
        let fx = Fixture::new().await;
        let result = fx
            .service
            .reserve("missing", SlotRequest::at(days_ahead(-1, 14, 20)))
            .await;
        assert_eq!(violation(result), TimeslotViolation::InPast);
    }

    #[tokio::test]
    async fn test_custom_rules_shape_messages() {
        let service = Fixture::new().await.service.with_rules(BookingRules {
            slot_minutes: 30,
            ..BookingRules::default()
        });
        let result = service
            .reserve("f1", SlotRequest::at(days_ahead(3, 14, 20)))
            .await;
        assert_eq!(
            violation(result).to_string(),
            "You can only book a timeslot of 30 minutes"
        );
    }

    // ========================================================================
    // reserve: storage, conflicts and notifications
    // ========================================================================

    #[tokio::test]
    async fn test_reserve_unknown_flat() {
        let fx = Fixture::new().await;
        let result = fx
            .service
            .reserve("missing", SlotRequest::at(days_ahead(3, 14, 20)))
            .await;
        match result {
            Err(e @ AppError::FlatNotFound { .. }) => assert_eq!(e.to_string(), "missing not found"),
            other => panic!("expected FlatNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reserve_stores_pending_slot_and_notifies_landlord() {
        let fx = Fixture::new().await;
        let requested = days_ahead(3, 14, 20).with().second(42).build().unwrap();

        let id = fx.reserve(requested).await.unwrap();

        let flat = fx.flat().await;
        assert_eq!(flat.reservations().len(), 1);
        let slot = &flat.reservations()[0];
        assert_eq!(slot.id, id);
        assert_eq!(slot.status, ReservationStatus::Pending);
        assert_eq!(slot.tenant_id, "t1");
        assert_eq!(slot.date_time, days_ahead(3, 14, 20));
        assert_eq!(
            fx.notifier.sent(),
            vec![("L1".to_string(), PENDING_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_reserve_rejected_timeslot() {
        let fx = Fixture::new().await;
        fx.seed_slot(days_ahead(3, 14, 20), ReservationStatus::Rejected)
            .await;

        let result = fx.reserve(days_ahead(3, 14, 20)).await;
        assert_eq!(
            violation(result).to_string(),
            "You cannot book this timeslot, since it has reject been by the landlord"
        );
    }

    #[tokio::test]
    async fn test_reserve_occupied_timeslot() {
        let fx = Fixture::new().await;
        for status in [ReservationStatus::Approved, ReservationStatus::Pending] {
            let at = if status == ReservationStatus::Approved {
                days_ahead(3, 14, 20)
            } else {
                days_ahead(3, 15, 0)
            };
            fx.seed_slot(at, status).await;

            let result = fx.reserve(at).await;
            assert_eq!(
                violation(result).to_string(),
                "You cannot book this timeslot, it has already been occupied by another tenant"
            );
        }
        assert!(fx.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_seconds_do_not_dodge_conflict_check() {
        let fx = Fixture::new().await;
        fx.reserve(days_ahead(3, 14, 20)).await.unwrap();

        let same_minute = days_ahead(3, 14, 20).with().second(30).build().unwrap();
        assert_eq!(
            violation(fx.reserve(same_minute).await),
            TimeslotViolation::AlreadyOccupied
        );
    }

    #[tokio::test]
    async fn test_reserve_cancelled_timeslot_appends_new_slot() {
        let fx = Fixture::new().await;
        let old = fx
            .seed_slot(days_ahead(3, 14, 20), ReservationStatus::Canceled)
            .await;

        let new = fx.reserve(days_ahead(3, 14, 20)).await.unwrap();

        let flat = fx.flat().await;
        let ids: Vec<_> = flat.reservations().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![old, new]);
        assert_eq!(flat.reservations()[0].status, ReservationStatus::Canceled);
    }

    #[tokio::test]
    async fn test_cancelled_slot_does_not_hide_later_booking() {
        let fx = Fixture::new().await;
        let at = days_ahead(3, 14, 20);
        fx.seed_slot(at, ReservationStatus::Canceled).await;
        fx.seed_slot(at, ReservationStatus::Approved).await;

        assert_eq!(
            violation(fx.reserve(at).await),
            TimeslotViolation::AlreadyOccupied
        );
    }

    #[tokio::test]
    async fn test_reserve_succeeds_when_notifier_fails() {
        let repo = Arc::new(InMemoryFlatRepository::new());
        repo.save(Flat::new("f1", "d", "a", Landlord::new("L1", "A", "B")))
            .await
            .unwrap();
        let service = BookingService::new(repo.clone(), Arc::new(FailingNotifier))
            .with_clock(Arc::new(FixedClock(now())));

        let id = service
            .reserve("f1", SlotRequest::at(days_ahead(3, 14, 20)))
            .await
            .unwrap();

        let flat = repo.find_by_id("f1").await.unwrap().unwrap();
        assert_eq!(flat.reservation(&id).unwrap().tenant_id, "tenantUserId");
    }

    // ========================================================================
    // approve / reject / cancel
    // ========================================================================

    #[tokio::test]
    async fn test_transitions_on_unknown_flat() {
        let fx = Fixture::new().await;
        for result in [
            fx.service.approve("missing", "r1").await,
            fx.service.reject("missing", "r1").await,
            fx.service.cancel("missing", "r1").await,
        ] {
            assert!(matches!(result, Err(AppError::FlatNotFound { .. })));
        }
    }

    #[tokio::test]
    async fn test_transitions_on_unknown_reservation() {
        let fx = Fixture::new().await;
        for result in [
            fx.service.approve("f1", "r1").await,
            fx.service.reject("f1", "r1").await,
            fx.service.cancel("f1", "r1").await,
        ] {
            match result {
                Err(e @ AppError::ReservationNotFound { .. }) => {
                    assert_eq!(e.to_string(), "r1 not found")
                }
                other => panic!("expected ReservationNotFound, got {:?}", other),
            }
        }
        assert!(fx.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_approve_pending_notifies_tenant() {
        let fx = Fixture::new().await;
        let id = fx
            .seed_slot(days_ahead(3, 14, 20), ReservationStatus::Pending)
            .await;

        assert_eq!(fx.service.approve("f1", &id).await.unwrap(), id);

        let flat = fx.flat().await;
        assert_eq!(flat.reservation(&id).unwrap().status, ReservationStatus::Approved);
        assert_eq!(
            fx.notifier.sent(),
            vec![("t0".to_string(), APPROVED_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_approve_cancelled_is_refused() {
        let fx = Fixture::new().await;
        let id = fx
            .seed_slot(days_ahead(3, 14, 20), ReservationStatus::Canceled)
            .await;

        let result = fx.service.approve("f1", &id).await;
        match result {
            Err(e @ AppError::ReservationNotFound { .. }) => assert_eq!(
                e.to_string(),
                "You cannot approve this reservation, it has already been cancelled by tenant"
            ),
            other => panic!("expected ReservationNotFound, got {:?}", other),
        }

        let flat = fx.flat().await;
        assert_eq!(flat.reservation(&id).unwrap().status, ReservationStatus::Canceled);
        assert!(fx.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_approve_rejected_is_allowed() {
        let fx = Fixture::new().await;
        let id = fx
            .seed_slot(days_ahead(3, 14, 20), ReservationStatus::Rejected)
            .await;

        assert_eq!(fx.service.approve("f1", &id).await.unwrap(), id);

        let flat = fx.flat().await;
        assert_eq!(flat.reservation(&id).unwrap().status, ReservationStatus::Approved);
        assert_eq!(
            fx.notifier.sent(),
            vec![("t0".to_string(), APPROVED_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_flats_leave_no_lock_entries() {
        let fx = Fixture::new().await;

        for i in 0..200 {
            let flat_id = format!("missing-{}", i);
            assert!(fx.service.cancel(&flat_id, "r").await.is_err());
            assert!(
                fx.service
                    .reserve(&flat_id, SlotRequest::at(days_ahead(3, 14, 20)))
                    .await
                    .is_err()
            );
        }
        fx.reserve(days_ahead(3, 14, 40)).await.unwrap();

        assert_eq!(fx.service.locks.len(), 0);
    }

    #[tokio::test]
    async fn test_reject_overwrites_any_status() {
        let fx = Fixture::new().await;
        let id = fx
            .seed_slot(days_ahead(3, 14, 20), ReservationStatus::Canceled)
            .await;

        fx.service.reject("f1", &id).await.unwrap();

        let flat = fx.flat().await;
        assert_eq!(flat.reservation(&id).unwrap().status, ReservationStatus::Rejected);
        assert_eq!(
            fx.notifier.sent(),
            vec![("t0".to_string(), REJECTED_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_cancel_overwrites_any_status_and_notifies_landlord() {
        let fx = Fixture::new().await;
        for status in [ReservationStatus::Rejected, ReservationStatus::Canceled] {
            let id = fx.seed_slot(days_ahead(3, 14, 20), status).await;
            fx.service.cancel("f1", &id).await.unwrap();

            let flat = fx.flat().await;
            assert_eq!(flat.reservation(&id).unwrap().status, ReservationStatus::Canceled);
        }
        assert_eq!(
            fx.notifier.sent(),
            vec![
                ("L1".to_string(), CANCELLED_NOTICE.to_string()),
                ("L1".to_string(), CANCELLED_NOTICE.to_string()),
            ]
        );
    }

    // ========================================================================
    // view
    // ========================================================================

    #[tokio::test]
    async fn test_view_unknown_flat() {
        let fx = Fixture::new().await;
        let result = fx.service.view_occupied_dates("f9").await;
        match result {
            Err(e @ AppError::FlatNotFound { .. }) => assert_eq!(e.to_string(), "f9 not found"),
            other => panic!("expected FlatNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_view_lists_occupied_in_insertion_order() {
        let fx = Fixture::new().await;
        fx.seed_slot(date(2021, 1, 2).at(11, 0, 0, 0), ReservationStatus::Pending)
            .await;
        fx.seed_slot(date(2021, 1, 1).at(16, 20, 0, 0), ReservationStatus::Approved)
            .await;
        fx.seed_slot(date(2021, 1, 1).at(17, 0, 0, 0), ReservationStatus::Rejected)
            .await;
        fx.seed_slot(date(2021, 1, 1).at(18, 0, 0, 0), ReservationStatus::Canceled)
            .await;

        let dates = fx.service.view_occupied_dates("f1").await.unwrap();
        assert_eq!(dates, vec!["2021-01-02T11:00:00", "2021-01-01T16:20:00"]);
    }

    // ========================================================================
    // full lifecycle and concurrency
    // ========================================================================

    #[tokio::test]
    async fn test_reserve_approve_cancel_scenario() {
        let fx = Fixture::new().await;

        let id = fx.reserve(days_ahead(3, 14, 20)).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(
            fx.flat().await.reservation(&id).unwrap().status,
            ReservationStatus::Pending
        );

        fx.service.approve("f1", &id).await.unwrap();
        assert_eq!(
            fx.flat().await.reservation(&id).unwrap().status,
            ReservationStatus::Approved
        );

        fx.service.cancel("f1", &id).await.unwrap();
        assert_eq!(
            fx.flat().await.reservation(&id).unwrap().status,
            ReservationStatus::Canceled
        );
        assert!(fx.service.view_occupied_dates("f1").await.unwrap().is_empty());

        assert_eq!(
            fx.notifier.sent(),
            vec![
                ("L1".to_string(), PENDING_NOTICE.to_string()),
                ("t1".to_string(), APPROVED_NOTICE.to_string()),
                ("L1".to_string(), CANCELLED_NOTICE.to_string()),
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reserves_keep_every_slot() {
        let fx = Fixture::new().await;
        let mut handles = Vec::new();
        for (day, hour) in (2..=5).flat_map(|d| (10..=19).map(move |h| (d, h))) {
            let service = fx.service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .reserve("f1", SlotRequest::at(days_ahead(day, hour, 0)))
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(fx.flat().await.reservations().len(), 40);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reserves_of_same_slot_admit_one() {
        let fx = Fixture::new().await;
        let mut handles = Vec::new();
        for _ in 0..16 {
            let service = fx.service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .reserve("f1", SlotRequest::at(days_ahead(3, 14, 20)))
                    .await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(fx.flat().await.reservations().len(), 1);
    }

    // ========================================================================
    // Property tests
    // ========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn service() -> BookingService {
            BookingService::new(
                Arc::new(InMemoryFlatRepository::new()),
                Arc::new(RecordingNotifier::default()),
            )
            .with_clock(Arc::new(FixedClock(now())))
        }

        proptest! {
            #[test]
            fn property_beyond_seven_days_is_refused(days in 7i64..400, hour in 0i8..24, minute in 0i8..60) {
                let result = service().validate_slot_time(Some(days_ahead(days, hour, minute)));
                prop_assume!(days > 7 || hour >= 9);
                prop_assert_eq!(result, Err(TimeslotViolation::TooFarAhead { max_days_ahead: 7 }));
            }

            #[test]
            fn property_within_24_hours_is_refused(minutes_ahead in 0i64..(24 * 60)) {
                let at = now().checked_add(jiff::Span::new().minutes(minutes_ahead)).unwrap();
                let result = service().validate_slot_time(Some(at));
                prop_assert_eq!(result, Err(TimeslotViolation::TooSoon { min_hours_ahead: 24 }));
            }

            #[test]
            fn property_off_grid_minutes_are_refused(days in 2i64..=5, hour in 10i8..=19, minute in 0i8..60) {
                prop_assume!(minute % 20 != 0);
                let result = service().validate_slot_time(Some(days_ahead(days, hour, minute)));
                prop_assert_eq!(result, Err(TimeslotViolation::OffGrid { slot_minutes: 20 }));
            }

            #[test]
            fn property_hours_outside_viewing_window_are_refused(
                days in 2i64..=5,
                hour in prop_oneof![0i8..10, 20i8..24],
                minute in prop_oneof![Just(0i8), Just(20i8), Just(40i8)],
            ) {
                let result = service().validate_slot_time(Some(days_ahead(days, hour, minute)));
                prop_assert_eq!(
                    result,
                    Err(TimeslotViolation::OutsideViewingHours { first_hour: 10, closing_hour: 20 })
                );
            }

            #[test]
            fn property_stored_timestamps_are_truncated(
                second in 0i8..60,
                nanos in 0i32..1_000_000_000,
            ) {
                let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
                runtime.block_on(async {
                    let fx = Fixture::new().await;
                    let requested = days_ahead(3, 14, 20)
                        .with()
                        .second(second)
                        .subsec_nanosecond(nanos)
                        .build()
                        .unwrap();
                    let id = fx.reserve(requested).await.unwrap();

                    let stored = fx.flat().await.reservation(&id).unwrap().date_time;
                    assert_eq!(stored.second(), 0);
                    assert_eq!(stored.subsec_nanosecond(), 0);
                    assert_eq!(stored, days_ahead(3, 14, 20));
                });
            }
        }
    }
}
