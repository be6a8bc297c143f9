//! Reservation Repository
//!
//! Booking, editing and cancelling. Every operation that touches table
//! status runs under one store lock, so two bookings can never claim the
//! same table.

use chrono::{NaiveDate, NaiveTime};

use super::{Actor, BaseRepository, RepoError, RepoResult};
use crate::db::MemoryDb;
use crate::db::allocation::{self, AllocationError};
use crate::db::models::{CustomerId, Reservation, ReservationId, ReservationStatus, TableId};

/// New booking
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub party_size: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub comment: String,
}

/// Customer edit; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ReservationChanges {
    pub party_size: Option<u32>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub comment: Option<String>,
}

/// Manager edit: a customer edit plus table and status overrides
#[derive(Debug, Clone, Default)]
pub struct ManagerReservationChanges {
    pub changes: ReservationChanges,
    pub table_id: Option<TableId>,
    pub status: Option<ReservationStatus>,
}

impl ReservationChanges {
    fn party_size_or(&self, current: u32) -> RepoResult<u32> {
        match self.party_size {
            Some(0) => Err(RepoError::Validation("Invalid party size.".to_string())),
            Some(n) => Ok(n),
            None => Ok(current),
        }
    }

    fn apply(self, reservation: &mut Reservation, party_size: u32) {
        reservation.party_size = party_size;
        if let Some(date) = self.date {
            reservation.date = date;
        }
        if let Some(time) = self.time {
            reservation.time = time;
        }
        if let Some(comment) = self.comment {
            reservation.comment = comment;
        }
    }
}

fn not_found() -> RepoError {
    RepoError::NotFound("Reservation not found.".to_string())
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// A customer's reservations, oldest first
    pub fn find_by_customer(&self, customer_id: CustomerId) -> Vec<Reservation> {
        self.base
            .db()
            .lock()
            .reservations
            .values()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect()
    }

    pub fn find_all(&self) -> Vec<Reservation> {
        self.base.db().lock().reservations.values().cloned().collect()
    }

    /// Book the first free table that seats the party
    pub fn create(&self, customer_id: CustomerId, draft: ReservationDraft) -> RepoResult<Reservation> {
        if draft.party_size == 0 {
            return Err(RepoError::Validation("Invalid party size.".to_string()));
        }

        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        if !state.customers.contains_key(&customer_id) {
            return Err(RepoError::NotFound("Customer not found.".to_string()));
        }

        let table_id = allocation::first_fit(&state.tables, draft.party_size)
            .ok_or(AllocationError::NoTableForBooking)?;
        allocation::hold(&mut state.tables, table_id);

        let id = state.next_reservation_id();
        let reservation = Reservation {
            id,
            customer_id,
            table_id,
            party_size: draft.party_size,
            date: draft.date,
            time: draft.time,
            comment: draft.comment,
            status: ReservationStatus::Pending,
        };
        state.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    /// Edit date, time, party size or comment
    ///
    /// The current table is released and first-fit runs again for the new
    /// party size; on failure the reservation keeps its old table.
    pub fn edit(
        &self,
        id: ReservationId,
        actor: Actor,
        changes: ReservationChanges,
    ) -> RepoResult<Reservation> {
        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        let reservation = state.reservations.get_mut(&id).ok_or_else(not_found)?;
        if !actor.can_access(reservation) {
            return Err(RepoError::Forbidden(
                "You can only modify your own reservations.".to_string(),
            ));
        }
        if !reservation.status.is_active() {
            return Err(RepoError::Validation(
                "Cancelled reservations cannot be edited.".to_string(),
            ));
        }

        let party_size = changes.party_size_or(reservation.party_size)?;
        let table_id =
            allocation::reallocate(&mut state.tables, Some(reservation.table_id), |tables| {
                allocation::first_fit(tables, party_size).ok_or(AllocationError::NoTableForChange)
            })?;

        reservation.table_id = table_id;
        changes.apply(reservation, party_size);
        Ok(reservation.clone())
    }

    /// Manager edit with optional table pick and status override
    ///
    /// Overriding to CANCELLED releases the table and ignores any table pick.
    /// Bringing a cancelled reservation back allocates a table again.
    pub fn manager_edit(
        &self,
        id: ReservationId,
        edit: ManagerReservationChanges,
    ) -> RepoResult<Reservation> {
        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        let reservation = state.reservations.get_mut(&id).ok_or_else(not_found)?;
        let party_size = edit.changes.party_size_or(reservation.party_size)?;
        let status = edit.status.unwrap_or(reservation.status);
        let held = reservation
            .status
            .is_active()
            .then_some(reservation.table_id);

        if status.is_active() {
            reservation.table_id =
                allocation::reallocate(&mut state.tables, held, |tables| match edit.table_id {
                    Some(desired) => allocation::choose_explicit(tables, desired, party_size, held),
                    None => allocation::first_fit(tables, party_size)
                        .ok_or(AllocationError::NoTableForChange),
                })?;
        } else if let Some(table_id) = held {
            allocation::release(&mut state.tables, table_id);
        }

        reservation.status = status;
        edit.changes.apply(reservation, party_size);
        Ok(reservation.clone())
    }

    /// Cancel and free the table
    ///
    /// Cancelling twice is a no-op.
    pub fn cancel(&self, id: ReservationId, actor: Actor) -> RepoResult<Reservation> {
        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        let reservation = state.reservations.get_mut(&id).ok_or_else(not_found)?;
        if !actor.can_access(reservation) {
            return Err(RepoError::Forbidden(
                "You can only cancel your own reservations.".to_string(),
            ));
        }
        if reservation.status.is_active() {
            allocation::release(&mut state.tables, reservation.table_id);
            reservation.status = ReservationStatus::Cancelled;
        }
        Ok(reservation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CustomerCreate, TableStatus};
    use crate::db::repository::CustomerRepository;
    use crate::db::test_support::seeded_db;

    fn customer(db: &MemoryDb, email: &str) -> CustomerId {
        CustomerRepository::new(db.clone())
            .create(CustomerCreate {
                username: "guest".into(),
                email: email.into(),
                password: "pw".into(),
                phone: Some("555-0101".into()),
            })
            .unwrap()
            .id
    }

    fn draft(party_size: u32) -> ReservationDraft {
        ReservationDraft {
            party_size,
            date: NaiveDate::from_ymd_opt(2026, 12, 24).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            comment: "vegetarian".into(),
        }
    }

    fn table_status(db: &MemoryDb, id: TableId) -> TableStatus {
        db.lock().tables[&id].status
    }

    #[test]
    fn create_takes_first_fitting_table() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r = repo.create(c, draft(4)).unwrap();
        assert_eq!(r.id, ReservationId(1));
        assert_eq!(r.table_id, TableId(1));
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(table_status(&db, TableId(1)), TableStatus::Reserved);

        // T-2 seats 2 and is skipped for a party of 3
        let r2 = repo.create(c, draft(3)).unwrap();
        assert_eq!(r2.table_id, TableId(3));
    }

    #[test]
    fn held_table_is_not_reused() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db);

        let first = repo.create(c, draft(2)).unwrap();
        let second = repo.create(c, draft(2)).unwrap();
        assert_ne!(first.table_id, second.table_id);
    }

    #[test]
    fn create_fails_when_nothing_fits() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db);

        let err = repo.create(c, draft(9)).unwrap_err();
        assert_eq!(err.to_string(), "No tables available for this time/size.");
        assert!(matches!(repo.create(c, draft(0)), Err(RepoError::Validation(_))));
        assert!(matches!(
            repo.create(CustomerId(77), draft(2)),
            Err(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn cancel_releases_table_and_is_idempotent() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r = repo.create(c, draft(2)).unwrap();
        let cancelled = repo.cancel(r.id, Actor::Customer(c)).unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(table_status(&db, r.table_id), TableStatus::Available);

        // Someone else takes the table; a second cancel must not free it
        let other = customer(&db, "b@eden.org");
        let taken = repo.create(other, draft(2)).unwrap();
        assert_eq!(taken.table_id, r.table_id);
        repo.cancel(r.id, Actor::Customer(c)).unwrap();
        assert_eq!(table_status(&db, r.table_id), TableStatus::Reserved);
    }

    #[test]
    fn customers_cannot_touch_other_reservations() {
        let db = seeded_db();
        let owner = customer(&db, "a@eden.org");
        let intruder = customer(&db, "b@eden.org");
        let repo = ReservationRepository::new(db);

        let r = repo.create(owner, draft(2)).unwrap();
        assert!(matches!(
            repo.cancel(r.id, Actor::Customer(intruder)),
            Err(RepoError::Forbidden(_))
        ));
        assert!(matches!(
            repo.edit(r.id, Actor::Customer(intruder), ReservationChanges::default()),
            Err(RepoError::Forbidden(_))
        ));
        assert!(repo.cancel(r.id, Actor::Manager).is_ok());
        assert!(matches!(
            repo.cancel(ReservationId(42), Actor::Manager),
            Err(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn same_size_edit_keeps_table() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r = repo.create(c, draft(4)).unwrap();
        let edited = repo
            .edit(
                r.id,
                Actor::Customer(c),
                ReservationChanges {
                    time: NaiveTime::from_hms_opt(20, 0, 0),
                    comment: Some("birthday".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.table_id, r.table_id);
        assert_eq!(edited.party_size, 4);
        assert_eq!(edited.comment, "birthday");
        assert_eq!(edited.time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
        assert_eq!(table_status(&db, r.table_id), TableStatus::Reserved);
    }

    #[test]
    fn failed_edit_restores_previous_hold() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r = repo.create(c, draft(2)).unwrap();
        let err = repo
            .edit(
                r.id,
                Actor::Customer(c),
                ReservationChanges {
                    party_size: Some(12),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "No tables available for these new requirements.");

        let after = db.lock().reservations[&r.id].clone();
        assert_eq!(after.table_id, r.table_id);
        assert_eq!(after.party_size, 2);
        assert_eq!(table_status(&db, r.table_id), TableStatus::Reserved);
    }

    #[test]
    fn growing_party_moves_to_bigger_table() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r = repo.create(c, draft(2)).unwrap();
        let edited = repo
            .edit(
                r.id,
                Actor::Customer(c),
                ReservationChanges {
                    party_size: Some(8),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.table_id, TableId(5));
        assert_eq!(table_status(&db, r.table_id), TableStatus::Available);
        assert_eq!(table_status(&db, TableId(5)), TableStatus::Reserved);
    }

    #[test]
    fn cancelled_reservation_cannot_be_edited() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db);

        let r = repo.create(c, draft(2)).unwrap();
        repo.cancel(r.id, Actor::Customer(c)).unwrap();
        assert!(matches!(
            repo.edit(r.id, Actor::Customer(c), ReservationChanges::default()),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn manager_explicit_table_rules() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r = repo.create(c, draft(4)).unwrap();
        // Seats four or more, so only its status can rule it out
        let other = repo.create(c, draft(4)).unwrap();
        assert_eq!(other.table_id, TableId(3));

        let pick = |table: u64| ManagerReservationChanges {
            table_id: Some(TableId(table)),
            ..Default::default()
        };

        let err = repo.manager_edit(r.id, pick(99)).unwrap_err();
        assert_eq!(err.to_string(), "Selected table not found.");
        let err = repo.manager_edit(r.id, pick(4)).unwrap_err();
        assert_eq!(err.to_string(), "Selected table capacity is not enough.");
        let err = repo.manager_edit(r.id, pick(other.table_id.value())).unwrap_err();
        assert_eq!(err.to_string(), "Selected table is not available.");

        // Own table stays selectable
        let same = repo.manager_edit(r.id, pick(r.table_id.value())).unwrap();
        assert_eq!(same.table_id, r.table_id);

        let moved = repo.manager_edit(r.id, pick(10)).unwrap();
        assert_eq!(moved.table_id, TableId(10));
        assert_eq!(table_status(&db, r.table_id), TableStatus::Available);
        assert_eq!(table_status(&db, TableId(10)), TableStatus::Reserved);
    }

    #[test]
    fn manager_status_override() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());
        let r = repo.create(c, draft(2)).unwrap();

        let cancelled = repo
            .manager_edit(
                r.id,
                ManagerReservationChanges {
                    status: Some(ReservationStatus::Cancelled),
                    table_id: Some(TableId(5)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(cancelled.table_id, r.table_id);
        assert_eq!(table_status(&db, r.table_id), TableStatus::Available);
        assert_eq!(table_status(&db, TableId(5)), TableStatus::Available);

        let revived = repo
            .manager_edit(
                r.id,
                ManagerReservationChanges {
                    status: Some(ReservationStatus::Confirmed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(revived.status, ReservationStatus::Confirmed);
        assert_eq!(table_status(&db, revived.table_id), TableStatus::Reserved);
    }

    #[test]
    fn latest_pending_skips_confirmed_and_cancelled() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let a = repo.create(c, draft(2)).unwrap();
        let b = repo.create(c, draft(2)).unwrap();
        assert_eq!(db.lock().latest_pending_for(c), Some(b.id));
        repo.cancel(b.id, Actor::Customer(c)).unwrap();
        assert_eq!(db.lock().latest_pending_for(c), Some(a.id));
        db.lock().reservations.get_mut(&a.id).unwrap().status = ReservationStatus::Confirmed;
        assert_eq!(db.lock().latest_pending_for(c), None);
        assert_eq!(repo.find_by_customer(c).len(), 2);
    }

    #[test]
    fn deleting_customer_frees_tables() {
        let db = seeded_db();
        let gone = customer(&db, "a@eden.org");
        let stays = customer(&db, "b@eden.org");
        let repo = ReservationRepository::new(db.clone());

        let r1 = repo.create(gone, draft(2)).unwrap();
        let r2 = repo.create(gone, draft(4)).unwrap();
        repo.cancel(r2.id, Actor::Customer(gone)).unwrap();
        let kept = repo.create(stays, draft(2)).unwrap();

        let deletion = CustomerRepository::new(db.clone()).delete(gone).unwrap();
        assert_eq!(deletion.reservations, 2);
        assert_eq!(deletion.tables_released, 1);
        assert_eq!(table_status(&db, r1.table_id), TableStatus::Available);
        assert_eq!(table_status(&db, kept.table_id), TableStatus::Reserved);
        assert!(repo.find_by_customer(gone).is_empty());
        assert_eq!(repo.find_all().len(), 1);
    }

    #[test]
    fn concurrent_bookings_never_share_a_table() {
        let db = seeded_db();
        let c = customer(&db, "a@eden.org");
        let repo = ReservationRepository::new(db);
        let repo = &repo;

        let tables: Vec<TableId> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|_| s.spawn(move || repo.create(c, draft(2)).map(|r| r.table_id)))
                .collect();
            handles
                .into_iter()
                .filter_map(|h| h.join().unwrap().ok())
                .collect()
        });

        let mut unique = tables.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), tables.len());
        // Every seeded table seats two
        assert_eq!(tables.len(), 16);
    }
}
