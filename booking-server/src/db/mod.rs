//! Database Module
//!
//! In-memory store for customers, managers, tables, reservations, payments
//! and feedback. Every collection is keyed by its typed id; numeric ids keep
//! iteration in creation order, which first-fit allocation relies on.
//!
//! The whole state sits behind one mutex. Repositories take the lock once per
//! operation, so each read-then-write (notably table allocation) is atomic.
//! Nothing survives a restart.

pub mod allocation;
pub mod models;
pub mod repository;

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::utils::AppError;
use models::{
    Customer, CustomerId, DiningTable, Feedback, FeedbackId, Manager, ManagerId, Payment,
    PaymentId, Reservation, ReservationId, ReservationStatus, TableId,
};

/// Monotonic id counters
#[derive(Debug, Default)]
struct Sequences {
    customer: u64,
    manager: u64,
    reservation: u64,
    payment: u64,
    feedback: u64,
}

fn bump(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

/// Store contents
#[derive(Debug, Default)]
pub struct DbState {
    pub customers: BTreeMap<CustomerId, Customer>,
    pub managers: BTreeMap<ManagerId, Manager>,
    pub tables: BTreeMap<TableId, DiningTable>,
    pub reservations: BTreeMap<ReservationId, Reservation>,
    pub payments: BTreeMap<PaymentId, Payment>,
    pub feedback: BTreeMap<FeedbackId, Feedback>,
    sequences: Sequences,
}

impl DbState {
    pub fn next_customer_id(&mut self) -> CustomerId {
        CustomerId(bump(&mut self.sequences.customer))
    }

    pub fn next_manager_id(&mut self) -> ManagerId {
        ManagerId(bump(&mut self.sequences.manager))
    }

    pub fn next_reservation_id(&mut self) -> ReservationId {
        ReservationId(bump(&mut self.sequences.reservation))
    }

    pub fn next_payment_id(&mut self) -> PaymentId {
        PaymentId(bump(&mut self.sequences.payment))
    }

    pub fn next_feedback_id(&mut self) -> FeedbackId {
        FeedbackId(bump(&mut self.sequences.feedback))
    }

    /// Whether any account (customer or manager) uses this email
    pub fn email_in_use(&self, email: &str) -> bool {
        self.customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(email))
            || self
                .managers
                .values()
                .any(|m| m.email.eq_ignore_ascii_case(email))
    }

    /// 顾客最近一次仍为 PENDING 的预订
    pub fn latest_pending_for(&self, customer_id: CustomerId) -> Option<ReservationId> {
        self.reservations
            .values()
            .rev()
            .find(|r| r.customer_id == customer_id && r.status == ReservationStatus::Pending)
            .map(|r| r.id)
    }
}

/// Shared handle to the in-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryDb {
    state: Arc<Mutex<DbState>>,
}

impl MemoryDb {
    /// Empty store, no tables and no manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the store for one operation
    pub fn lock(&self) -> MutexGuard<'_, DbState> {
        self.state.lock()
    }

    /// Drop every record and restart id sequences
    pub fn reset(&self) {
        *self.state.lock() = DbState::default();
    }
}

/// Seed data applied at startup
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub table_count: u64,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_password: String,
}

/// Database service: builds and seeds the store
pub struct DbService;

impl DbService {
    /// Create a store seeded with the floor plan and the manager account
    pub fn initialize(seed: &SeedConfig) -> Result<MemoryDb, AppError> {
        let db = MemoryDb::new();
        Self::seed(&db, seed)?;
        Ok(db)
    }

    /// Apply seed data to an existing store
    pub fn seed(db: &MemoryDb, seed: &SeedConfig) -> Result<(), AppError> {
        let password_hash = models::hash_password(&seed.manager_password)
            .map_err(|e| AppError::internal(format!("Failed to hash manager password: {e}")))?;

        let mut state = db.lock();
        state.tables = allocation::seed_tables(seed.table_count);

        let id = state.next_manager_id();
        state.managers.insert(
            id,
            Manager {
                id,
                name: seed.manager_name.clone(),
                email: seed.manager_email.clone(),
                password_hash,
            },
        );

        tracing::info!(
            tables = state.tables.len(),
            managers = state.managers.len(),
            "In-memory store initialized"
        );
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn initialize_seeds_tables_and_manager() {
        let db = seeded_db();
        let state = db.lock();
        assert_eq!(state.tables.len(), 20);
        assert_eq!(state.managers.len(), 1);
        let manager = state.managers.values().next().unwrap();
        assert_eq!(manager.id, ManagerId(1));
        assert!(manager.verify_password("12345678").unwrap());
        assert!(state.email_in_use("MANAGER@eden.org"));
        assert!(!state.email_in_use("guest@eden.org"));
    }

    #[test]
    fn reset_clears_everything() {
        let db = seeded_db();
        db.reset();
        let mut state = db.lock();
        assert!(state.tables.is_empty());
        assert!(state.managers.is_empty());
        assert_eq!(state.next_manager_id(), ManagerId(1));
    }

    #[test]
    fn sequences_are_independent() {
        let mut state = DbState::default();
        assert_eq!(state.next_reservation_id(), ReservationId(1));
        assert_eq!(state.next_reservation_id(), ReservationId(2));
        assert_eq!(state.next_customer_id(), CustomerId(1));
        assert_eq!(state.next_payment_id(), PaymentId(1));
        assert_eq!(state.next_feedback_id(), FeedbackId(1));
    }
}
