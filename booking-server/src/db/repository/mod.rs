//! Repository Module
//!
//! Operations over the in-memory store. Each method locks the store once and
//! finishes its whole read-then-write sequence before releasing it.

// Accounts
pub mod customer;
pub mod manager;

// Floor
pub mod dining_table;

// Bookings
pub mod feedback;
pub mod payment;
pub mod reservation;

// Re-exports
pub use customer::{CustomerDeletion, CustomerRepository};
pub use dining_table::DiningTableRepository;
pub use feedback::{FeedbackCreate, FeedbackRepository};
pub use manager::ManagerRepository;
pub use payment::PaymentRepository;
pub use reservation::{
    ManagerReservationChanges, ReservationChanges, ReservationDraft, ReservationRepository,
};

use shared::models::{CustomerId, Reservation};
use thiserror::Error;

use super::MemoryDb;
use super::allocation::AllocationError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Credential error: {0}")]
    Credential(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Who is acting on a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Customer(CustomerId),
    Manager,
}

impl Actor {
    /// Customers may only touch their own reservations
    pub fn can_access(&self, reservation: &Reservation) -> bool {
        match self {
            Actor::Customer(id) => reservation.customer_id == *id,
            Actor::Manager => true,
        }
    }
}

/// Base repository with store reference
#[derive(Clone)]
pub struct BaseRepository {
    db: MemoryDb,
}

impl BaseRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &MemoryDb {
        &self.db
    }
}
