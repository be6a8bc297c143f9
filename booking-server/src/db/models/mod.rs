//! Database Models
//!
//! Account records live here; everything without secrets is the shared wire type.

pub mod account;

// Re-exports
pub use account::{Customer, CustomerCreate, Manager, hash_password, verify_password};
pub use shared::models::{
    CustomerId, DiningTable, DiningTableUpdate, Feedback, FeedbackId, ManagerId, Payment,
    PaymentId, PaymentStatus, Reservation, ReservationId, ReservationStatus, TableId, TableStatus,
};
