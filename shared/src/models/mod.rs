//! Data models
//!
//! Shared between booking-server and its clients (via API).
//! Ids are typed newtypes; see [`ids`].

pub mod account;
pub mod dining_table;
pub mod feedback;
pub mod ids;
pub mod payment;
pub mod reservation;

// Re-exports
pub use account::*;
pub use dining_table::*;
pub use feedback::*;
pub use ids::*;
pub use payment::*;
pub use reservation::*;
