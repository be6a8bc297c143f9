//! Payment Repository
//!
//! 押金记录。押金达到最低金额即确认预订，否则记录为失败，预订保持 PENDING。

use rust_decimal::Decimal;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::MemoryDb;
use crate::db::models::{CustomerId, Payment, ReservationId, ReservationStatus};

#[derive(Clone)]
pub struct PaymentRepository {
    base: BaseRepository,
}

impl PaymentRepository {
    pub fn new(db: MemoryDb) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Record a deposit for one of the customer's pending reservations
    ///
    /// Without an explicit `reservation_id` the most recent PENDING
    /// reservation is used. The payment is stored whether it completes or
    /// fails; only a completed one confirms the reservation.
    pub fn process_deposit(
        &self,
        customer_id: CustomerId,
        reservation_id: Option<ReservationId>,
        amount: Decimal,
        minimum: Decimal,
    ) -> RepoResult<Payment> {
        let mut guard = self.base.db().lock();
        let state = &mut *guard;

        let target = match reservation_id {
            Some(id) => {
                let r = state
                    .reservations
                    .get(&id)
                    .ok_or_else(|| RepoError::NotFound("Reservation not found.".to_string()))?;
                if r.customer_id != customer_id {
                    return Err(RepoError::Forbidden(
                        "You can only pay for your own reservations.".to_string(),
                    ));
                }
                if r.status != ReservationStatus::Pending {
                    return Err(RepoError::Validation(format!(
                        "Reservation {id} is not awaiting a deposit."
                    )));
                }
                id
            }
            None => state
                .latest_pending_for(customer_id)
                .ok_or_else(|| RepoError::NotFound("No pending reservation found.".to_string()))?,
        };

        let id = state.next_payment_id();
        let mut payment = Payment::new(id, target, customer_id, amount);
        if payment.process_deposit(minimum)
            && let Some(r) = state.reservations.get_mut(&target)
        {
            r.status = ReservationStatus::Confirmed;
        }
        state.payments.insert(id, payment.clone());
        Ok(payment)
    }
}
