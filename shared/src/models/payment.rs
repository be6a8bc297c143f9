//! Payment Model
//!
//! Deposits are a placeholder check, there is no gateway behind them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CustomerId, PaymentId, ReservationId};

/// Minimum deposit accepted to confirm a reservation (500.00)
pub const MINIMUM_DEPOSIT: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Deposit record tied to a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub reservation_id: ReservationId,
    pub customer_id: CustomerId,
    pub deposit_amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn new(
        id: PaymentId,
        reservation_id: ReservationId,
        customer_id: CustomerId,
        deposit_amount: Decimal,
    ) -> Self {
        Self {
            id,
            reservation_id,
            customer_id,
            deposit_amount,
            payment_date: Utc::now(),
            status: PaymentStatus::Pending,
        }
    }

    /// Settle the deposit against `minimum`; returns whether it completed
    pub fn process_deposit(&mut self, minimum: Decimal) -> bool {
        if self.deposit_amount >= minimum {
            self.status = PaymentStatus::Completed;
            true
        } else {
            self.status = PaymentStatus::Failed;
            false
        }
    }
}
