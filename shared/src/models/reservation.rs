//! Reservation Model

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{CustomerId, ReservationId, TableId};
use crate::serde_helpers::hh_mm;

/// Reservation lifecycle
///
/// `PENDING` on booking, `CONFIRMED` once the deposit is paid,
/// `CANCELLED` when released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Pending and confirmed reservations hold their table
    pub fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ReservationStatus::Pending),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CANCELLED" | "CANCELED" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "reservationId")]
    pub id: ReservationId,
    pub customer_id: CustomerId,
    pub table_id: TableId,
    pub party_size: u32,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub comment: String,
    pub status: ReservationStatus,
}

/// Reservation row as shown on the manager dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    pub id: ReservationId,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    pub party_size: u32,
    pub table: TableId,
    /// Lowercase status (`pending`, `confirmed`, `cancelled`)
    pub status: String,
    pub special_requests: String,
    pub contact_phone: String,
}

impl ReservationView {
    pub fn new(reservation: &Reservation, contact_phone: &str) -> Self {
        Self {
            id: reservation.id,
            date: reservation.date,
            time: reservation.time,
            party_size: reservation.party_size,
            table: reservation.table_id,
            status: reservation.status.as_str().to_ascii_lowercase(),
            special_requests: reservation.comment.clone(),
            contact_phone: contact_phone.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_serializes_with_dashboard_field_names() {
        let r = Reservation {
            id: ReservationId(7),
            customer_id: CustomerId(2),
            table_id: TableId(4),
            party_size: 2,
            date: NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            comment: "window".into(),
            status: ReservationStatus::Pending,
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["reservationId"], 7);
        assert_eq!(v["customerId"], "C-2");
        assert_eq!(v["tableId"], "T-4");
        assert_eq!(v["partySize"], 2);
        assert_eq!(v["date"], "2026-11-03");
        assert_eq!(v["time"], "19:30");
        assert_eq!(v["status"], "PENDING");

        let view = serde_json::to_value(ReservationView::new(&r, "555")).unwrap();
        assert_eq!(view["status"], "pending");
        assert_eq!(view["table"], "T-4");
        assert_eq!(view["specialRequests"], "window");
        assert_eq!(view["contactPhone"], "555");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("confirmed".parse::<ReservationStatus>().unwrap(), ReservationStatus::Confirmed);
        assert_eq!("Canceled".parse::<ReservationStatus>().unwrap(), ReservationStatus::Cancelled);
        assert!("done".parse::<ReservationStatus>().is_err());
        assert!(!ReservationStatus::Cancelled.is_active());
    }
}
