//! 类型转换模块
//!
//! 把宽松的表单 DTO (shared::client) 转换为仓储层使用的强类型输入。
//! 缺失字段保持 `None`，格式错误的字段返回 400。

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::client::{ManagerUpdateReservationRequest, UpdateReservationRequest};
use shared::models::{CustomerId, ReservationId, ReservationStatus, TableId};
use shared::serde_helpers::NumberOrString;

use crate::auth::CurrentUser;
use crate::db::repository::{ManagerReservationChanges, ReservationChanges};
use crate::utils::time::{normalize_date, normalize_time};
use crate::utils::validation::{MAX_NOTE_LEN, non_blank, party_size_from, validate_optional_text};
use crate::utils::{AppError, AppResult};

// ============ Session ============

/// The customer behind a session; the manager has no customer record
pub fn customer_id_of(user: &CurrentUser) -> AppResult<CustomerId> {
    user.customer_id()
        .ok_or_else(|| AppError::forbidden("This action is only available to customers."))
}

// ============ Scalars ============

/// Reservation id from a form value, positive integers only
pub fn reservation_id(value: &Option<NumberOrString>) -> Option<ReservationId> {
    value
        .as_ref()
        .and_then(NumberOrString::as_i64)
        .and_then(|n| u64::try_from(n).ok())
        .filter(|n| *n > 0)
        .map(ReservationId)
}

/// Optional party size; present but invalid is an error
pub fn optional_party_size(value: &Option<NumberOrString>) -> AppResult<Option<u32>> {
    match value {
        None => Ok(None),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => v
            .as_i64()
            .and_then(party_size_from)
            .map(Some)
            .ok_or_else(|| AppError::validation("Invalid party size.")),
    }
}

pub fn optional_date(value: &Option<String>) -> AppResult<Option<NaiveDate>> {
    non_blank(value)
        .map(|d| normalize_date(d).ok_or_else(|| AppError::validation("Invalid date.")))
        .transpose()
}

pub fn optional_time(value: &Option<String>) -> AppResult<Option<NaiveTime>> {
    non_blank(value)
        .map(|t| normalize_time(t).ok_or_else(|| AppError::validation("Invalid time.")))
        .transpose()
}

/// Deposit amount; missing, unparsable or non-positive input means the default
pub fn deposit_amount(value: &Option<NumberOrString>, default: Decimal) -> Decimal {
    value
        .as_ref()
        .and_then(NumberOrString::as_decimal_str)
        .and_then(|s| s.parse::<Decimal>().ok())
        .filter(|d| d.is_sign_positive() && !d.is_zero())
        .unwrap_or(default)
}

/// Star rating, an integer within 1..=5
pub fn rating(value: &Option<NumberOrString>) -> Option<u8> {
    let n = value.as_ref()?.as_f64()?;
    if n.fract() != 0.0 {
        return None;
    }
    u8::try_from(n as i64)
        .ok()
        .filter(|r| (shared::models::MIN_RATING..=shared::models::MAX_RATING).contains(r))
}

// ============ Reservation edits ============

impl TryFrom<&UpdateReservationRequest> for ReservationChanges {
    type Error = AppError;

    fn try_from(req: &UpdateReservationRequest) -> Result<Self, Self::Error> {
        validate_optional_text(&req.comment, "comment", MAX_NOTE_LEN)?;
        Ok(Self {
            party_size: optional_party_size(&req.guests)?,
            date: optional_date(&req.date)?,
            time: optional_time(&req.time)?,
            // Blank leaves the stored comment in place
            comment: req.comment.clone().filter(|c| !c.trim().is_empty()),
        })
    }
}

impl TryFrom<&ManagerUpdateReservationRequest> for ManagerReservationChanges {
    type Error = AppError;

    fn try_from(req: &ManagerUpdateReservationRequest) -> Result<Self, Self::Error> {
        validate_optional_text(&req.comment, "comment", MAX_NOTE_LEN)?;

        let status = non_blank(&req.status)
            .map(|s| {
                s.parse::<ReservationStatus>()
                    .map_err(|_| AppError::validation("Invalid status."))
            })
            .transpose()?;

        // Bare numbers are accepted as table ids too
        let table_id = non_blank(&req.table_id)
            .map(|t| {
                t.parse::<TableId>()
                    .or_else(|_| t.parse::<u64>().map(TableId))
                    .map_err(|_| AppError::validation("Selected table not found."))
            })
            .transpose()?;

        Ok(Self {
            changes: ReservationChanges {
                party_size: optional_party_size(&req.guests)?,
                date: optional_date(&req.date)?,
                time: optional_time(&req.time)?,
                comment: req.comment.clone(),
            },
            table_id,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_id_accepts_numbers_and_text() {
        assert_eq!(reservation_id(&Some(3.into())), Some(ReservationId(3)));
        assert_eq!(reservation_id(&Some("7".into())), Some(ReservationId(7)));
        assert_eq!(reservation_id(&Some(0.into())), None);
        assert_eq!(reservation_id(&Some("x".into())), None);
        assert_eq!(reservation_id(&None), None);
    }

    #[test]
    fn party_size_rules() {
        assert_eq!(optional_party_size(&None).unwrap(), None);
        assert_eq!(optional_party_size(&Some("".into())).unwrap(), None);
        assert_eq!(optional_party_size(&Some("4".into())).unwrap(), Some(4));
        assert!(optional_party_size(&Some(0.into())).is_err());
        assert!(optional_party_size(&Some("abc".into())).is_err());
        assert!(optional_party_size(&Some(51.into())).is_err());
    }

    #[test]
    fn deposit_defaults() {
        let default = Decimal::new(500, 0);
        assert_eq!(deposit_amount(&None, default), default);
        assert_eq!(deposit_amount(&Some("abc".into()), default), default);
        assert_eq!(deposit_amount(&Some(0.into()), default), default);
        assert_eq!(deposit_amount(&Some("120.50".into()), default), Decimal::new(12050, 2));
        assert_eq!(deposit_amount(&Some(750.into()), default), Decimal::new(750, 0));
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(rating(&Some(5.into())), Some(5));
        assert_eq!(rating(&Some("3".into())), Some(3));
        assert_eq!(rating(&Some(0.into())), None);
        assert_eq!(rating(&Some(6.into())), None);
        assert_eq!(rating(&Some("2.5".into())), None);
        assert_eq!(rating(&None), None);
    }

    #[test]
    fn customer_edit_ignores_blank_comment() {
        let blank = UpdateReservationRequest {
            comment: Some("   ".into()),
            guests: Some("".into()),
            ..Default::default()
        };
        let changes = ReservationChanges::try_from(&blank).unwrap();
        assert_eq!(changes.comment, None);
        assert_eq!(changes.party_size, None);

        let filled = UpdateReservationRequest {
            comment: Some("window seat".into()),
            ..Default::default()
        };
        let changes = ReservationChanges::try_from(&filled).unwrap();
        assert_eq!(changes.comment.as_deref(), Some("window seat"));
    }

    #[test]
    fn manager_request_parses_overrides() {
        let req = ManagerUpdateReservationRequest {
            reservation_id: Some(1.into()),
            status: Some("cancelled".into()),
            table_id: Some("7".into()),
            date: Some("12/24/2026".into()),
            ..Default::default()
        };
        let edit = ManagerReservationChanges::try_from(&req).unwrap();
        assert_eq!(edit.status, Some(ReservationStatus::Cancelled));
        assert_eq!(edit.table_id, Some(TableId(7)));
        assert_eq!(edit.changes.date, NaiveDate::from_ymd_opt(2026, 12, 24));

        let bad = ManagerUpdateReservationRequest {
            status: Some("LOST".into()),
            ..Default::default()
        };
        assert!(ManagerReservationChanges::try_from(&bad).is_err());
    }
}
