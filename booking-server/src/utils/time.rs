//! 时间工具函数 (预订日期与时间解析)
//!
//! 预订统一存储为 ISO 日期 (YYYY-MM-DD) 与 HH:MM 时间。

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::{AppError, AppResult};

/// Date formats accepted besides ISO, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// 解析日期字符串，并规范化为 `NaiveDate`
///
/// 接受 ISO 日期、常见的本地化写法以及带时间的 RFC 3339 时间戳
/// (取其日期部分)。
pub fn normalize_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .map(|dt| dt.date())
}

/// 解析日期，失败返回验证错误
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    normalize_date(input).ok_or_else(|| AppError::validation(format!("Invalid date: {input}")))
}

/// 解析预订时间 (HH:MM，兼容 HH:MM:SS 与 12 小时制)
pub fn normalize_time(input: &str) -> Option<NaiveTime> {
    let s = input.trim();
    shared::serde_helpers::hh_mm::parse(s).or_else(|| {
        NaiveTime::parse_from_str(&s.to_ascii_uppercase(), "%I:%M %p").ok()
    })
}


/// 当前日期 (UTC)
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_dates_pass_through() {
        assert_eq!(normalize_date("2026-12-24"), Some(ymd(2026, 12, 24)));
        assert_eq!(normalize_date(" 2026-12-24 "), Some(ymd(2026, 12, 24)));
    }

    #[test]
    fn other_formats_are_normalized() {
        assert_eq!(normalize_date("12/24/2026"), Some(ymd(2026, 12, 24)));
        assert_eq!(normalize_date("December 24, 2026"), Some(ymd(2026, 12, 24)));
        assert_eq!(normalize_date("24 Dec 2026"), Some(ymd(2026, 12, 24)));
        assert_eq!(normalize_date("2026-12-24T18:00:00Z"), Some(ymd(2026, 12, 24)));
        assert_eq!(normalize_date("2026-12-24T18:00"), Some(ymd(2026, 12, 24)));
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("someday"), None);
        assert_eq!(normalize_date("2026-02-30"), None);
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn times_accept_common_shapes() {
        let seven_thirty = NaiveTime::from_hms_opt(19, 30, 0).unwrap();
        assert_eq!(normalize_time("19:30"), Some(seven_thirty));
        assert_eq!(normalize_time("19:30:12"), Some(seven_thirty));
        assert_eq!(normalize_time("07:30 pm"), Some(seven_thirty));
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_time("dinner"), None);
    }
}
