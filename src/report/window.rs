//! The rolling 7-day report window.
//!
//! Day boundaries are computed in a caller-supplied reference timezone, never
//! the machine's local zone, so every client pages through the same days.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::ReportError;
use crate::report::types::Dated;

/// Number of days in the report window.
pub const WINDOW_DAYS: usize = 7;

/// The last [`WINDOW_DAYS`] calendar days in `tz`, today first.
pub fn recent_days(tz: Tz, now: DateTime<Utc>) -> Vec<NaiveDate> {
    let today = now.with_timezone(&tz).date_naive();
    std::iter::successors(Some(today), |d| d.pred_opt())
        .take(WINDOW_DAYS)
        .collect()
}

/// Resolves a 1-based day offset (1 = today) to its calendar day.
pub fn resolve_day(
    tz: Tz,
    now: DateTime<Utc>,
    day_offset: usize,
) -> Result<NaiveDate, ReportError> {
    if !(1..=WINDOW_DAYS).contains(&day_offset) {
        return Err(ReportError::invalid(format!(
            "day offset {day_offset} is outside 1..={WINDOW_DAYS}"
        )));
    }

    recent_days(tz, now)
        .get(day_offset - 1)
        .copied()
        .ok_or_else(|| ReportError::invalid(format!("no calendar day for offset {day_offset}")))
}

/// Keeps the items dated on the day `day_offset` resolves to.
pub fn select_day_window<T>(
    items: &[T],
    tz: Tz,
    now: DateTime<Utc>,
    day_offset: usize,
) -> Result<Vec<T>, ReportError>
where
    T: Dated + Clone,
{
    let day = resolve_day(tz, now, day_offset)?;
    Ok(filter_day(items, day))
}

/// Keeps the items dated on `day`, in input order.
pub fn filter_day<T>(items: &[T], day: NaiveDate) -> Vec<T>
where
    T: Dated + Clone,
{
    items.iter().filter(|i| i.date() == day).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::SensorSample;
    use chrono::{NaiveTime, TimeZone};
    use chrono_tz::Asia::Bangkok;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample(d: &str) -> SensorSample {
        SensorSample {
            date: date(d),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            temp: 25.0,
            ph: 7.0,
            tds: 300.0,
            water_level: 90.0,
            quality: None,
        }
    }

    #[test]
    fn test_recent_days_is_seven_consecutive_descending() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 5, 0, 0).unwrap();
        let days = recent_days(Bangkok, now);

        assert_eq!(days.len(), WINDOW_DAYS);
        assert_eq!(days[0], date("2024-06-01"));
        assert_eq!(days[6], date("2024-05-26"));
        for pair in days.windows(2) {
            assert_eq!(pair[0].pred_opt(), Some(pair[1]));
        }
    }

    #[test]
    fn test_recent_days_uses_reference_timezone() {
        // 20:00 UTC is already 03:00 the next day in Bangkok.
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        assert_eq!(recent_days(Bangkok, now)[0], date("2024-06-02"));
        assert_eq!(recent_days(Tz::UTC, now)[0], date("2024-06-01"));
    }

    #[test]
    fn test_recent_days_crosses_month_and_year() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let days = recent_days(Bangkok, now);
        assert_eq!(days[1], date("2024-01-01"));
        assert_eq!(days[2], date("2023-12-31"));
        assert_eq!(days[6], date("2023-12-27"));
    }

    #[test]
    fn test_resolve_day_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 5, 0, 0).unwrap();

        assert_eq!(resolve_day(Bangkok, now, 1).unwrap(), date("2024-06-01"));
        assert_eq!(resolve_day(Bangkok, now, 7).unwrap(), date("2024-05-26"));
        assert!(matches!(
            resolve_day(Bangkok, now, 0),
            Err(ReportError::InvalidArgument(_))
        ));
        assert!(matches!(
            resolve_day(Bangkok, now, 8),
            Err(ReportError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_select_day_window_filters_to_resolved_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 5, 0, 0).unwrap();
        let samples = vec![
            sample("2024-06-01"),
            sample("2024-05-31"),
            sample("2024-06-01"),
            sample("2024-05-20"),
        ];

        let today = select_day_window(&samples, Bangkok, now, 1).unwrap();
        assert_eq!(today.len(), 2);
        assert!(today.iter().all(|s| s.date == date("2024-06-01")));

        let yesterday = select_day_window(&samples, Bangkok, now, 2).unwrap();
        assert_eq!(yesterday.len(), 1);

        let empty = select_day_window(&samples, Bangkok, now, 5).unwrap();
        assert!(empty.is_empty());

        assert!(select_day_window(&samples, Bangkok, now, 8).is_err());
    }
}
