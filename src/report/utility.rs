use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Returns the most frequent value, or `None` for empty input.
///
/// Ties go to the value seen first. `0.0` and `-0.0` count as one value.
pub fn mode<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut counts: Vec<(f64, usize)> = Vec::new();

    for v in values {
        let v = if v == 0.0 { 0.0 } else { v };
        let slot = *index.entry(v.to_bits()).or_insert_with(|| {
            counts.push((v, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }

    let mut best: Option<(f64, usize)> = None;
    for (value, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }

    best.map(|(value, _)| value)
}

/// Places a wall-clock time in `tz`.
///
/// Ambiguous times resolve to the earlier instant. Times inside a DST gap
/// move forward to the first valid instant after it.
pub fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    // Gaps are at most a couple of hours in the tz database.
    for minutes in (15..=180).step_by(15) {
        if let Some(dt) = tz
            .from_local_datetime(&(naive + Duration::minutes(minutes)))
            .earliest()
        {
            return dt;
        }
    }
    tz.from_utc_datetime(&naive)
}

/// Start of wall-clock `hour` on `date` in `tz`, or `None` if `hour` > 23.
pub fn start_of_hour(tz: Tz, date: NaiveDate, hour: u32) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
    Some(localize(tz, date.and_time(time)))
}
