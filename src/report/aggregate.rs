use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::error::ReportError;
use crate::report::parameter::Parameter;
use crate::report::types::{Dated, HourlyStatistic, SensorSample};
use crate::report::utility::{localize, mode, start_of_hour};

/// Partitions items into day buckets.
///
/// Buckets iterate in calendar order and keep arrival order inside.
pub fn group_by_date<I>(items: I) -> BTreeMap<NaiveDate, Vec<I::Item>>
where
    I: IntoIterator,
    I::Item: Dated,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<I::Item>> = BTreeMap::new();
    for item in items {
        buckets.entry(item.date()).or_default().push(item);
    }
    buckets
}

/// Computes the per-hour mode of `parameter` over one day of samples.
///
/// Hours are taken from each sample's wall-clock time localized in `tz`.
/// Only hours with at least one sample appear, in ascending order, so the
/// result never holds more than 24 points.
///
/// # Errors
///
/// Returns [`ReportError::InvalidArgument`] if the samples span more than
/// one calendar day.
pub fn hourly_mode(
    day_samples: &[SensorSample],
    parameter: Parameter,
    tz: Tz,
) -> Result<Vec<HourlyStatistic>, ReportError> {
    let Some(first) = day_samples.first() else {
        return Ok(Vec::new());
    };
    let day = first.date;

    if let Some(stray) = day_samples.iter().find(|s| s.date != day) {
        return Err(ReportError::invalid(format!(
            "hourly mode expects samples from a single day, got {} and {}",
            day, stray.date
        )));
    }

    let mut by_hour: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for sample in day_samples {
        let hour = localize(tz, sample.datetime()).hour();
        by_hour
            .entry(hour)
            .or_default()
            .push(parameter.value_of(sample));
    }

    Ok(by_hour
        .into_iter()
        .filter_map(|(hour, values)| {
            let value = mode(values)?;
            Some(HourlyStatistic {
                hour,
                timestamp: start_of_hour(tz, day, hour)?.fixed_offset(),
                value,
            })
        })
        .collect())
}
