//! Data types used by the report pipeline.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::report::parameter::Parameter;

/// Anything that carries a calendar day, so grouping and windowing can be
/// written once for sensor samples and actuator events alike.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl<T: Dated + ?Sized> Dated for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }
}

/// Water quality tag the backend attaches to each sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaterQuality {
    Green,
    Orange,
    Red,
}

/// A single sensor reading from the report history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSample {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub temp: f64,
    pub ph: f64,
    pub tds: f64,
    pub water_level: f64,
    pub quality: Option<WaterQuality>,
}

impl SensorSample {
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

impl Dated for SensorSample {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LightStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl LightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightStatus::On => "ON",
            LightStatus::Off => "OFF",
        }
    }
}

/// A light switch record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightEvent {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: LightStatus,
}

impl Dated for LightEvent {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A feed trigger record. Feeding has no OFF state, so every event plots as ON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEvent {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub data: Option<String>,
}

impl Dated for FeedEvent {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Validated body of the backend report endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportPayload {
    pub sensor: Vec<SensorSample>,
    pub light: Vec<LightEvent>,
    pub feed: Vec<FeedEvent>,
}

/// Mode of one parameter over the samples of a single hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyStatistic {
    pub hour: u32,
    /// Start of `hour` on the sample day, in the reference timezone.
    pub timestamp: DateTime<FixedOffset>,
    pub value: f64,
}

/// Three synchronized series for one day of the report window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSeries {
    pub resolved_date: NaiveDate,
    pub parameter: Parameter,
    pub sensor_series: Vec<HourlyStatistic>,
    pub light_series: Vec<LightEvent>,
    pub feed_series: Vec<FeedEvent>,
}

impl ReportSeries {
    /// `true` when the selected day has no sensor data to chart.
    pub fn is_empty(&self) -> bool {
        self.sensor_series.is_empty()
    }
}
