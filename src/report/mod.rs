//! Sensor history aggregation for the report view.
//!
//! This module groups raw sensor samples and actuator events by day, pages
//! through a rolling 7-day window, and reduces each hour of sensor data to
//! its mode so a day can be charted as three synchronized series.

pub mod aggregate;
pub mod parameter;
pub mod series;
pub mod types;
pub mod utility;
pub mod window;

pub use aggregate::{group_by_date, hourly_mode};
pub use parameter::Parameter;
pub use series::{ChartData, ChartPoint, ChartValue, build_report_series};
pub use types::{
    Dated, FeedEvent, HourlyStatistic, LightEvent, LightStatus, ReportPayload, ReportSeries,
    SensorSample, WaterQuality,
};
pub use window::{WINDOW_DAYS, recent_days, resolve_day, select_day_window};
