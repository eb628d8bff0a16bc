use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ReportError;
use crate::report::types::SensorSample;

/// A charted sensor parameter.
///
/// | Key       | Label       | Unit | Axis max |
/// |-----------|-------------|------|----------|
/// | `temp`    | Temperature | °C   | 125      |
/// | `ph`      | pH          | pH   | 14       |
/// | `tds`     | TDS         | ppm  | 1000     |
/// | `waterLv` | Water Level | %    | 100      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Parameter {
    #[serde(rename = "temp")]
    Temp,
    #[serde(rename = "ph")]
    Ph,
    #[serde(rename = "tds")]
    Tds,
    #[serde(rename = "waterLv")]
    WaterLevel,
}

impl Parameter {
    pub const ALL: [Parameter; 4] = [
        Parameter::Temp,
        Parameter::Ph,
        Parameter::Tds,
        Parameter::WaterLevel,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Temp => "temp",
            Parameter::Ph => "ph",
            Parameter::Tds => "tds",
            Parameter::WaterLevel => "waterLv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Temp => "Temperature",
            Parameter::Ph => "pH",
            Parameter::Tds => "TDS",
            Parameter::WaterLevel => "Water Level",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Temp => "°C",
            Parameter::Ph => "pH",
            Parameter::Tds => "ppm",
            Parameter::WaterLevel => "%",
        }
    }

    pub fn axis_max(&self) -> f64 {
        match self {
            Parameter::Temp => 125.0,
            Parameter::Ph => 14.0,
            Parameter::Tds => 1000.0,
            Parameter::WaterLevel => 100.0,
        }
    }

    /// Reads this parameter's value off a sample.
    pub fn value_of(&self, sample: &SensorSample) -> f64 {
        match self {
            Parameter::Temp => sample.temp,
            Parameter::Ph => sample.ph,
            Parameter::Tds => sample.tds,
            Parameter::WaterLevel => sample.water_level,
        }
    }
}

impl FromStr for Parameter {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| {
                ReportError::invalid(format!(
                    "unknown parameter '{s}', expected one of temp, ph, tds, waterLv"
                ))
            })
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
