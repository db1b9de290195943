//! Sensor readings as delivered by the remote sensor endpoint.

use alloc::string::{String, ToString};
use core::fmt;

use crate::ERROR_SENTINEL;

/// One of the four vital signs reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    BloodPressure,
    OxygenSaturation,
    HeartRate,
    Glucose,
}

impl Metric {
    /// All metrics, in display order.
    pub const ALL: [Metric; 4] = [
        Metric::BloodPressure,
        Metric::OxygenSaturation,
        Metric::HeartRate,
        Metric::Glucose,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::BloodPressure => "Blood Pressure",
            Metric::OxygenSaturation => "Oxygen Saturation",
            Metric::HeartRate => "Heart Rate",
            Metric::Glucose => "Glucose",
        }
    }

    /// Unit the sensor reports the metric in.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::BloodPressure => "mmHg",
            Metric::OxygenSaturation => "%",
            Metric::HeartRate => "bpm",
            Metric::Glucose => "mg/dL",
        }
    }

    /// Text shown in place of a missing value.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Metric::BloodPressure => "-- mmHg",
            Metric::OxygenSaturation => "-- %",
            Metric::HeartRate => "-- bpm",
            Metric::Glucose => "-- mg/dL",
        }
    }

    /// Field name in the sensor's JSON payload.
    pub fn field_name(&self) -> &'static str {
        match self {
            Metric::BloodPressure => "bloodPressure",
            Metric::OxygenSaturation => "oxygenSaturation",
            Metric::HeartRate => "heartRate",
            Metric::Glucose => "glucose",
        }
    }
}

/// A single field value as it appears on the wire.
///
/// The sensor sends blood pressure as a `"S/D"` string and the other
/// metrics as numbers, but nothing stops it (or the error sentinel) from
/// sending a string anywhere.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Read the value as a number.
    ///
    /// Strings are trimmed and parsed. Returns `None` for anything that is
    /// not a finite-or-infinite number (empty text, `"Error"`, NaN).
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            MetricValue::Number(n) => *n,
            MetricValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        if n.is_nan() {
            None
        } else {
            Some(n)
        }
    }

    /// Returns the text if this is a string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetricValue::Text(s) => Some(s),
            MetricValue::Number(_) => None,
        }
    }

    /// True for values that carry no displayable content: `0`, NaN and the
    /// empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            MetricValue::Number(n) => *n == 0.0 || n.is_nan(),
            MetricValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

/// One snapshot of the four vital signs.
///
/// Every field is optional: an absent field is displayed as a placeholder
/// and can never be in range.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SensorReading {
    /// Blood pressure, normally `"systolic/diastolic"`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub blood_pressure: Option<MetricValue>,

    /// Oxygen saturation in percent.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub oxygen_saturation: Option<MetricValue>,

    /// Heart rate in beats per minute.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub heart_rate: Option<MetricValue>,

    /// Blood glucose in mg/dL.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub glucose: Option<MetricValue>,
}

impl SensorReading {
    /// Create a fully populated reading.
    pub fn new(
        blood_pressure: impl Into<MetricValue>,
        oxygen_saturation: impl Into<MetricValue>,
        heart_rate: impl Into<MetricValue>,
        glucose: impl Into<MetricValue>,
    ) -> Self {
        Self {
            blood_pressure: Some(blood_pressure.into()),
            oxygen_saturation: Some(oxygen_saturation.into()),
            heart_rate: Some(heart_rate.into()),
            glucose: Some(glucose.into()),
        }
    }

    /// The reading substituted when the sensor cannot be read: every field
    /// holds the literal `"Error"`.
    pub fn error_sentinel() -> Self {
        Self::new(ERROR_SENTINEL, ERROR_SENTINEL, ERROR_SENTINEL, ERROR_SENTINEL)
    }

    /// True if every field holds the error sentinel.
    pub fn is_error_sentinel(&self) -> bool {
        Metric::ALL
            .iter()
            .all(|m| self.get(*m).and_then(MetricValue::as_text) == Some(ERROR_SENTINEL))
    }

    /// Value of a single metric.
    pub fn get(&self, metric: Metric) -> Option<&MetricValue> {
        match metric {
            Metric::BloodPressure => self.blood_pressure.as_ref(),
            Metric::OxygenSaturation => self.oxygen_saturation.as_ref(),
            Metric::HeartRate => self.heart_rate.as_ref(),
            Metric::Glucose => self.glucose.as_ref(),
        }
    }

    /// Check the reading has the shape the sensor promises: blood pressure
    /// present as `systolic/diastolic` text.
    ///
    /// Decoders reject readings that fail this check, so a reply without a
    /// text blood pressure ends up as the error sentinel.
    pub fn check_shape(&self) -> Result<(), &'static str> {
        match self.blood_pressure {
            Some(MetricValue::Text(_)) => Ok(()),
            Some(MetricValue::Number(_)) => Err("bloodPressure is not text"),
            None => Err("bloodPressure is missing"),
        }
    }

    /// Split the blood pressure into systolic and diastolic numbers.
    ///
    /// The text is split on `/` and the first two parts are parsed. A part
    /// that is missing or not numeric comes back as `None`. A numeric field
    /// has no `/`, so it only ever yields a systolic value.
    pub fn blood_pressure_parts(&self) -> (Option<f64>, Option<f64>) {
        match &self.blood_pressure {
            Some(MetricValue::Text(s)) => {
                let mut parts = s.split('/');
                let systolic = parts.next().and_then(parse_part);
                let diastolic = parts.next().and_then(parse_part);
                (systolic, diastolic)
            }
            Some(value @ MetricValue::Number(_)) => (value.as_number(), None),
            None => (None, None),
        }
    }
}

fn parse_part(part: &str) -> Option<f64> {
    part.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}
