//! Normal-range evaluation of sensor readings.
//!
//! A reading is normal only if every checked quantity lies inside its
//! inclusive bounds. Anything that cannot be read as a number (an absent
//! field, the `"Error"` sentinel, a blood pressure without `/`) is
//! unreadable, and an unreadable quantity is never in range.

use serde::Serialize;
use vitalwatch_types::{Bounds, Metric, NormalRanges, SensorReading};

/// Normal/abnormal classification of a whole reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Normal,
    Abnormal,
}

impl Verdict {
    pub fn is_normal(&self) -> bool {
        matches!(self, Verdict::Normal)
    }

    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Verdict::Normal => "NORMAL",
            Verdict::Abnormal => "ABNORMAL",
        }
    }
}

impl From<bool> for Verdict {
    fn from(normal: bool) -> Self {
        if normal {
            Verdict::Normal
        } else {
            Verdict::Abnormal
        }
    }
}

/// A single range-checked quantity. Blood pressure contributes two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Systolic,
    Diastolic,
    OxygenSaturation,
    HeartRate,
    Glucose,
}

impl Quantity {
    pub const ALL: [Quantity; 5] = [
        Quantity::Systolic,
        Quantity::Diastolic,
        Quantity::OxygenSaturation,
        Quantity::HeartRate,
        Quantity::Glucose,
    ];

    /// The sensor field this quantity is read from.
    pub fn metric(&self) -> Metric {
        match self {
            Quantity::Systolic | Quantity::Diastolic => Metric::BloodPressure,
            Quantity::OxygenSaturation => Metric::OxygenSaturation,
            Quantity::HeartRate => Metric::HeartRate,
            Quantity::Glucose => Metric::Glucose,
        }
    }

    pub fn bounds(&self, ranges: &NormalRanges) -> Bounds {
        match self {
            Quantity::Systolic => ranges.systolic,
            Quantity::Diastolic => ranges.diastolic,
            Quantity::OxygenSaturation => ranges.oxygen_saturation,
            Quantity::HeartRate => ranges.heart_rate,
            Quantity::Glucose => ranges.glucose,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Systolic => "Systolic",
            Quantity::Diastolic => "Diastolic",
            Quantity::OxygenSaturation => "SpO2",
            Quantity::HeartRate => "Heart Rate",
            Quantity::Glucose => "Glucose",
        }
    }
}

/// Outcome of checking one quantity, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    InRange,
    Unreadable,
    OutOfRange,
}

/// Result of checking one quantity against its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricCheck {
    pub quantity: Quantity,
    pub value: Option<f64>,
    pub bounds: Bounds,
    pub status: CheckStatus,
}

impl MetricCheck {
    fn new(quantity: Quantity, value: Option<f64>, ranges: &NormalRanges) -> Self {
        let bounds = quantity.bounds(ranges);
        let status = match value {
            Some(v) if bounds.contains(v) => CheckStatus::InRange,
            Some(_) => CheckStatus::OutOfRange,
            None => CheckStatus::Unreadable,
        };
        Self {
            quantity,
            value,
            bounds,
            status,
        }
    }

    pub fn in_range(&self) -> bool {
        self.status == CheckStatus::InRange
    }
}

/// Every check performed for one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub checks: [MetricCheck; 5],
}

impl Assessment {
    /// Normal iff every quantity is in range.
    pub fn verdict(&self) -> Verdict {
        Verdict::from(self.checks.iter().all(MetricCheck::in_range))
    }

    pub fn check(&self, quantity: Quantity) -> &MetricCheck {
        // `checks` is laid out in `Quantity::ALL` order
        &self.checks[quantity as usize]
    }

    /// Worst status among the quantities read from `metric`.
    pub fn metric_status(&self, metric: Metric) -> CheckStatus {
        self.checks
            .iter()
            .filter(|c| c.quantity.metric() == metric)
            .map(|c| c.status)
            .max()
            .unwrap_or(CheckStatus::Unreadable)
    }
}

/// Check every quantity of `reading` against `ranges`.
pub fn assess(reading: &SensorReading, ranges: &NormalRanges) -> Assessment {
    let (systolic, diastolic) = reading.blood_pressure_parts();
    let number = |metric: Metric| reading.get(metric).and_then(|v| v.as_number());

    Assessment {
        checks: [
            MetricCheck::new(Quantity::Systolic, systolic, ranges),
            MetricCheck::new(Quantity::Diastolic, diastolic, ranges),
            MetricCheck::new(
                Quantity::OxygenSaturation,
                number(Metric::OxygenSaturation),
                ranges,
            ),
            MetricCheck::new(Quantity::HeartRate, number(Metric::HeartRate), ranges),
            MetricCheck::new(Quantity::Glucose, number(Metric::Glucose), ranges),
        ],
    }
}

/// True iff every quantity of `reading` lies within `ranges`.
pub fn is_normal(reading: &SensorReading, ranges: &NormalRanges) -> bool {
    assess(reading, ranges).verdict().is_normal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_reading() -> SensorReading {
        SensorReading::new("120/80", 98.0, 70.0, 90.0)
    }

    #[test]
    fn test_reference_reading_is_normal() {
        let ranges = NormalRanges::default();
        assert!(is_normal(&normal_reading(), &ranges));
        assert_eq!(assess(&normal_reading(), &ranges).verdict(), Verdict::Normal);
    }

    #[test]
    fn test_values_strictly_inside_ranges_are_normal() {
        let ranges = NormalRanges::default();
        for (bp, spo2, hr, glucose) in [
            ("91/61", 96.0, 61.0, 71.0),
            ("105/70", 97.5, 80.0, 100.0),
            ("119/79", 99.0, 99.0, 139.0),
        ] {
            let reading = SensorReading::new(bp, spo2, hr, glucose);
            assert!(is_normal(&reading, &ranges), "{:?}", reading);
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let ranges = NormalRanges::default();
        assert!(is_normal(&SensorReading::new("90/60", 95.0, 60.0, 70.0), &ranges));
        assert!(is_normal(&SensorReading::new("120/80", 100.0, 100.0, 140.0), &ranges));
    }

    #[test]
    fn test_any_metric_out_of_range_is_abnormal() {
        let ranges = NormalRanges::default();
        let cases = [
            SensorReading::new("120/80", 98.0, 150.0, 90.0),
            SensorReading::new("140/80", 98.0, 70.0, 90.0),
            SensorReading::new("120/95", 98.0, 70.0, 90.0),
            SensorReading::new("120/80", 90.0, 70.0, 90.0),
            SensorReading::new("120/80", 98.0, 70.0, 200.0),
            SensorReading::new("80/50", 98.0, 70.0, 90.0),
        ];
        for reading in cases {
            assert!(!is_normal(&reading, &ranges), "{:?}", reading);
        }
    }

    #[test]
    fn test_high_blood_pressure_flags_both_parts() {
        let assessment = assess(
            &SensorReading::new("140/95", 98.0, 70.0, 90.0),
            &NormalRanges::default(),
        );
        assert_eq!(assessment.verdict(), Verdict::Abnormal);
        assert_eq!(assessment.check(Quantity::Systolic).status, CheckStatus::OutOfRange);
        assert_eq!(assessment.check(Quantity::Diastolic).status, CheckStatus::OutOfRange);
        assert_eq!(assessment.check(Quantity::HeartRate).status, CheckStatus::InRange);
        assert_eq!(
            assessment.metric_status(Metric::BloodPressure),
            CheckStatus::OutOfRange
        );
        assert_eq!(assessment.metric_status(Metric::Glucose), CheckStatus::InRange);
    }

    #[test]
    fn test_error_sentinel_is_abnormal() {
        let assessment = assess(&SensorReading::error_sentinel(), &NormalRanges::default());
        assert_eq!(assessment.verdict(), Verdict::Abnormal);
        assert!(assessment
            .checks
            .iter()
            .all(|c| c.status == CheckStatus::Unreadable && c.value.is_none()));
    }

    #[test]
    fn test_malformed_blood_pressure_is_abnormal() {
        let ranges = NormalRanges::default();
        for bp in ["120", "120/", "abc/80", "/", ""] {
            let reading = SensorReading::new(bp, 98.0, 70.0, 90.0);
            assert!(!is_normal(&reading, &ranges), "{:?}", bp);
        }
    }

    #[test]
    fn test_numeric_strings_are_read_as_numbers() {
        let reading = SensorReading::new("120/80", "98", " 70 ", "90");
        assert!(is_normal(&reading, &NormalRanges::default()));
    }

    #[test]
    fn test_missing_field_is_abnormal() {
        let mut reading = normal_reading();
        reading.glucose = None;
        let assessment = assess(&reading, &NormalRanges::default());
        assert_eq!(assessment.verdict(), Verdict::Abnormal);
        assert_eq!(assessment.check(Quantity::Glucose).status, CheckStatus::Unreadable);
    }

    #[test]
    fn test_custom_ranges() {
        let ranges = NormalRanges {
            heart_rate: Bounds::new(40.0, 160.0),
            ..Default::default()
        };
        let reading = SensorReading::new("120/80", 98.0, 150.0, 90.0);
        assert!(is_normal(&reading, &ranges));
    }

    #[test]
    fn test_check_order_matches_quantity() {
        let assessment = assess(&normal_reading(), &NormalRanges::default());
        for quantity in Quantity::ALL {
            assert_eq!(assessment.check(quantity).quantity, quantity);
        }
    }
}
