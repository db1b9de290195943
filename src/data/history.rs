//! Historical values for sparklines.

use std::collections::{BTreeMap, VecDeque};

use super::assess::{Assessment, Quantity};

/// Maximum number of values kept per quantity.
const MAX_HISTORY_SIZE: usize = 60;

/// Recent readable values per quantity.
///
/// Unreadable checks are skipped, so an outage leaves a gap in time but not
/// in the series.
#[derive(Debug, Clone, Default)]
pub struct History {
    values: BTreeMap<Quantity, VecDeque<f64>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the values of an assessed reading.
    pub fn record(&mut self, assessment: &Assessment) {
        for check in &assessment.checks {
            let Some(value) = check.value else {
                continue;
            };
            let series = self.values.entry(check.quantity).or_default();
            series.push_back(value);
            if series.len() > MAX_HISTORY_SIZE {
                series.pop_front();
            }
        }
    }

    /// Values recorded for `quantity`, oldest first.
    pub fn values(&self, quantity: Quantity) -> impl Iterator<Item = f64> + '_ {
        self.values.get(&quantity).into_iter().flatten().copied()
    }

    pub fn len(&self, quantity: Quantity) -> usize {
        self.values.get(&quantity).map_or(0, VecDeque::len)
    }

    /// Sparkline levels for `quantity` (normalized to 0-7 for 8 bar levels).
    ///
    /// Returns an empty Vec if there's not enough history.
    pub fn sparkline(&self, quantity: Quantity) -> Vec<u8> {
        let Some(values) = self.values.get(&quantity) else {
            return Vec::new();
        };
        if values.len() < 2 {
            return Vec::new();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;

        values
            .iter()
            .map(|&v| {
                if range <= f64::EPSILON {
                    // flat series sits mid-height
                    return 3;
                }
                (((v - min) / range) * 7.0).round().clamp(0.0, 7.0) as u8
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::assess::assess;
    use vitalwatch_types::{NormalRanges, SensorReading};

    fn record(history: &mut History, bp: &str, hr: f64) {
        let reading = SensorReading::new(bp, 98.0, hr, 90.0);
        history.record(&assess(&reading, &NormalRanges::default()));
    }

    #[test]
    fn test_record_splits_blood_pressure() {
        let mut history = History::new();
        record(&mut history, "120/80", 70.0);

        assert_eq!(history.values(Quantity::Systolic).collect::<Vec<_>>(), vec![120.0]);
        assert_eq!(history.values(Quantity::Diastolic).collect::<Vec<_>>(), vec![80.0]);
        assert_eq!(history.len(Quantity::HeartRate), 1);
    }

    #[test]
    fn test_unreadable_values_are_skipped() {
        let mut history = History::new();
        record(&mut history, "120/80", 70.0);
        history.record(&assess(&SensorReading::error_sentinel(), &NormalRanges::default()));

        for quantity in Quantity::ALL {
            assert_eq!(history.len(quantity), 1);
        }
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new();
        for i in 0..(MAX_HISTORY_SIZE + 15) {
            record(&mut history, "120/80", i as f64);
        }

        assert_eq!(history.len(Quantity::HeartRate), MAX_HISTORY_SIZE);
        assert_eq!(history.values(Quantity::HeartRate).next(), Some(15.0));
    }

    #[test]
    fn test_sparkline_needs_two_values() {
        let mut history = History::new();
        assert!(history.sparkline(Quantity::HeartRate).is_empty());

        record(&mut history, "120/80", 70.0);
        assert!(history.sparkline(Quantity::HeartRate).is_empty());
    }

    #[test]
    fn test_sparkline_normalization() {
        let mut history = History::new();
        for hr in [60.0, 80.0, 100.0] {
            record(&mut history, "120/80", hr);
        }

        assert_eq!(history.sparkline(Quantity::HeartRate), vec![0, 4, 7]);
        // unchanged values
        assert_eq!(history.sparkline(Quantity::Glucose), vec![3, 3, 3]);
    }
}
