//! Normal-range configuration for vital signs.

use core::fmt;

/// Inclusive `[min, max]` bounds for a single metric.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Create new bounds.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check whether `value` lies inside the bounds (both ends inclusive).
    ///
    /// NaN is never inside.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Normal ranges for every checked quantity.
///
/// Blood pressure is checked as two separate quantities, systolic and
/// diastolic.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalRanges {
    pub systolic: Bounds,
    pub diastolic: Bounds,
    pub oxygen_saturation: Bounds,
    pub heart_rate: Bounds,
    pub glucose: Bounds,
}

impl Default for NormalRanges {
    fn default() -> Self {
        Self {
            systolic: Bounds::new(90.0, 120.0),
            diastolic: Bounds::new(60.0, 80.0),
            oxygen_saturation: Bounds::new(95.0, 100.0),
            heart_rate: Bounds::new(60.0, 100.0),
            glucose: Bounds::new(70.0, 140.0),
        }
    }
}

impl NormalRanges {
    /// Named view of every bound, in check order.
    pub fn entries(&self) -> [(&'static str, Bounds); 5] {
        [
            ("systolic", self.systolic),
            ("diastolic", self.diastolic),
            ("oxygen_saturation", self.oxygen_saturation),
            ("heart_rate", self.heart_rate),
            ("glucose", self.glucose),
        ]
    }

    /// Check that every range is well-formed (`min <= max`, no NaN).
    pub fn validate(&self) -> Result<(), InvalidRange> {
        for (name, bounds) in self.entries() {
            if !(bounds.min <= bounds.max) {
                return Err(InvalidRange { name, bounds });
            }
        }
        Ok(())
    }
}

/// A configured range whose minimum exceeds its maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidRange {
    pub name: &'static str,
    pub bounds: Bounds,
}

impl fmt::Display for InvalidRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid range for {}: min {} is greater than max {}",
            self.name, self.bounds.min, self.bounds.max
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidRange {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive() {
        let bounds = Bounds::new(60.0, 100.0);
        assert!(bounds.contains(60.0));
        assert!(bounds.contains(100.0));
        assert!(bounds.contains(72.0));
        assert!(!bounds.contains(59.9));
        assert!(!bounds.contains(100.1));
        assert!(!bounds.contains(f64::NAN));
    }

    #[test]
    fn test_default_ranges() {
        let ranges = NormalRanges::default();
        assert_eq!(ranges.systolic, Bounds::new(90.0, 120.0));
        assert_eq!(ranges.diastolic, Bounds::new(60.0, 80.0));
        assert_eq!(ranges.oxygen_saturation, Bounds::new(95.0, 100.0));
        assert_eq!(ranges.heart_rate, Bounds::new(60.0, 100.0));
        assert_eq!(ranges.glucose, Bounds::new(70.0, 140.0));
        assert!(ranges.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let ranges = NormalRanges {
            glucose: Bounds::new(140.0, 70.0),
            ..Default::default()
        };
        let err = ranges.validate().unwrap_err();
        assert_eq!(err.name, "glucose");
        assert!(err.to_string().contains("glucose"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_ranges() {
        let ranges: NormalRanges =
            serde_json::from_str(r#"{"heart_rate": {"min": 50, "max": 110}}"#).unwrap();
        assert_eq!(ranges.heart_rate, Bounds::new(50.0, 110.0));
        assert_eq!(ranges.glucose, Bounds::new(70.0, 140.0));
    }
}
