//! Simulated stand-in result.

use chrono::NaiveDate;
use eo_common::{AggregationResult, QueryDescriptor, NO2_UNIT};

/// Tropospheric NO2 column served when real data is unavailable
/// (molecules/cm²), typical of a heavily trafficked basin.
pub const SIMULATED_NO2_VALUE: f64 = 5.5e15;

/// Produces the clearly labelled simulated result. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct FallbackSupplier {
    value: f64,
}

impl Default for FallbackSupplier {
    fn default() -> Self {
        Self {
            value: SIMULATED_NO2_VALUE,
        }
    }
}

impl FallbackSupplier {
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn supply(&self, query: &QueryDescriptor, today: NaiveDate) -> AggregationResult {
        AggregationResult::simulated(query.region_name(), self.value, NO2_UNIT, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eo_common::{QueryPlanner, NO2_METRIC_NAME};

    #[test]
    fn test_simulated_result_is_labelled() {
        let query = QueryPlanner::default().plan("california").unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();

        let result = FallbackSupplier::default().supply(&query, today);

        assert!(result.is_simulated);
        assert_eq!(result.value, 5.5e15);
        assert_eq!(result.metric_name, NO2_METRIC_NAME);
        assert_eq!(result.unit, NO2_UNIT);
        assert_eq!(result.region_name, "Greater California Area");
        assert_eq!(result.analysis_date, "2025-10-02 (Simulated)");
        assert_eq!(result.formatted_value(), "5.50e15");
    }
}
