//! The aggregation result record handed to presentation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const NO2_METRIC_NAME: &str = "Average Tropospheric NO2";
pub const NO2_UNIT: &str = "molecules/cm²";

/// Map the column-density spellings found in granule metadata onto
/// [`NO2_UNIT`]. Unrecognised units are returned trimmed but otherwise as is.
///
/// ```
/// use eo_common::{canonical_no2_unit, NO2_UNIT};
/// assert_eq!(canonical_no2_unit("molec/cm2"), NO2_UNIT);
/// assert_eq!(canonical_no2_unit("DU"), "DU");
/// ```
pub fn canonical_no2_unit(raw: &str) -> String {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    match compact.as_str() {
        "molec/cm2" | "molec/cm^2" | "molec/cm²" | "moleccm-2" | "moleccm^-2"
        | "molecules/cm2" | "molecules/cm^2" | "molecules/cm²" | "moleculescm-2"
        | "moleculescm^-2" | "molecule/cm2" | "molecule/cm^2" | "moleculecm-2" => {
            NO2_UNIT.to_string()
        }
        _ => raw.trim().to_string(),
    }
}

const LIVE_MARKER: &str = "(Live)";
const SIMULATED_MARKER: &str = "(Simulated)";

/// One scalar summary for a region. Real and simulated results share this
/// exact shape; only `is_simulated` and the date marker differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub metric_name: String,
    pub value: f64,
    pub unit: String,
    /// `YYYY-MM-DD (Live)` or `YYYY-MM-DD (Simulated)`.
    pub analysis_date: String,
    pub is_simulated: bool,
    pub region_name: String,
}

impl AggregationResult {
    /// Result computed from real granules.
    pub fn live(
        region_name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            metric_name: NO2_METRIC_NAME.to_string(),
            value,
            unit: unit.into(),
            analysis_date: format!("{} {}", date.format("%Y-%m-%d"), LIVE_MARKER),
            is_simulated: false,
            region_name: region_name.into(),
        }
    }

    /// Synthetic stand-in result.
    pub fn simulated(
        region_name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            metric_name: NO2_METRIC_NAME.to_string(),
            value,
            unit: unit.into(),
            analysis_date: format!("{} {}", date.format("%Y-%m-%d"), SIMULATED_MARKER),
            is_simulated: true,
            region_name: region_name.into(),
        }
    }

    /// Value in the `1.23e15` notation used on the dashboard.
    pub fn formatted_value(&self) -> String {
        format!("{:.2e}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_simulated_marker() {
        let result = AggregationResult::simulated("Greater California Area", 5.5e15, NO2_UNIT, date());
        assert!(result.is_simulated);
        assert_eq!(result.analysis_date, "2026-10-16 (Simulated)");
    }

    #[test]
    fn test_live_marker() {
        let result = AggregationResult::live("Greater California Area", 1.2e15, NO2_UNIT, date());
        assert!(!result.is_simulated);
        assert_eq!(result.analysis_date, "2026-10-16 (Live)");
        assert_eq!(result.formatted_value(), "1.20e15");
    }

    #[test]
    fn test_column_density_spellings_share_one_unit() {
        for raw in [
            "molec/cm2",
            "molec/cm^2",
            "molecules/cm^2",
            "molecules cm-2",
            "Molec cm^-2",
            "molecules/cm²",
        ] {
            assert_eq!(canonical_no2_unit(raw), NO2_UNIT, "{}", raw);
        }
    }

    #[test]
    fn test_unknown_unit_is_kept() {
        assert_eq!(canonical_no2_unit("DU"), "DU");
        assert_eq!(canonical_no2_unit(" mol/m2 "), "mol/m2");
    }
}
