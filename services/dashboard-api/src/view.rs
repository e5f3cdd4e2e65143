//! Dashboard presentation of an analysis result.

use eo_common::AggregationResult;
use pipeline::RiskAssessment;
use serde::Serialize;

const LIVE_RECOMMENDATIONS: [&str; 3] = [
    "Implement dynamic traffic metering to reduce localized NO2 spikes.",
    "Promote public transport usage during peak NO2 hours.",
    "Review industrial emission standards in areas with peak NO2 readings.",
];

const SIMULATED_RECOMMENDATIONS: [&str; 3] = [
    "Treat these figures as illustrative: live satellite retrieval was unavailable.",
    "Implement a 'Cool Pavement' pilot program near major transport hubs.",
    "Expand tree canopy along freight corridors to buffer traffic emissions.",
];

/// One row of the metrics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub interpretation: String,
}

/// Everything the California page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub region_name: String,
    pub analysis_date: String,
    pub summary: String,
    pub metrics: Vec<MetricView>,
    pub recommendations: Vec<String>,
    pub is_live_data: bool,
    pub risk_level: String,
    pub risk_color_hex: String,
}

impl DashboardView {
    pub fn from_result(result: &AggregationResult) -> Self {
        let risk = RiskAssessment::assess(result.value);
        let formatted = result.formatted_value();

        let (region_suffix, summary, interpretation, source, recommendations) =
            if result.is_simulated {
                (
                    "(Simulated)",
                    format!(
                        "Live Earthdata retrieval was unavailable, so this page shows simulated values. The simulated average Tropospheric NO2 is **{} {}**.",
                        formatted, result.unit
                    ),
                    "Simulated high NO2 concentration reflecting heavy urban activity and traffic."
                        .to_string(),
                    MetricView {
                        name: "Data Source".to_string(),
                        value: "Simulated".to_string(),
                        unit: "Fallback".to_string(),
                        interpretation: "Live satellite data could not be retrieved for this request."
                            .to_string(),
                    },
                    &SIMULATED_RECOMMENDATIONS,
                )
            } else {
                (
                    "(Live Earthdata)",
                    format!(
                        "Live analysis confirms **{}** air quality risk. Based on OMI data, the average Tropospheric NO2 in the region is **{} {}**.",
                        risk.level.label(),
                        formatted,
                        result.unit
                    ),
                    risk.interpretation.clone(),
                    MetricView {
                        name: "Data Source".to_string(),
                        value: "NASA OMI/Aura".to_string(),
                        unit: "Satellite".to_string(),
                        interpretation:
                            "Analysis using actual satellite data for the specified period."
                                .to_string(),
                    },
                    &LIVE_RECOMMENDATIONS,
                )
            };

        Self {
            region_name: format!("{} {}", result.region_name, region_suffix),
            analysis_date: result.analysis_date.clone(),
            summary,
            metrics: vec![
                MetricView {
                    name: result.metric_name.clone(),
                    value: formatted,
                    unit: result.unit.clone(),
                    interpretation,
                },
                source,
            ],
            recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
            is_live_data: !result.is_simulated,
            risk_level: risk.level.label().to_string(),
            risk_color_hex: risk.color.to_string(),
        }
    }
}
