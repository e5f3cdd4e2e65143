//! Air quality risk classification of a tropospheric NO2 column.

use serde::Serialize;

/// High-risk threshold in molecules/cm² (1.6e-9 mol/cm²).
pub const NO2_RISK_THRESHOLD: f64 = 9.6e14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "HIGH RISK")]
    High,
    #[serde(rename = "LOW/MODERATE RISK")]
    LowModerate,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH RISK",
            RiskLevel::LowModerate => "LOW/MODERATE RISK",
        }
    }

    /// Display color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::High => "#DC2626",
            RiskLevel::LowModerate => "#059669",
        }
    }
}

/// Risk level plus a sentence explaining it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub color: &'static str,
    pub interpretation: String,
}

impl RiskAssessment {
    pub fn assess(value: f64) -> Self {
        let formatted = format!("{:.2e}", value);
        let (level, interpretation) = if value >= NO2_RISK_THRESHOLD {
            (
                RiskLevel::High,
                format!(
                    "HIGH RISK: Concentration ({}) exceeds the threshold ({:.2e}), suggesting severe air quality stress from pollution.",
                    formatted, NO2_RISK_THRESHOLD
                ),
            )
        } else {
            (
                RiskLevel::LowModerate,
                format!(
                    "LOW/MODERATE RISK: Concentration ({}) is below the threshold, suggesting acceptable air quality for the period.",
                    formatted
                ),
            )
        };

        Self {
            level,
            color: level.color(),
            interpretation,
        }
    }
}
