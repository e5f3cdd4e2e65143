//! Supported regions of interest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::ConfigurationError;

/// A region the analysis pipeline knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    California,
}

impl Region {
    /// All supported regions.
    pub const ALL: [Region; 1] = [Region::California];

    /// Identifier used in routes and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            Region::California => "california",
        }
    }

    /// Human readable name shown on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::California => "Greater California Area",
        }
    }

    /// Region of interest used for both the catalog search and the spatial slice.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Region::California => BoundingBox::new(-124.48, 32.53, -114.13, 42.01),
        }
    }
}

impl FromStr for Region {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigurationError::UnknownRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("California".parse::<Region>().unwrap(), Region::California);
        assert_eq!(" california ".parse::<Region>().unwrap(), Region::California);
    }

    #[test]
    fn test_unknown_region() {
        let err = "atlantis".parse::<Region>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownRegion("atlantis".to_string()));
    }
}
