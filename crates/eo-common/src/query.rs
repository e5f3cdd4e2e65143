//! Query planning: turns a region name into an immutable query descriptor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::ConfigurationError;
use crate::region::Region;

/// OMI/Aura Level-3 daily gridded NO2 product.
pub const OMNO2D_SHORT_NAME: &str = "OMNO2d";
pub const OMNO2D_VERSION: &str = "003";

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigurationError> {
        if start > end {
            return Err(ConfigurationError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Temporal filter in the `start,end` ISO-8601 form catalog APIs expect.
    pub fn to_temporal_param(&self) -> String {
        format!(
            "{}T00:00:00Z,{}T23:59:59Z",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"),
            end: NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date"),
        }
    }
}

/// Spatial/temporal query for one region. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    region: Region,
    bounding_box: BoundingBox,
    date_range: DateRange,
    product_id: String,
    product_version: String,
}

impl QueryDescriptor {
    pub fn region(&self) -> Region {
        self.region
    }

    pub fn region_name(&self) -> &'static str {
        self.region.display_name()
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn product_version(&self) -> &str {
        &self.product_version
    }
}

/// Builds [`QueryDescriptor`]s. Pure: no I/O, no clock.
#[derive(Debug, Clone, Default)]
pub struct QueryPlanner {
    date_range: DateRange,
}

impl QueryPlanner {
    pub fn new(date_range: DateRange) -> Self {
        Self { date_range }
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    /// Plan the query for `region_name`.
    ///
    /// Unknown regions are configuration faults and are returned as
    /// [`ConfigurationError::UnknownRegion`].
    pub fn plan(&self, region_name: &str) -> Result<QueryDescriptor, ConfigurationError> {
        let region: Region = region_name.parse()?;
        Ok(self.plan_region(region))
    }

    /// Plan the query for an already-validated region.
    pub fn plan_region(&self, region: Region) -> QueryDescriptor {
        QueryDescriptor {
            region,
            bounding_box: region.bounding_box(),
            date_range: self.date_range,
            product_id: OMNO2D_SHORT_NAME.to_string(),
            product_version: OMNO2D_VERSION.to_string(),
        }
    }
}
