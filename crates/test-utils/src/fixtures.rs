//! Common test fixtures for the NO2 analysis tests.

/// Bounding boxes as `(min_lon, min_lat, max_lon, max_lat)`.
pub mod bbox {
    /// California region of interest used by the dashboard.
    pub const CALIFORNIA: (f64, f64, f64, f64) = (-124.48, 32.53, -114.13, 42.01);

    /// Global bounding box.
    pub const GLOBAL: (f64, f64, f64, f64) = (-180.0, -90.0, 180.0, 90.0);

    /// Inside the small test grid below.
    pub const SMALL_INNER: (f64, f64, f64, f64) = (-2.2, -1.8, 1.9, 2.1);

    /// Nowhere near the small test grid.
    pub const FAR_AWAY: (f64, f64, f64, f64) = (100.0, 60.0, 110.0, 70.0);
}

/// Grid geometries as plain numbers (origin, step, count per axis).
pub mod grid {
    /// Regular grid of cell centres.
    #[derive(Debug, Clone, Copy)]
    pub struct GridFixture {
        pub lat_origin: f64,
        pub lon_origin: f64,
        pub step: f64,
        pub n_lat: usize,
        pub n_lon: usize,
    }

    impl GridFixture {
        /// Total number of points in one time step.
        pub fn size(&self) -> usize {
            self.n_lat * self.n_lon
        }

        pub fn latitudes(&self) -> Vec<f64> {
            (0..self.n_lat)
                .map(|i| self.lat_origin + i as f64 * self.step)
                .collect()
        }

        pub fn longitudes(&self) -> Vec<f64> {
            (0..self.n_lon)
                .map(|j| self.lon_origin + j as f64 * self.step)
                .collect()
        }
    }

    /// OMI Level-3 global 0.25° grid.
    pub const OMI_GLOBAL: GridFixture = GridFixture {
        lat_origin: -89.875,
        lon_origin: -179.875,
        step: 0.25,
        n_lat: 720,
        n_lon: 1440,
    };

    /// 1° grid centred on the origin, 11 × 11 points from -5 to 5.
    pub const SMALL_11X11: GridFixture = GridFixture {
        lat_origin: -5.0,
        lon_origin: -5.0,
        step: 1.0,
        n_lat: 11,
        n_lon: 11,
    };
}

/// Values taken from real OMNO2d granules.
pub mod omno2d {
    /// `_FillValue` of `ColumnAmountNO2Trop`.
    pub const FILL_VALUE: f64 = -1.2676506002282294e30;

    /// Typical tropospheric column over a polluted basin (molecules/cm²).
    pub const URBAN_COLUMN: f64 = 4.2e15;

    /// Sample granule name for optional real-data tests.
    pub const SAMPLE_GRANULE: &str = "OMI-Aura_L3-OMNO2d_2025m0901_v003.he5";
}
