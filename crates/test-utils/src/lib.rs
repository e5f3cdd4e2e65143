//! Shared test helpers for the NO2 dashboard workspace.
//!
//! Provides synthetic grid generators, region and grid fixtures, test data
//! lookup, and float assertions sized for column densities around 1e15.
//!
//! ```ignore
//! use test_utils::{require_test_file, fixtures::bbox};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Skip the test when an optional granule file is not available.
///
/// Real OMNO2d granules are large and require an Earthdata login, so they
/// are never checked in. Place them under `TEST_DATA_DIR` to enable these tests.
///
/// ```ignore
/// let path = require_test_file!("OMI-Aura_L3-OMNO2d_2025m0901_v003.he5");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: Test file '{}' not found. Set TEST_DATA_DIR to a directory of granules.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Absolute tolerance float comparison.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Relative tolerance float comparison, for values far from 1.0.
///
/// ```ignore
/// assert_rel_eq!(4.2e15, 4.2000001e15, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_rel_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let tolerance: f64 = $tolerance as f64;
        let scale = left.abs().max(right.abs()).max(f64::MIN_POSITIVE);
        let rel = (left - right).abs() / scale;
        if !(rel <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n   rel: `{:?}` > tolerance `{:?}`",
                left, right, rel, tolerance
            );
        }
    }};
}
