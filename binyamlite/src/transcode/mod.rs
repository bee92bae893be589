//! Transcoding yamlite values into formats that need third-party libraries.
//!
//! yamlite numbers are always `f64`. The target formats distinguish integers
//! from floats, so integral numbers within the range an `f64` represents
//! exactly are written as integers and everything else as floats.

pub mod cbor;
pub mod toml;
pub mod yaml;

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Returns the number as an `i64` when it is integral and exactly representable.
fn integral(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}
