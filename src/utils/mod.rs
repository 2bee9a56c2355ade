//! Utility functions shared across the crate

pub mod logging;

/// Round to two decimal places, exact ties to the even digit
///
/// Works on the exact decimal expansion of `value`, so `0.125` becomes
/// `0.12` while `1.005` (stored as `1.00499...`) becomes `1.0`.
#[must_use]
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
