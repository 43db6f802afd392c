//! Numeric formatting utilities.
//!
//! Provides the rounding rule shared by every wire-facing number in a quote.

/// Rounds a value to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
	(value * 100.0).round() / 100.0
}
