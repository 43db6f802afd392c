//! Shipping fee calculation.

use quoter_config::PricingConfig;
use quoter_types::round2;

/// Shipping fee for a predicted delivery time.
///
/// A flat base plus a per-minute rate, rounded to currency precision.
pub fn shipping_fee(delivery_time_minutes: f64, pricing: &PricingConfig) -> f64 {
	round2(pricing.base_fee + delivery_time_minutes * pricing.rate_per_minute)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fee_under_default_pricing() {
		let pricing = PricingConfig::default();

		// 50 + minutes * 0.5
		assert_eq!(shipping_fee(100.0, &pricing), 100.0);
		assert_eq!(shipping_fee(20.0, &pricing), 60.0);
		assert_eq!(shipping_fee(37.5, &pricing), 68.75);
	}

	#[test]
	fn test_fee_is_rounded_to_currency_precision() {
		let pricing = PricingConfig {
			base_fee: 50.0,
			rate_per_minute: 0.333,
		};

		assert_eq!(shipping_fee(100.0, &pricing), 83.3);
	}

	#[test]
	fn test_fee_with_custom_pricing() {
		let pricing = PricingConfig {
			base_fee: 0.0,
			rate_per_minute: 2.0,
		};

		assert_eq!(shipping_fee(45.0, &pricing), 90.0);
	}
}
