//! Quote request types.
//!
//! Defines the incoming request format for delivery quotes. Field defaults
//! match what the ordering system sends when a value is absent, so a bare
//! coordinate pair is already a complete request.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A request for a delivery quote.
///
/// Coordinates are required; every other field has a default. No range
/// validation is applied to the coordinates, matching the rest of the
/// pipeline which lets out-of-range values flow through the arithmetic.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryRequest {
	/// Delivery latitude in decimal degrees.
	pub latitude: f64,
	/// Delivery longitude in decimal degrees.
	pub longitude: f64,
	/// Municipality of the delivery address.
	#[serde(default)]
	pub municipality: String,
	/// Barangay of the delivery address.
	#[serde(default)]
	pub barangay: String,
	/// Postal code of the delivery address.
	#[serde(default)]
	pub postal_code: String,
	/// Hour of day the order was placed (0-23). Defaults to noon.
	#[serde(default = "default_time_of_order")]
	pub time_of_order: u32,
	/// Day of week the order was placed (0 = Monday, 6 = Sunday).
	#[serde(default)]
	pub day_of_week: u32,
	/// Number of items in the order.
	#[serde(default = "default_order_size")]
	pub order_size: u32,
	/// Directory holding the model artifacts. Falls back to the configured
	/// default when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model_dir: Option<String>,
	/// When the order was placed, as an ISO-8601 timestamp.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub order_datetime: Option<String>,
}

/// Returns the default order hour.
///
/// Noon is assumed when the caller does not say when the order was placed.
fn default_time_of_order() -> u32 {
	12
}

/// Returns the default order size.
fn default_order_size() -> u32 {
	1
}

impl DeliveryRequest {
	/// Resolves the order timestamp used for delivery window calculations.
	///
	/// An absent or unparseable `order_datetime` falls back to the current
	/// local time rather than failing the request.
	pub fn order_timestamp(&self) -> NaiveDateTime {
		self.order_datetime
			.as_deref()
			.and_then(parse_order_datetime)
			.unwrap_or_else(|| Local::now().naive_local())
	}
}

/// Parses an ISO-8601 timestamp in any of the shapes the ordering system
/// produces.
///
/// Offset-qualified timestamps keep their written clock time; the offset is
/// dropped, not converted. A bare date reads as midnight.
pub fn parse_order_datetime(raw: &str) -> Option<NaiveDateTime> {
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.naive_local());
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
		return Some(dt);
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
		return Some(dt);
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
		return Some(dt);
	}
	if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
		return Some(dt);
	}
	NaiveDate::parse_from_str(raw, "%Y-%m-%d")
		.ok()
		.and_then(|d| d.and_hms_opt(0, 0, 0))
}
