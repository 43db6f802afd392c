//! Delivery quote types and their wire format.
//!
//! The quote struct mirrors the JSON document downstream consumers were
//! built against; field order and key names are part of the contract.

use crate::utils::round2;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery window classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBucket {
	/// Delivered the day the order is placed.
	SameDay,
	/// Delivered the following day.
	NextDay,
	/// Delivery spans multiple working days.
	MultiDay,
}

impl fmt::Display for WindowBucket {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			WindowBucket::SameDay => write!(f, "same-day"),
			WindowBucket::NextDay => write!(f, "next-day"),
			WindowBucket::MultiDay => write!(f, "multi-day"),
		}
	}
}

/// A promised delivery window derived from a predicted duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryWindow {
	/// Window classification.
	pub bucket: WindowBucket,
	/// Days spent preparing the order before it leaves the hub.
	pub processing_days: i64,
	/// Days in transit.
	pub delivery_days: i64,
	/// Width of the promised range in days.
	pub window_days: i64,
	/// Earliest promised delivery.
	pub starts_at: NaiveDateTime,
	/// Latest promised delivery.
	pub ends_at: NaiveDateTime,
}

impl DeliveryWindow {
	/// ISO-8601 timestamp of the earliest promised delivery.
	pub fn start_timestamp(&self) -> String {
		self.starts_at.format("%Y-%m-%dT%H:%M:%S").to_string()
	}

	/// ISO-8601 timestamp of the latest promised delivery.
	pub fn end_timestamp(&self) -> String {
		self.ends_at.format("%Y-%m-%dT%H:%M:%S").to_string()
	}

	/// Short display label for the window start, like "Jan 15".
	pub fn start_label(&self) -> String {
		self.starts_at.format("%b %d").to_string()
	}

	/// Short display label for the window end, like "Jan 17".
	pub fn end_label(&self) -> String {
		self.ends_at.format("%b %d").to_string()
	}

	/// Human-readable date range for the window.
	///
	/// When the window crosses a month or year boundary the end label alone
	/// gains a year qualifier; the start label never does.
	pub fn range_label(&self) -> String {
		if self.starts_at.year() != self.ends_at.year()
			|| self.starts_at.month() != self.ends_at.month()
		{
			format!(
				"{} - {}",
				self.start_label(),
				self.ends_at.format("%b %d, %Y")
			)
		} else {
			format!("{} - {}", self.start_label(), self.end_label())
		}
	}
}

/// A successful delivery quote in its wire format.
///
/// Field order matches the JSON document downstream consumers parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryQuote {
	/// Always true for a quote; failures are reported as [`ErrorResponse`].
	pub success: bool,
	/// Predicted delivery time in minutes, floored and rounded.
	pub delivery_time_minutes: f64,
	/// Shipping fee derived from the delivery time.
	pub shipping_fee: f64,
	/// Predicted delivery time in hours.
	pub delivery_time_hours: f64,
	/// Human-readable delivery date range.
	pub delivery_date_range: String,
	/// ISO-8601 timestamp of the earliest promised delivery.
	pub delivery_start_date: String,
	/// ISO-8601 timestamp of the latest promised delivery.
	pub delivery_end_date: String,
	/// Short label for the window start.
	pub delivery_start_date_formatted: String,
	/// Short label for the window end.
	pub delivery_end_date_formatted: String,
	/// Present and true only when the closed-form estimate stood in for the
	/// trained model.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fallback: Option<bool>,
}

impl DeliveryQuote {
	/// Builds the wire quote from a prediction and its delivery window.
	pub fn new(minutes: f64, fee: f64, window: &DeliveryWindow, fallback: bool) -> Self {
		Self {
			success: true,
			delivery_time_minutes: minutes,
			shipping_fee: fee,
			delivery_time_hours: round2(minutes / 60.0),
			delivery_date_range: window.range_label(),
			delivery_start_date: window.start_timestamp(),
			delivery_end_date: window.end_timestamp(),
			delivery_start_date_formatted: window.start_label(),
			delivery_end_date_formatted: window.end_label(),
			fallback: if fallback { Some(true) } else { None },
		}
	}
}

/// A failure reply in its wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Always false.
	pub success: bool,
	/// Human-readable description of what went wrong.
	pub error: String,
}

impl ErrorResponse {
	/// Builds a failure reply with the given message.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			success: false,
			error: message.into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DeliveryWindow {
		DeliveryWindow {
			bucket: WindowBucket::NextDay,
			processing_days: 0,
			delivery_days: 1,
			window_days: 1,
			starts_at: NaiveDate::from_ymd_opt(start.0, start.1, start.2)
				.unwrap()
				.and_hms_opt(10, 30, 0)
				.unwrap(),
			ends_at: NaiveDate::from_ymd_opt(end.0, end.1, end.2)
				.unwrap()
				.and_hms_opt(10, 30, 0)
				.unwrap(),
		}
	}

	#[test]
	fn test_range_label_same_month() {
		let w = window((2024, 1, 15), (2024, 1, 17));
		assert_eq!(w.range_label(), "Jan 15 - Jan 17");
	}

	#[test]
	fn test_range_label_month_crossing_qualifies_end_only() {
		let w = window((2024, 1, 31), (2024, 2, 1));
		assert_eq!(w.range_label(), "Jan 31 - Feb 01, 2024");
		assert_eq!(w.start_label(), "Jan 31");
		assert_eq!(w.end_label(), "Feb 01");
	}

	#[test]
	fn test_range_label_year_crossing_qualifies_end_only() {
		let w = window((2024, 12, 31), (2025, 1, 2));
		assert_eq!(w.range_label(), "Dec 31 - Jan 02, 2025");
	}

	#[test]
	fn test_window_timestamps_are_second_precision_iso() {
		let w = window((2024, 1, 15), (2024, 1, 16));
		assert_eq!(w.start_timestamp(), "2024-01-15T10:30:00");
		assert_eq!(w.end_timestamp(), "2024-01-16T10:30:00");
	}

	#[test]
	fn test_quote_wire_format() {
		let w = window((2024, 1, 15), (2024, 1, 16));
		let quote = DeliveryQuote::new(120.0, 110.0, &w, false);

		let json = serde_json::to_string(&quote).unwrap();
		assert_eq!(
			json,
			"{\"success\":true,\
			\"delivery_time_minutes\":120.0,\
			\"shipping_fee\":110.0,\
			\"delivery_time_hours\":2.0,\
			\"delivery_date_range\":\"Jan 15 - Jan 16\",\
			\"delivery_start_date\":\"2024-01-15T10:30:00\",\
			\"delivery_end_date\":\"2024-01-16T10:30:00\",\
			\"delivery_start_date_formatted\":\"Jan 15\",\
			\"delivery_end_date_formatted\":\"Jan 16\"}"
		);
	}

	#[test]
	fn test_quote_flags_fallback_only_when_used() {
		let w = window((2024, 1, 15), (2024, 1, 16));

		let model_quote = DeliveryQuote::new(120.0, 110.0, &w, false);
		assert!(model_quote.fallback.is_none());
		assert!(!serde_json::to_string(&model_quote)
			.unwrap()
			.contains("fallback"));

		let fallback_quote = DeliveryQuote::new(120.0, 110.0, &w, true);
		assert_eq!(fallback_quote.fallback, Some(true));
		assert!(serde_json::to_string(&fallback_quote)
			.unwrap()
			.ends_with("\"fallback\":true}"));
	}

	#[test]
	fn test_quote_hours_derived_from_minutes() {
		let w = window((2024, 1, 15), (2024, 1, 16));
		let quote = DeliveryQuote::new(100.0, 100.0, &w, false);
		assert_eq!(quote.delivery_time_hours, 1.67);
	}

	#[test]
	fn test_error_response_wire_format() {
		let reply = ErrorResponse::new("Invalid JSON input");
		let json = serde_json::to_string(&reply).unwrap();
		assert_eq!(json, "{\"success\":false,\"error\":\"Invalid JSON input\"}");
	}
}
