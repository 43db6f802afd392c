//! Delivery window bucketing.
//!
//! Buckets a predicted duration into a promised date range. The rules mirror
//! hub operations: short jobs ordered early go out the same day, orders
//! placed after the afternoon cutoff wait for the next day's run, and long
//! jobs are paced at one working day per eight delivery hours.

use chrono::{Duration, NaiveDateTime, Timelike};
use quoter_types::{DeliveryWindow, WindowBucket};

/// Upper bound in hours for same-day delivery.
pub const SAME_DAY_MAX_HOURS: f64 = 4.0;
/// Upper bound in hours for next-day delivery.
pub const NEXT_DAY_MAX_HOURS: f64 = 8.0;
/// Orders placed at or after this hour miss the day's delivery run.
pub const LATE_ORDER_CUTOFF_HOUR: u32 = 14;
/// Delivery working hours per day, used to pace multi-day jobs.
pub const WORKDAY_DELIVERY_HOURS: f64 = 8.0;

/// Buckets a predicted delivery time into a promised window.
///
/// The branches are checked in order and the first match wins: an order
/// placed after the cutoff is promised next-day even when the duration alone
/// would call for multiple days.
pub fn delivery_window(delivery_time_minutes: f64, ordered_at: NaiveDateTime) -> DeliveryWindow {
	let hours = delivery_time_minutes / 60.0;
	let order_hour = ordered_at.hour();

	let (bucket, processing_days, delivery_days, window_days): (WindowBucket, i64, i64, i64) =
		if hours < SAME_DAY_MAX_HOURS && order_hour < LATE_ORDER_CUTOFF_HOUR {
			(WindowBucket::SameDay, 0, 0, 1)
		} else if hours < NEXT_DAY_MAX_HOURS || order_hour >= LATE_ORDER_CUTOFF_HOUR {
			// A late order needs a day of processing before the run
			let processing = if order_hour < LATE_ORDER_CUTOFF_HOUR { 0 } else { 1 };
			(WindowBucket::NextDay, processing, 1, 1)
		} else {
			let delivery = ((hours / WORKDAY_DELIVERY_HOURS) as i64).max(1);
			(WindowBucket::MultiDay, 1, delivery, 2)
		};

	let starts_at = add_days_saturating(ordered_at, processing_days.saturating_add(delivery_days));
	let ends_at = add_days_saturating(starts_at, window_days);

	DeliveryWindow {
		bucket,
		processing_days,
		delivery_days,
		window_days,
		starts_at,
		ends_at,
	}
}

/// Adds days to a timestamp, saturating at the calendar's edge.
///
/// Absurd model output can demand more days than the calendar holds; the
/// window clamps there instead of failing the quote.
fn add_days_saturating(ts: NaiveDateTime, days: i64) -> NaiveDateTime {
	Duration::try_days(days)
		.and_then(|d| ts.checked_add_signed(d))
		.unwrap_or(NaiveDateTime::MAX)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn ordered_at(hour: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 1, 15)
			.unwrap()
			.and_hms_opt(hour, 0, 0)
			.unwrap()
	}

	fn day(d: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 1, d)
			.unwrap()
			.and_hms_opt(9, 0, 0)
			.unwrap()
	}

	#[test]
	fn test_short_early_order_is_same_day() {
		let w = delivery_window(100.0, ordered_at(9));

		assert_eq!(w.bucket, WindowBucket::SameDay);
		assert_eq!(w.processing_days, 0);
		assert_eq!(w.delivery_days, 0);
		assert_eq!(w.window_days, 1);
		assert_eq!(w.starts_at, day(15));
		assert_eq!(w.ends_at, day(16));
	}

	#[test]
	fn test_medium_order_is_next_day() {
		let w = delivery_window(300.0, ordered_at(9));

		assert_eq!(w.bucket, WindowBucket::NextDay);
		assert_eq!(w.processing_days, 0);
		assert_eq!(w.delivery_days, 1);
		assert_eq!(w.starts_at, day(16));
		assert_eq!(w.ends_at, day(17));
	}

	#[test]
	fn test_long_order_is_multi_day() {
		let w = delivery_window(600.0, ordered_at(9));

		assert_eq!(w.bucket, WindowBucket::MultiDay);
		assert_eq!(w.processing_days, 1);
		assert_eq!(w.delivery_days, 1);
		assert_eq!(w.window_days, 2);
		assert_eq!(w.starts_at, day(17));
		assert_eq!(w.ends_at, day(19));
	}

	#[test]
	fn test_late_order_forces_next_day_with_processing() {
		let w = delivery_window(300.0, ordered_at(15));

		assert_eq!(w.bucket, WindowBucket::NextDay);
		assert_eq!(w.processing_days, 1);
		assert_eq!(w.delivery_days, 1);
		assert_eq!(w.starts_at, ordered_at(15) + Duration::days(2));
	}

	#[test]
	fn test_late_order_beats_multi_day() {
		// Ten delivery hours would be multi-day, but the late-order branch
		// is checked first
		let w = delivery_window(600.0, ordered_at(15));

		assert_eq!(w.bucket, WindowBucket::NextDay);
		assert_eq!(w.processing_days, 1);
		assert_eq!(w.delivery_days, 1);
		assert_eq!(w.window_days, 1);
	}

	#[test]
	fn test_multi_day_paces_by_workday_hours() {
		// Twenty delivery hours is two full working days
		let w = delivery_window(1200.0, ordered_at(9));

		assert_eq!(w.bucket, WindowBucket::MultiDay);
		assert_eq!(w.delivery_days, 2);
		assert_eq!(w.starts_at, day(18));
		assert_eq!(w.ends_at, day(20));
	}

	#[test]
	fn test_multi_day_delivery_days_never_below_one() {
		// Exactly eight hours truncates to one working day
		let w = delivery_window(480.0, ordered_at(9));

		assert_eq!(w.bucket, WindowBucket::MultiDay);
		assert_eq!(w.delivery_days, 1);
	}

	#[test]
	fn test_four_hour_boundary_is_not_same_day() {
		let w = delivery_window(240.0, ordered_at(9));
		assert_eq!(w.bucket, WindowBucket::NextDay);
	}

	#[test]
	fn test_cutoff_hour_boundary_counts_as_late() {
		let w = delivery_window(100.0, ordered_at(14));

		assert_eq!(w.bucket, WindowBucket::NextDay);
		assert_eq!(w.processing_days, 1);
	}

	#[test]
	fn test_absurd_duration_saturates_instead_of_failing() {
		let w = delivery_window(f64::MAX, ordered_at(9));

		assert_eq!(w.bucket, WindowBucket::MultiDay);
		assert!(w.ends_at >= w.starts_at);
		assert_eq!(w.starts_at, NaiveDateTime::MAX);
	}
}
