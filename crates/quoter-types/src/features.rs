//! Feature vector types for assembling model input rows.
//!
//! A feature vector keeps numeric features and raw categorical labels apart.
//! Models only ever consume numerics; labels exist to be encoded into numeric
//! columns first. Assembly produces the row in whatever column order the
//! model artifacts dictate.

use std::collections::BTreeMap;

/// Named features for a single prediction.
///
/// Numeric values and categorical labels live in separate maps so a raw label
/// can never leak into an assembled row unencoded.
#[derive(Debug, Clone, Default)]
pub struct FeatureVector {
	/// Numeric features by name.
	values: BTreeMap<String, f64>,
	/// Raw categorical labels by name, prior to encoding.
	labels: BTreeMap<String, String>,
}

impl FeatureVector {
	/// Creates an empty feature vector.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a numeric feature.
	pub fn set_numeric(&mut self, name: impl Into<String>, value: f64) {
		self.values.insert(name.into(), value);
	}

	/// Sets a raw categorical label.
	pub fn set_label(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.labels.insert(name.into(), value.into());
	}

	/// Returns a numeric feature, if present.
	pub fn numeric(&self, name: &str) -> Option<f64> {
		self.values.get(name).copied()
	}

	/// Returns a raw categorical label, if present.
	pub fn label(&self, name: &str) -> Option<&str> {
		self.labels.get(name).map(String::as_str)
	}

	/// Assembles the numeric row in the given column order.
	///
	/// Columns with no recorded value contribute 0.0, so a model trained on
	/// columns this vector never saw still receives a full-width row.
	pub fn assemble(&self, columns: &[String]) -> Vec<f64> {
		columns
			.iter()
			.map(|col| self.values.get(col).copied().unwrap_or(0.0))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_numeric_and_label_are_separate() {
		let mut features = FeatureVector::new();
		features.set_numeric("distance_km", 4.2);
		features.set_label("municipality", "San Pablo");

		assert_eq!(features.numeric("distance_km"), Some(4.2));
		assert_eq!(features.label("municipality"), Some("San Pablo"));
		assert_eq!(features.numeric("municipality"), None);
		assert_eq!(features.label("distance_km"), None);
	}

	#[test]
	fn test_assemble_follows_column_order() {
		let mut features = FeatureVector::new();
		features.set_numeric("a", 1.0);
		features.set_numeric("b", 2.0);

		let columns = vec!["b".to_string(), "a".to_string()];
		assert_eq!(features.assemble(&columns), vec![2.0, 1.0]);
	}

	#[test]
	fn test_assemble_zero_fills_missing_columns() {
		let mut features = FeatureVector::new();
		features.set_numeric("known", 7.5);

		let columns = vec!["known".to_string(), "never_seen".to_string()];
		assert_eq!(features.assemble(&columns), vec![7.5, 0.0]);
	}

	#[test]
	fn test_assemble_ignores_unencoded_labels() {
		let mut features = FeatureVector::new();
		features.set_label("municipality", "San Pablo");

		let columns = vec!["municipality".to_string()];
		assert_eq!(features.assemble(&columns), vec![0.0]);
	}
}
