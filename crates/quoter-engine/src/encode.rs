//! Categorical feature encoding.
//!
//! Applies a model's label encoders to the raw labels in a feature vector.
//! Encoding never fails a request: unseen labels take the first class's code
//! and degenerate encoders code to zero.

use quoter_model::{EncoderTable, Resolution};
use quoter_types::FeatureVector;

/// Encodes every categorical feature the table knows about.
///
/// Each field with a recorded label gains a `<field>_encoded` numeric
/// feature; fields the vector never recorded are skipped. The raw label
/// stays in place, it just never reaches an assembled row.
pub fn encode_features(features: &mut FeatureVector, encoders: &EncoderTable) {
	for (field, encoder) in encoders.iter() {
		let label = match features.label(field) {
			Some(label) => label.to_string(),
			None => continue,
		};

		let resolution = encoder.resolve(&label);
		match resolution {
			Resolution::Unseen(_) => {
				tracing::debug!(
					field = %field,
					label = %label,
					"Label not seen during training, coding as first class"
				);
			},
			Resolution::Degenerate => {
				tracing::debug!(field = %field, "Encoder has no classes, coding to zero");
			},
			Resolution::Known(_) => {},
		}

		features.set_numeric(format!("{}_encoded", field), resolution.code());
	}
}
