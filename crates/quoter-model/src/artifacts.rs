//! Model artifact types.
//!
//! The training pipeline serializes three artifacts per model directory: the
//! fitted linear model, the per-field label encoders, and metadata naming the
//! feature columns in training order. All three are plain JSON.

use crate::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata describing a trained model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelMetadata {
	/// Feature column names in the order the model was trained with.
	pub feature_columns: Vec<String>,
	/// Model family identifier, e.g. "linear_regression".
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model_type: Option<String>,
	/// When the model was trained, as recorded by the training pipeline.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trained_at: Option<String>,
}

/// A fitted linear regression model.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LinearModel {
	/// Intercept term.
	pub intercept: f64,
	/// Per-column coefficients, in feature column order.
	pub coefficients: Vec<f64>,
}

impl LinearModel {
	/// Applies the model to an assembled feature row.
	pub fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
		if row.len() != self.coefficients.len() {
			return Err(ModelError::FeatureMismatch {
				expected: self.coefficients.len(),
				actual: row.len(),
			});
		}

		let weighted: f64 = self
			.coefficients
			.iter()
			.zip(row)
			.map(|(coefficient, value)| coefficient * value)
			.sum();
		Ok(self.intercept + weighted)
	}
}

/// Outcome of resolving a categorical value against a field encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
	/// The value was seen during training.
	Known(f64),
	/// The value was not seen during training; the first class stands in.
	Unseen(f64),
	/// The encoder has no classes at all.
	Degenerate,
}

impl Resolution {
	/// The numeric code to feed the model.
	pub fn code(&self) -> f64 {
		match self {
			Resolution::Known(code) | Resolution::Unseen(code) => *code,
			Resolution::Degenerate => 0.0,
		}
	}
}

/// A label encoder for one categorical field.
///
/// Codes are class positions, so the stand-in code for unseen values (the
/// code of the first class) is always 0.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldEncoder {
	/// Classes in training order.
	pub classes: Vec<String>,
}

impl FieldEncoder {
	/// Resolves a raw label to its numeric code.
	///
	/// Resolution is total: unseen labels and degenerate (classless)
	/// encoders code rather than fail.
	pub fn resolve(&self, value: &str) -> Resolution {
		if self.classes.is_empty() {
			return Resolution::Degenerate;
		}

		match self.classes.iter().position(|class| class == value) {
			Some(position) => Resolution::Known(position as f64),
			None => Resolution::Unseen(0.0),
		}
	}
}

/// Label encoders for every categorical field the model was trained with.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EncoderTable {
	/// Encoders by field name.
	pub fields: BTreeMap<String, FieldEncoder>,
}

impl EncoderTable {
	/// Iterates over field names and their encoders.
	pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldEncoder)> {
		self.fields.iter()
	}
}

/// The complete artifact set for one trained model.
#[derive(Debug, Clone)]
pub struct ModelBundle {
	/// Metadata naming the feature columns.
	pub metadata: ModelMetadata,
	/// The fitted model.
	pub model: LinearModel,
	/// Label encoders for categorical fields.
	pub encoders: EncoderTable,
}
