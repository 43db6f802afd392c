//! Delivery time prediction.
//!
//! The trained model is the primary path. Any failure loading or applying it
//! drops to a closed-form estimate, so a request always gets an answer.

use crate::{encode, features, geo};
use quoter_config::Config;
use quoter_model::{ModelError, ModelStore};
use quoter_types::{round2, DeliveryRequest};
use std::path::Path;
use thiserror::Error;

/// Minimum believable delivery time in minutes.
///
/// Both the model and the closed-form estimate clamp to this floor.
pub const MIN_DELIVERY_MINUTES: f64 = 20.0;

/// Why the closed-form estimate stood in for the trained model.
#[derive(Debug, Error)]
pub enum FallbackCause {
	/// The model artifacts could not be loaded.
	#[error("model unavailable: {0}")]
	ModelUnavailable(ModelError),
	/// The artifacts loaded but could not be applied.
	#[error("invalid artifact: {0}")]
	InvalidArtifact(ModelError),
}

/// How a prediction was produced.
#[derive(Debug)]
pub enum PredictionBasis {
	/// The trained model produced the estimate.
	Model,
	/// The closed-form estimate stood in for the model.
	Fallback(FallbackCause),
}

impl PredictionBasis {
	/// True when the closed-form estimate was used.
	pub fn is_fallback(&self) -> bool {
		matches!(self, PredictionBasis::Fallback(_))
	}
}

/// A predicted delivery time and how it was produced.
#[derive(Debug)]
pub struct Prediction {
	/// Delivery time in minutes, floored and rounded.
	pub minutes: f64,
	/// Whether the model or the closed-form estimate produced the value.
	pub basis: PredictionBasis,
}

/// Predicts the delivery time in minutes for a request.
///
/// Never fails: a model failure is logged at WARN, carried in the
/// prediction basis, and replaced by the closed-form estimate.
pub async fn delivery_minutes(
	store: &ModelStore,
	model_dir: &Path,
	request: &DeliveryRequest,
	config: &Config,
) -> Prediction {
	match model_minutes(store, model_dir, request, config).await {
		Ok(minutes) => Prediction {
			minutes,
			basis: PredictionBasis::Model,
		},
		Err(cause) => {
			tracing::warn!(
				model_dir = %model_dir.display(),
				%cause,
				"Model prediction failed, using closed-form estimate"
			);
			Prediction {
				minutes: fallback_minutes(request, config),
				basis: PredictionBasis::Fallback(cause),
			}
		},
	}
}

/// Runs the model path end to end.
async fn model_minutes(
	store: &ModelStore,
	model_dir: &Path,
	request: &DeliveryRequest,
	config: &Config,
) -> Result<f64, FallbackCause> {
	let bundle = store
		.bundle(model_dir)
		.await
		.map_err(FallbackCause::ModelUnavailable)?;

	let mut features = features::build_features(request, &config.hub);
	encode::encode_features(&mut features, &bundle.encoders);

	let row = features.assemble(&bundle.metadata.feature_columns);
	let raw = bundle
		.model
		.predict(&row)
		.map_err(FallbackCause::InvalidArtifact)?;

	Ok(round2(raw.max(MIN_DELIVERY_MINUTES)))
}

/// Closed-form delivery time estimate.
///
/// A base time plus per-kilometer and per-item terms, with the same floor
/// and rounding as the model path. Total for any input.
pub fn fallback_minutes(request: &DeliveryRequest, config: &Config) -> f64 {
	let distance_km = geo::haversine_km(
		config.hub.latitude,
		config.hub.longitude,
		request.latitude,
		request.longitude,
		config.hub.earth_radius_km,
	);

	let fallback = &config.fallback;
	let minutes = fallback.base_minutes
		+ distance_km * fallback.minutes_per_km
		+ f64::from(request.order_size) * fallback.minutes_per_item;
	round2(minutes.max(MIN_DELIVERY_MINUTES))
}

#[cfg(test)]
mod tests {
	use super::*;
	use quoter_model::implementations::memory::MemoryModelSource;
	use quoter_model::{EncoderTable, FieldEncoder, LinearModel, ModelBundle, ModelMetadata};
	use std::collections::BTreeMap;

	fn hub_request() -> DeliveryRequest {
		DeliveryRequest {
			latitude: 14.0703,
			longitude: 121.3253,
			municipality: "San Pablo".to_string(),
			barangay: String::new(),
			postal_code: String::new(),
			time_of_order: 9,
			day_of_week: 0,
			order_size: 1,
			model_dir: None,
			order_datetime: None,
		}
	}

	fn bundle(intercept: f64, columns: &[&str], coefficients: &[f64]) -> ModelBundle {
		let mut fields = BTreeMap::new();
		fields.insert(
			"municipality".to_string(),
			FieldEncoder {
				classes: vec!["San Pablo".to_string(), "Alaminos".to_string()],
			},
		);

		ModelBundle {
			metadata: ModelMetadata {
				feature_columns: columns.iter().map(|c| c.to_string()).collect(),
				model_type: Some("linear_regression".to_string()),
				trained_at: None,
			},
			model: LinearModel {
				intercept,
				coefficients: coefficients.to_vec(),
			},
			encoders: EncoderTable { fields },
		}
	}

	fn store_with(bundle: ModelBundle) -> ModelStore {
		ModelStore::new(Box::new(
			MemoryModelSource::new().with_bundle("models", bundle),
		))
	}

	#[tokio::test]
	async fn test_model_path_uses_trained_model() {
		let store = store_with(bundle(
			25.0,
			&["distance_km", "order_size", "municipality_encoded"],
			&[2.0, 1.0, 0.0],
		));
		let config = Config::default();

		let mut request = hub_request();
		request.order_size = 5;

		let prediction =
			delivery_minutes(&store, Path::new("models"), &request, &config).await;

		// distance is zero at the hub, so 25 + 5 * 1.0
		assert_eq!(prediction.minutes, 30.0);
		assert!(matches!(prediction.basis, PredictionBasis::Model));
	}

	#[tokio::test]
	async fn test_model_output_is_floored() {
		let store = store_with(bundle(5.0, &["distance_km"], &[0.0]));
		let config = Config::default();

		let prediction =
			delivery_minutes(&store, Path::new("models"), &hub_request(), &config).await;

		assert_eq!(prediction.minutes, MIN_DELIVERY_MINUTES);
		assert!(matches!(prediction.basis, PredictionBasis::Model));
	}

	#[tokio::test]
	async fn test_missing_model_falls_back() {
		let store = ModelStore::new(Box::new(MemoryModelSource::new()));
		let config = Config::default();

		let prediction =
			delivery_minutes(&store, Path::new("models"), &hub_request(), &config).await;

		// 15 + 0 km + 0.5 per item is below the floor
		assert_eq!(prediction.minutes, 20.0);
		assert!(matches!(
			prediction.basis,
			PredictionBasis::Fallback(FallbackCause::ModelUnavailable(_))
		));
	}

	#[tokio::test]
	async fn test_artifact_width_mismatch_falls_back() {
		// Metadata names two columns but the model carries three weights
		let store = store_with(bundle(
			10.0,
			&["distance_km", "order_size"],
			&[1.0, 1.0, 1.0],
		));
		let config = Config::default();

		let prediction =
			delivery_minutes(&store, Path::new("models"), &hub_request(), &config).await;

		assert!(matches!(
			prediction.basis,
			PredictionBasis::Fallback(FallbackCause::InvalidArtifact(_))
		));
		assert!(prediction.minutes >= MIN_DELIVERY_MINUTES);
	}

	#[tokio::test]
	async fn test_columns_missing_from_features_read_as_zero() {
		let store = store_with(bundle(
			30.0,
			&["distance_km", "column_never_built"],
			&[1.0, 100.0],
		));
		let config = Config::default();

		let prediction =
			delivery_minutes(&store, Path::new("models"), &hub_request(), &config).await;

		// The unknown column contributes nothing
		assert_eq!(prediction.minutes, 30.0);
		assert!(matches!(prediction.basis, PredictionBasis::Model));
	}

	#[test]
	fn test_fallback_formula() {
		let config = Config::default();

		let mut request = hub_request();
		request.order_size = 20;

		// 15 + 0 km + 20 * 0.5 = 25
		assert_eq!(fallback_minutes(&request, &config), 25.0);
	}

	#[test]
	fn test_fallback_is_floored() {
		let config = Config::default();
		assert_eq!(fallback_minutes(&hub_request(), &config), 20.0);
	}

	#[test]
	fn test_fallback_handles_non_finite_coordinates() {
		let config = Config::default();

		let mut request = hub_request();
		request.latitude = f64::NAN;

		// NaN distance clamps to the floor instead of propagating out
		assert_eq!(fallback_minutes(&request, &config), 20.0);
	}
}
