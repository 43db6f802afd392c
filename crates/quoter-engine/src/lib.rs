//! Core estimation engine for the delivery quoter system.
//!
//! The engine turns a delivery request into a quote in four steps: predict
//! the delivery time in minutes (trained model with a closed-form fallback),
//! price the shipping fee from the minutes, bucket the duration into a
//! promised delivery window, and assemble the wire-format quote.

pub mod encode;
pub mod features;
pub mod fee;
pub mod geo;
pub mod predict;
pub mod window;

use quoter_config::Config;
use quoter_model::ModelStore;
use quoter_types::{DeliveryQuote, DeliveryRequest};
use std::path::Path;

/// Quote engine holding the pricing configuration and the model store.
pub struct QuoteEngine {
	config: Config,
	store: ModelStore,
}

impl QuoteEngine {
	/// Creates a new quote engine.
	pub fn new(config: Config, store: ModelStore) -> Self {
		Self { config, store }
	}

	/// Returns the engine configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Produces a complete delivery quote for a request.
	///
	/// Quoting is total: when the model cannot be used the engine falls back
	/// to the closed-form estimate, so every request gets an answer.
	pub async fn quote(&self, request: &DeliveryRequest) -> DeliveryQuote {
		let model_dir = request
			.model_dir
			.as_deref()
			.unwrap_or(&self.config.model.dir);
		let prediction =
			predict::delivery_minutes(&self.store, Path::new(model_dir), request, &self.config)
				.await;

		let fee = fee::shipping_fee(prediction.minutes, &self.config.pricing);
		let window = window::delivery_window(prediction.minutes, request.order_timestamp());

		tracing::debug!(
			minutes = prediction.minutes,
			fee,
			bucket = %window.bucket,
			fallback = prediction.basis.is_fallback(),
			"Quoted delivery"
		);

		DeliveryQuote::new(prediction.minutes, fee, &window, prediction.basis.is_fallback())
	}
}
