//! Configuration module for the delivery quoter system.
//!
//! This module provides structures and utilities for managing quoter
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required configuration values are
//! properly set. Every section has defaults, so the quoter also runs with
//! no configuration file at all.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the delivery quoter.
///
/// This structure contains all configuration sections required for the
/// quoter to operate: the instance identity, the hub location, the pricing
/// scheme, the closed-form fallback constants, and the model store location.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to the quoter instance.
	#[serde(default)]
	pub quoter: QuoterConfig,
	/// Delivery hub location used for distance calculations.
	#[serde(default)]
	pub hub: HubConfig,
	/// Shipping fee pricing scheme.
	#[serde(default)]
	pub pricing: PricingConfig,
	/// Constants for the closed-form estimate used when the model fails.
	#[serde(default)]
	pub fallback: FallbackConfig,
	/// Configuration for the model store.
	#[serde(default)]
	pub model: ModelConfig,
}

/// Configuration specific to the quoter instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoterConfig {
	/// Identifier for this quoter instance, used in logs.
	#[serde(default = "default_quoter_id")]
	pub id: String,
}

impl Default for QuoterConfig {
	fn default() -> Self {
		Self {
			id: default_quoter_id(),
		}
	}
}

/// Returns the default quoter instance identifier.
fn default_quoter_id() -> String {
	"quoter".to_string()
}

/// Delivery hub location used for distance calculations.
///
/// Defaults to the San Pablo City hub.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HubConfig {
	/// Hub latitude in decimal degrees.
	#[serde(default = "default_hub_latitude")]
	pub latitude: f64,
	/// Hub longitude in decimal degrees.
	#[serde(default = "default_hub_longitude")]
	pub longitude: f64,
	/// Earth radius in kilometers used by the haversine formula.
	#[serde(default = "default_earth_radius_km")]
	pub earth_radius_km: f64,
}

impl Default for HubConfig {
	fn default() -> Self {
		Self {
			latitude: default_hub_latitude(),
			longitude: default_hub_longitude(),
			earth_radius_km: default_earth_radius_km(),
		}
	}
}

/// Returns the default hub latitude (San Pablo City).
fn default_hub_latitude() -> f64 {
	14.0703
}

/// Returns the default hub longitude (San Pablo City).
fn default_hub_longitude() -> f64 {
	121.3253
}

/// Returns the mean Earth radius in kilometers.
fn default_earth_radius_km() -> f64 {
	6371.0
}

/// Shipping fee pricing scheme.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
	/// Flat base fee charged on every delivery.
	#[serde(default = "default_base_fee")]
	pub base_fee: f64,
	/// Fee charged per predicted minute of delivery time.
	#[serde(default = "default_rate_per_minute")]
	pub rate_per_minute: f64,
}

impl Default for PricingConfig {
	fn default() -> Self {
		Self {
			base_fee: default_base_fee(),
			rate_per_minute: default_rate_per_minute(),
		}
	}
}

/// Returns the default base shipping fee.
fn default_base_fee() -> f64 {
	50.0
}

/// Returns the default per-minute shipping rate.
fn default_rate_per_minute() -> f64 {
	0.5
}

/// Constants for the closed-form delivery time estimate.
///
/// These drive the stand-in calculation used whenever the trained model
/// cannot be loaded or applied.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
	/// Fixed minutes added to every estimate.
	#[serde(default = "default_fallback_base_minutes")]
	pub base_minutes: f64,
	/// Minutes added per kilometer of distance from the hub.
	#[serde(default = "default_fallback_minutes_per_km")]
	pub minutes_per_km: f64,
	/// Minutes added per item in the order.
	#[serde(default = "default_fallback_minutes_per_item")]
	pub minutes_per_item: f64,
}

impl Default for FallbackConfig {
	fn default() -> Self {
		Self {
			base_minutes: default_fallback_base_minutes(),
			minutes_per_km: default_fallback_minutes_per_km(),
			minutes_per_item: default_fallback_minutes_per_item(),
		}
	}
}

/// Returns the default fixed minutes for the closed-form estimate.
fn default_fallback_base_minutes() -> f64 {
	15.0
}

/// Returns the default per-kilometer minutes for the closed-form estimate.
fn default_fallback_minutes_per_km() -> f64 {
	2.5
}

/// Returns the default per-item minutes for the closed-form estimate.
fn default_fallback_minutes_per_item() -> f64 {
	0.5
}

/// Configuration for the model store.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
	/// Directory holding the trained model artifacts.
	///
	/// A request may override this per call; this is the fallback.
	#[serde(default = "default_model_dir")]
	pub dir: String,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			dir: default_model_dir(),
		}
	}
}

/// Returns the default model artifact directory.
fn default_model_dir() -> String {
	"models".to_string()
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	// Limit input size to prevent ReDoS attacks
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => {
				if let Some(default) = default_value {
					default.to_string()
				} else {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)));
				}
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads configuration from a TOML file with environment variable
	/// resolution.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let contents = tokio::fs::read_to_string(path).await?;
		contents.parse()
	}

	/// Validates the configuration to ensure all values are usable.
	///
	/// This method checks that:
	/// - The quoter ID is not empty
	/// - The hub coordinates are within coordinate ranges
	/// - The Earth radius is positive
	/// - Pricing and fallback constants are not negative
	/// - The model directory is not empty
	fn validate(&self) -> Result<(), ConfigError> {
		// Validate quoter config
		if self.quoter.id.is_empty() {
			return Err(ConfigError::Validation("Quoter ID cannot be empty".into()));
		}

		// Validate hub config
		if !(-90.0..=90.0).contains(&self.hub.latitude) {
			return Err(ConfigError::Validation(format!(
				"Hub latitude {} out of range [-90, 90]",
				self.hub.latitude
			)));
		}
		if !(-180.0..=180.0).contains(&self.hub.longitude) {
			return Err(ConfigError::Validation(format!(
				"Hub longitude {} out of range [-180, 180]",
				self.hub.longitude
			)));
		}
		if self.hub.earth_radius_km <= 0.0 || self.hub.earth_radius_km.is_nan() {
			return Err(ConfigError::Validation(
				"Earth radius must be greater than 0".into(),
			));
		}

		// Validate pricing config
		if self.pricing.base_fee < 0.0 {
			return Err(ConfigError::Validation(
				"Base fee cannot be negative".into(),
			));
		}
		if self.pricing.rate_per_minute < 0.0 {
			return Err(ConfigError::Validation(
				"Rate per minute cannot be negative".into(),
			));
		}

		// Validate fallback config
		if self.fallback.base_minutes < 0.0 {
			return Err(ConfigError::Validation(
				"Fallback base minutes cannot be negative".into(),
			));
		}
		if self.fallback.minutes_per_km < 0.0 {
			return Err(ConfigError::Validation(
				"Fallback minutes per km cannot be negative".into(),
			));
		}
		if self.fallback.minutes_per_item < 0.0 {
			return Err(ConfigError::Validation(
				"Fallback minutes per item cannot be negative".into(),
			));
		}

		// Validate model config
		if self.model.dir.is_empty() {
			return Err(ConfigError::Validation(
				"Model directory cannot be empty".into(),
			));
		}

		Ok(())
	}
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// This allows configuration to be parsed from TOML strings using the
/// standard string parsing interface. Environment variables are resolved and
/// the configuration is automatically validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
