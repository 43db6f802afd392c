//! In-memory model source implementation for the delivery quoter.
//!
//! This module serves pre-built bundles from a map, useful for testing and
//! for embedding a known model without touching the filesystem.

use crate::{ModelBundle, ModelError, ModelSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory model source implementation.
///
/// Bundles are registered up front; unknown directories report as missing
/// the same way an untrained filesystem directory would.
#[derive(Default)]
pub struct MemoryModelSource {
	/// Registered bundles by model directory.
	bundles: HashMap<PathBuf, ModelBundle>,
}

impl MemoryModelSource {
	/// Creates a new MemoryModelSource with no bundles.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a bundle for a model directory, builder style.
	pub fn with_bundle(mut self, dir: impl Into<PathBuf>, bundle: ModelBundle) -> Self {
		self.insert(dir, bundle);
		self
	}

	/// Registers a bundle for a model directory.
	pub fn insert(&mut self, dir: impl Into<PathBuf>, bundle: ModelBundle) {
		self.bundles.insert(dir.into(), bundle);
	}
}

#[async_trait]
impl ModelSource for MemoryModelSource {
	async fn load_bundle(&self, dir: &Path) -> Result<ModelBundle, ModelError> {
		self.bundles
			.get(dir)
			.cloned()
			.ok_or_else(|| ModelError::NotFound(dir.display().to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{EncoderTable, LinearModel, ModelMetadata};

	fn bundle() -> ModelBundle {
		ModelBundle {
			metadata: ModelMetadata {
				feature_columns: vec!["distance_km".to_string()],
				model_type: None,
				trained_at: None,
			},
			model: LinearModel {
				intercept: 20.0,
				coefficients: vec![2.5],
			},
			encoders: EncoderTable::default(),
		}
	}

	#[tokio::test]
	async fn test_registered_bundle_loads() {
		let source = MemoryModelSource::new().with_bundle("models", bundle());

		let loaded = source.load_bundle(Path::new("models")).await.unwrap();
		assert_eq!(loaded.model.intercept, 20.0);
	}

	#[tokio::test]
	async fn test_unknown_directory_is_not_found() {
		let source = MemoryModelSource::new();

		let result = source.load_bundle(Path::new("nowhere")).await;
		assert!(matches!(result, Err(ModelError::NotFound(_))));
	}
}
