//! Filesystem model source implementation for the delivery quoter.
//!
//! This module reads the three JSON artifacts the training pipeline writes
//! into a model directory. The model artifact is read first so an untrained
//! directory reports the model file as the missing piece.

use crate::{EncoderTable, LinearModel, ModelBundle, ModelError, ModelMetadata, ModelSource};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;

/// File name of the fitted model artifact.
pub const MODEL_FILE: &str = "delivery_time_model.json";
/// File name of the label encoder artifact.
pub const ENCODERS_FILE: &str = "label_encoders.json";
/// File name of the metadata artifact.
pub const METADATA_FILE: &str = "model_metadata.json";

/// Filesystem-backed model source.
///
/// Reads artifacts fresh on every load; caching is the store's concern.
#[derive(Default)]
pub struct FsModelSource;

impl FsModelSource {
	/// Creates a new FsModelSource.
	pub fn new() -> Self {
		Self
	}
}

/// Reads and parses one JSON artifact.
async fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
	let raw = match fs::read(path).await {
		Ok(raw) => raw,
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
			return Err(ModelError::NotFound(path.display().to_string()))
		},
		Err(e) => return Err(ModelError::Io(e.to_string())),
	};

	serde_json::from_slice(&raw).map_err(|e| ModelError::Malformed {
		file: path.display().to_string(),
		message: e.to_string(),
	})
}

#[async_trait]
impl ModelSource for FsModelSource {
	async fn load_bundle(&self, dir: &Path) -> Result<ModelBundle, ModelError> {
		let model: LinearModel = read_artifact(&dir.join(MODEL_FILE)).await?;
		let encoders: EncoderTable = read_artifact(&dir.join(ENCODERS_FILE)).await?;
		let metadata: ModelMetadata = read_artifact(&dir.join(METADATA_FILE)).await?;

		Ok(ModelBundle {
			metadata,
			model,
			encoders,
		})
	}
}

/// Factory function to create a filesystem model source.
pub fn create_source() -> Box<dyn ModelSource> {
	Box::new(FsModelSource::new())
}
