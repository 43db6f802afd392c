//! Model store module for the delivery quoter system.
//!
//! This module provides abstractions for loading trained model artifacts,
//! supporting different source implementations such as filesystem or
//! in-memory bundles. Artifacts are immutable once trained, so loaded
//! bundles are cached per directory for the life of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

pub mod artifacts;

pub use artifacts::{
	EncoderTable, FieldEncoder, LinearModel, ModelBundle, ModelMetadata, Resolution,
};

/// Re-export implementations
pub mod implementations {
	pub mod fs;
	pub mod memory;
}

/// Errors that can occur during model store operations.
#[derive(Debug, Error)]
pub enum ModelError {
	/// Error that occurs when a required artifact is missing.
	#[error("Model file not found: {0}. Please train the model first.")]
	NotFound(String),
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(String),
	/// Error that occurs when an artifact cannot be parsed.
	#[error("Malformed artifact {file}: {message}")]
	Malformed {
		/// The artifact file that failed to parse.
		file: String,
		/// What the parser reported.
		message: String,
	},
	/// Error that occurs when a feature row does not match the model width.
	#[error("Feature count mismatch: model expects {expected}, got {actual}")]
	FeatureMismatch {
		/// Columns the fitted model was trained with.
		expected: usize,
		/// Columns in the assembled row.
		actual: usize,
	},
}

/// Trait defining the low-level interface for model sources.
///
/// A model source retrieves the complete artifact set for a model directory.
/// Implementations may read from the filesystem, an object store, or serve
/// pre-built bundles from memory.
#[async_trait]
pub trait ModelSource: Send + Sync {
	/// Loads the artifact bundle for the given model directory.
	async fn load_bundle(&self, dir: &Path) -> Result<ModelBundle, ModelError>;
}

/// High-level model access with per-directory caching.
///
/// The ModelStore wraps a low-level source and parses each model directory
/// at most once, sharing the parsed bundle behind an `Arc` thereafter.
pub struct ModelStore {
	/// The underlying source implementation.
	source: Box<dyn ModelSource>,
	/// Parsed bundles by model directory.
	cache: RwLock<HashMap<PathBuf, Arc<ModelBundle>>>,
}

impl ModelStore {
	/// Creates a new ModelStore with the specified source.
	pub fn new(source: Box<dyn ModelSource>) -> Self {
		Self {
			source,
			cache: RwLock::new(HashMap::new()),
		}
	}

	/// Returns the bundle for a model directory, loading it on first use.
	///
	/// Failures are not cached; a directory that gains valid artifacts later
	/// will load on the next call.
	pub async fn bundle(&self, dir: &Path) -> Result<Arc<ModelBundle>, ModelError> {
		{
			let cache = self.cache.read().await;
			if let Some(bundle) = cache.get(dir) {
				return Ok(Arc::clone(bundle));
			}
		}

		let bundle = Arc::new(self.source.load_bundle(dir).await?);
		tracing::debug!(
			dir = %dir.display(),
			columns = bundle.metadata.feature_columns.len(),
			"Loaded model bundle"
		);

		// Two tasks may race the first load; the first insert wins and both
		// callers share it from then on.
		let mut cache = self.cache.write().await;
		let entry = cache.entry(dir.to_path_buf()).or_insert(bundle);
		Ok(Arc::clone(entry))
	}
}
