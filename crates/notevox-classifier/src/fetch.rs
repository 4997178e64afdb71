//! HTTP model loader.
//!
//! Fetches the metadata document (class labels) and the model descriptor
//! from the configured base URL. A failure to fetch either one is a load
//! error. With the `onnx` feature the descriptor is compiled into a runnable
//! model; without it the loader degrades to the label-only no-op backend so
//! the rest of the pipeline still runs.

use crate::classifier::{Classifier, ClassifierLoader};
use crate::metadata::ModelMetadata;
use crate::types::ModelLocation;
use async_trait::async_trait;
use notevox_foundation::ModelError;
use std::sync::Arc;

pub struct HttpLoader {
    client: reqwest::Client,
}

impl HttpLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ModelError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ModelError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let response = response.error_for_status().map_err(|e| ModelError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let bytes = response.bytes().await.map_err(|e| ModelError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }

    async fn fetch_metadata(&self, location: &ModelLocation) -> Result<ModelMetadata, ModelError> {
        let url = location.metadata_url();
        let raw = self.fetch(&url).await?;
        let text = String::from_utf8(raw)
            .map_err(|e| ModelError::InvalidMetadata(e.to_string()))?;
        ModelMetadata::parse(&text)
    }
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClassifierLoader for HttpLoader {
    async fn load(&self, location: &ModelLocation) -> Result<Arc<dyn Classifier>, ModelError> {
        tracing::info!(metadata_url = %location.metadata_url(), "loading classifier model");
        let metadata = self.fetch_metadata(location).await?;
        tracing::info!(classes = metadata.labels.len(), "model metadata loaded");

        #[cfg(feature = "onnx")]
        {
            let model_bytes = self.fetch(&location.model_url()).await?;
            let classifier =
                crate::onnx::OnnxClassifier::from_bytes(&model_bytes, metadata.labels)?;
            Ok(Arc::new(classifier))
        }

        #[cfg(not(feature = "onnx"))]
        {
            tracing::warn!(
                "built without the `onnx` feature; classification is disabled (labels only)"
            );
            Ok(Arc::new(crate::noop::NoopClassifier::new(metadata.labels)))
        }
    }
}
