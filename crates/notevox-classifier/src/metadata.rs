//! Model metadata: the class label list shipped next to the model
//! descriptor (Teachable-Machine-style `metadata.json`).

use notevox_foundation::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub labels: Vec<String>,
    #[serde(default, rename = "modelName")]
    pub model_name: Option<String>,
}

impl ModelMetadata {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let metadata: ModelMetadata = serde_json::from_str(raw)
            .map_err(|e| ModelError::InvalidMetadata(e.to_string()))?;
        if metadata.labels.is_empty() {
            return Err(ModelError::InvalidMetadata(
                "metadata contains no class labels".into(),
            ));
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_teachable_machine_metadata() {
        let raw = r#"{
            "modelName": "currency",
            "labels": ["10 Rupees", "20 Rupees", "50 Rupees", "100 Rupees"]
        }"#;
        let meta = ModelMetadata::parse(raw).unwrap();
        assert_eq!(meta.labels.len(), 4);
        assert_eq!(meta.model_name.as_deref(), Some("currency"));
    }

    #[test]
    fn empty_label_list_is_rejected() {
        let err = ModelMetadata::parse(r#"{"labels": []}"#).unwrap_err();
        assert!(matches!(err, ModelError::InvalidMetadata(_)));
    }

    #[test]
    fn malformed_json_is_a_metadata_error() {
        assert!(matches!(
            ModelMetadata::parse("not json"),
            Err(ModelError::InvalidMetadata(_))
        ));
    }
}
