//! ONNX inference backend over tract.

use crate::classifier::Classifier;
use crate::types::Prediction;
use async_trait::async_trait;
use notevox_camera::Frame;
use notevox_foundation::{ClassifyError, ModelError};
use tract_onnx::prelude::*;

type RunnableModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Input edge the model expects, NCHW float.
const INPUT_SIZE: usize = 224;

pub struct OnnxClassifier {
    model: RunnableModel,
    labels: Vec<String>,
}

impl OnnxClassifier {
    pub fn from_bytes(bytes: &[u8], labels: Vec<String>) -> Result<Self, ModelError> {
        let mut cursor = std::io::Cursor::new(bytes);
        let model = tract_onnx::onnx()
            .model_for_read(&mut cursor)
            .map_err(|e| ModelError::InvalidModel(e.to_string()))?
            .with_input_fact(
                0,
                f32::fact([1, 3, INPUT_SIZE, INPUT_SIZE]).into(),
            )
            .map_err(|e| ModelError::InvalidModel(e.to_string()))?
            .into_optimized()
            .map_err(|e| ModelError::InvalidModel(e.to_string()))?
            .into_runnable()
            .map_err(|e| ModelError::InvalidModel(e.to_string()))?;
        Ok(Self { model, labels })
    }

    /// Nearest-neighbor resample of the frame into the model's input tensor,
    /// scaled to [0, 1].
    fn frame_to_tensor(&self, frame: &Frame) -> Tensor {
        let array = tract_ndarray::Array4::from_shape_fn(
            (1, 3, INPUT_SIZE, INPUT_SIZE),
            |(_, c, y, x)| {
                let src_x = (x as u32 * frame.width) / INPUT_SIZE as u32;
                let src_y = (y as u32 * frame.height) / INPUT_SIZE as u32;
                frame.pixel(src_x, src_y)[c] as f32 / 255.0
            },
        );
        array.into()
    }
}

#[async_trait]
impl Classifier for OnnxClassifier {
    async fn classify(&self, frame: &Frame) -> Result<Vec<Prediction>, ClassifyError> {
        if frame.width == 0 || frame.height == 0 {
            return Err(ClassifyError::BadFrame("zero-sized frame".into()));
        }
        let input = self.frame_to_tensor(frame);
        let outputs = self
            .model
            .run(tvec!(input.into()))
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;
        let scores = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let scores: Vec<f32> = scores.iter().copied().collect();
        if scores.len() != self.labels.len() {
            return Err(ClassifyError::Inference(format!(
                "model produced {} scores for {} classes",
                scores.len(),
                self.labels.len()
            )));
        }

        Ok(self
            .labels
            .iter()
            .zip(scores)
            .map(|(label, score)| Prediction::rounded(label.clone(), score))
            .collect())
    }

    fn class_count(&self) -> usize {
        self.labels.len()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}
