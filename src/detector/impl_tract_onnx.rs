use crate::detector::class_names::label_for;
use crate::detector::interface::{Detection, Detector};
use crate::detector::tract::decode::{decode_packed, decode_split, non_max_suppression};
use crate::detector::tract::image::image_to_tensor;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tract_onnx::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    /// (width, height)
    pub input_shape: (u32, u32),
}

/// YOLOv4-tiny exported to ONNX, run on CPU through tract.
pub struct DetectorTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    config: ModelConfig,
    class_names: Vec<String>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DetectorTractOnnx {
    pub fn new(
        config: ModelConfig,
        class_names: Vec<String>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("detector").with_namespace("tract");
        ensure_exists(&config.onnx_model_path)?;

        logger.info(&format!(
            "Loading model {}",
            config.onnx_model_path.display()
        ))?;

        let (width, height) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        logger.info(&format!(
            "Model loaded with {} class label(s)",
            class_names.len()
        ))?;

        Ok(Self {
            model,
            config,
            class_names,
            logger,
        })
    }
}

fn ensure_exists(path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if !path.exists() {
        return Err(format!("Model file does not exist: {}", path.display()).into());
    }
    Ok(())
}

impl Detector for DetectorTractOnnx {
    fn detect(
        &self,
        image: &DynamicImage,
        confidence_threshold: f32,
        nms_threshold: f32,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = self.config.input_shape;
        let input = image_to_tensor(image, width, height)?;

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;

        let candidates = match outputs.len() {
            0 => return Err("Model produced no outputs".into()),
            1 => decode_packed(
                outputs[0].to_array_view::<f32>()?,
                self.config.input_shape,
                confidence_threshold,
            )?,
            _ => decode_split(
                outputs[0].to_array_view::<f32>()?,
                outputs[1].to_array_view::<f32>()?,
                confidence_threshold,
            )?,
        };

        let kept = non_max_suppression(candidates, nms_threshold);

        let detections: Vec<Detection> = kept
            .iter()
            .map(|c| Detection {
                class_id: c.class_id,
                label: label_for(&self.class_names, c.class_id),
                confidence: c.score,
                bbox: c.to_bounding_box(image.width(), image.height()),
            })
            .collect();

        if !detections.is_empty() {
            self.logger
                .info(&format!("{} detection(s)", detections.len()))?;
        }

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_missing_model_is_an_error() {
        let config = ModelConfig {
            onnx_model_path: PathBuf::from("does/not/exist.onnx"),
            input_shape: (640, 480),
        };

        let result = DetectorTractOnnx::new(config, vec![], Arc::new(LoggerFake::new()));

        assert!(result.is_err());
    }
}
