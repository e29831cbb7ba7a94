use crate::detector::interface::{Detection, Detector};
use image::DynamicImage;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the same detections for every frame, or fails with a fixed message.
pub struct DetectorFake {
    detections: Vec<Detection>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl DetectorFake {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self {
            detections,
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn failing(message: &str) -> Self {
        Self {
            detections: vec![],
            failure: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Detector for DetectorFake {
    fn detect(
        &self,
        _image: &DynamicImage,
        confidence_threshold: f32,
        _nms_threshold: f32,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }

        Ok(self
            .detections
            .iter()
            .filter(|d| d.confidence >= confidence_threshold)
            .cloned()
            .collect())
    }
}
