use image::DynamicImage;

pub const DEFAULT_LABEL: &str = "pothole";

/// Axis-aligned box in pixel coordinates of the source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_id: usize,
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

impl Detection {
    pub fn pothole(confidence: f32, bbox: BoundingBox) -> Self {
        Self {
            class_id: 0,
            label: DEFAULT_LABEL.to_string(),
            confidence,
            bbox,
        }
    }
}

pub trait Detector {
    /// Runs the model once. Detections below `confidence_threshold` are dropped and
    /// overlapping boxes of the same class are suppressed above `nms_threshold`.
    fn detect(
        &self,
        image: &DynamicImage,
        confidence_threshold: f32,
        nms_threshold: f32,
    ) -> Result<Vec<Detection>, Box<dyn std::error::Error + Send + Sync>>;
}
