use crate::config::Config;
use crate::detector::interface::Detector;
use crate::display::interface::FrameDisplay;
use crate::frame::rgb_image_to_mat;
use crate::library::logger::interface::Logger;
use crate::library::path::ensure_file_exists;
use crate::pipeline::annotate::draw_image_detection;
use crate::pipeline::lock;
use image::DynamicImage;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    /// `None` when inference failed and nothing was shown.
    pub detections: Option<usize>,
}

pub fn load_image(
    path: &Path,
    logger: &dyn Logger,
) -> Result<DynamicImage, Box<dyn std::error::Error + Send + Sync>> {
    logger.info(&format!("Checking file: {}", path.display()))?;
    let absolute = ensure_file_exists(path)?;

    image::open(&absolute)
        .map_err(|e| format!("Unable to load image {}: {}", absolute.display(), e).into())
}

pub struct ImagePipeline {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub detector: Arc<dyn Detector + Send + Sync>,
    pub display: Arc<Mutex<dyn FrameDisplay + Send>>,
}

impl ImagePipeline {
    /// Detects once, draws every result and waits on the display. Inference
    /// errors are logged and end the run without showing anything.
    pub fn run(&self, image: &DynamicImage) -> Result<ImageSummary, Box<dyn std::error::Error + Send + Sync>> {
        let detections = match self.detector.detect(
            image,
            self.config.image_detection.confidence_threshold,
            self.config.image_detection.nms_threshold,
        ) {
            Ok(detections) => detections,
            Err(e) => {
                self.logger
                    .error(&format!("An error occurred: {}", e))?;
                return Ok(ImageSummary { detections: None });
            }
        };

        self.logger
            .info(&format!("{} detection(s)", detections.len()))?;

        let mut frame = rgb_image_to_mat(&image.to_rgb8())?;
        for detection in &detections {
            draw_image_detection(&mut frame, detection)?;
        }

        let mut display = lock(&*self.display)?;
        display.show(&frame)?;
        display.close()?;

        Ok(ImageSummary {
            detections: Some(detections.len()),
        })
    }
}
