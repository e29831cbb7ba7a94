use crate::capture::core::FrameSize;
use crate::capture::store::impl_fs::ArtifactStoreFs;
use crate::config::Config;
use crate::detector::class_names::load_class_names;
use crate::detector::impl_fake::DetectorFake;
use crate::detector::impl_tract_onnx::{DetectorTractOnnx, ModelConfig};
use crate::detector::interface::{BoundingBox, Detection, Detector};
use crate::display::impl_fake::DisplayFake;
use crate::display::impl_gui::DisplayGui;
use crate::display::impl_highgui::DisplayHighgui;
use crate::display::interface::FrameDisplay;
use crate::geolocation::impl_fake::GeolocationFake;
use crate::geolocation::impl_ipinfo::GeolocationIpInfo;
use crate::geolocation::interface::{Coordinates, Geolocation};
use crate::library::logger::interface::Logger;
use crate::pipeline::image::{load_image, ImagePipeline};
use crate::pipeline::video::{VideoPipeline, VideoSummary};
use crate::sensor::impl_simulated::SensorSimulated;
use crate::sensor::log::SensorLog;
use crate::video::impl_fake::VideoSourceFake;
use crate::video::impl_opencv::{VideoSinkOpenCv, VideoSourceOpenCv};
use crate::video::interface::VideoSource;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Video,
    Image,
    /// Synthetic frames and a canned detection, no model or network needed.
    Demo,
}

impl Mode {
    pub fn parse(arg: Option<&str>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        match arg {
            None | Some("video") => Ok(Mode::Video),
            Some("image") => Ok(Mode::Image),
            Some("demo") => Ok(Mode::Demo),
            Some(other) => Err(format!(
                "Unknown mode {:?}\nusage: pothole-detector [video|image|demo] [PATH]",
                other
            )
            .into()),
        }
    }
}

const DEMO_FRAMES: usize = 10;

pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl App {
    pub fn new(config: Config, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self { config, logger }
    }

    pub fn start(&self, mode: Mode) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        match mode {
            Mode::Video => {
                let source = VideoSourceOpenCv::open(&self.config.video_path, self.logger.clone())?;
                let detector = self.load_detector()?;
                let coordinates = self.locate(&GeolocationIpInfo::new(
                    &self.config.geolocation_url,
                    self.config.geolocation_timeout,
                    self.logger.clone(),
                ));
                let display = DisplayHighgui::new("frame", 1);
                self.run_video(source, detector, coordinates, display)?;
            }
            Mode::Image => {
                let image = load_image(&self.config.image_path, self.logger.as_ref())?;
                let detector = self.load_detector()?;
                let pipeline = ImagePipeline {
                    config: self.config.clone(),
                    logger: self.logger.with_namespace("image"),
                    detector,
                    display: Arc::new(Mutex::new(DisplayGui::new("Detection"))),
                };
                pipeline.run(&image)?;
            }
            Mode::Demo => {
                let source = VideoSourceFake::new(FrameSize::new(640, 480), DEMO_FRAMES);
                let detector = Arc::new(DetectorFake::new(vec![Detection::pothole(
                    0.9,
                    BoundingBox::new(10, 10, 50, 50),
                )]));
                let coordinates = self.locate(&GeolocationFake::unavailable());
                self.run_video(source, detector, coordinates, DisplayFake::headless())?;
            }
        }
        Ok(())
    }

    fn load_detector(&self) -> Result<Arc<dyn Detector + Send + Sync>, Box<dyn std::error::Error + Send + Sync>> {
        let class_names = load_class_names(&self.config.class_names_path)?;
        let detector = DetectorTractOnnx::new(
            ModelConfig {
                onnx_model_path: self.config.model_path.clone(),
                input_shape: self.config.model_input_size,
            },
            class_names,
            self.logger.clone(),
        )?;
        Ok(Arc::new(detector))
    }

    /// Best effort, queried once per run.
    fn locate(&self, geolocation: &dyn Geolocation) -> Option<Coordinates> {
        match geolocation.locate() {
            Ok(coordinates) => Some(coordinates),
            Err(e) => {
                let _ = self.logger.error(&format!("Geocoder failed: {}", e));
                None
            }
        }
    }

    fn run_video(
        &self,
        source: impl VideoSource + Send + 'static,
        detector: Arc<dyn Detector + Send + Sync>,
        coordinates: Option<Coordinates>,
        display: impl FrameDisplay + Send + 'static,
    ) -> Result<VideoSummary, Box<dyn std::error::Error + Send + Sync>> {
        let store = ArtifactStoreFs::new(&self.config.output_dir)?;
        let sink = VideoSinkOpenCv::create(
            &self.config.output_video_path(),
            self.config.output_fps,
            source.frame_size(),
            self.logger.clone(),
        )?;

        let pipeline = VideoPipeline {
            config: self.config.clone(),
            logger: self.logger.with_namespace("video"),
            source: Arc::new(Mutex::new(source)),
            sink: Arc::new(Mutex::new(sink)),
            display: Arc::new(Mutex::new(display)),
            detector,
            sensor: Arc::new(SensorSimulated::new(self.config.sensor.clone())),
            sensor_log: SensorLog::new(&self.config.sensor_log_path()),
            store: Arc::new(store),
            coordinates,
        };

        pipeline.run()
    }
}
