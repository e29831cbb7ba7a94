use crate::capture::core::{CaptureSession, Decision, FrameSize};
use crate::capture::store::interface::ArtifactStore;
use crate::config::Config;
use crate::detector::interface::{Detection, Detector};
use crate::display::interface::FrameDisplay;
use crate::frame::mat_to_rgb_image;
use crate::geolocation::interface::Coordinates;
use crate::library::logger::interface::Logger;
use crate::pipeline::annotate::{draw_fps, draw_video_detection};
use crate::pipeline::lock;
use crate::sensor::interface::SensorSource;
use crate::sensor::log::SensorLog;
use crate::video::interface::{VideoSink, VideoSource};
use image::DynamicImage;
use opencv::core::Mat;
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    EndOfStream,
    QuitRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    pub frames: u64,
    pub saved: u64,
    pub stop: Stop,
}

enum LoopState {
    Reading,
    Processing(Mat),
    Terminal(Stop),
}

pub struct VideoPipeline {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub source: Arc<Mutex<dyn VideoSource + Send>>,
    pub sink: Arc<Mutex<dyn VideoSink + Send>>,
    pub display: Arc<Mutex<dyn FrameDisplay + Send>>,
    pub detector: Arc<dyn Detector + Send + Sync>,
    pub sensor: Arc<dyn SensorSource + Send + Sync>,
    pub sensor_log: SensorLog,
    pub store: Arc<dyn ArtifactStore + Send + Sync>,
    pub coordinates: Option<Coordinates>,
}

impl VideoPipeline {
    pub fn run(&self) -> Result<VideoSummary, Box<dyn std::error::Error + Send + Sync>> {
        let mut session = CaptureSession::new();
        let frame_size = lock(&*self.source)?.frame_size();
        let started = Instant::now();

        let mut state = LoopState::Reading;
        let stop = loop {
            state = match state {
                LoopState::Reading => match lock(&*self.source)?.read_frame()? {
                    Some(frame) => LoopState::Processing(frame),
                    None => {
                        self.logger
                            .info("End of video stream or cannot fetch the frame.")?;
                        LoopState::Terminal(Stop::EndOfStream)
                    }
                },
                LoopState::Processing(frame) => {
                    let key = self.process_frame(&mut session, frame, frame_size, started)?;
                    if key == Some(self.config.quit_key) {
                        self.logger.info("Quitting the video processing loop.")?;
                        LoopState::Terminal(Stop::QuitRequested)
                    } else {
                        LoopState::Reading
                    }
                }
                LoopState::Terminal(stop) => break stop,
            };
        };

        lock(&*self.source)?.release()?;
        lock(&*self.sink)?.release()?;
        lock(&*self.display)?.close()?;

        let summary = VideoSummary {
            frames: session.frame_counter,
            saved: session.saved_count(),
            stop,
        };
        self.logger.info(&format!(
            "Processed {} frame(s), saved {} capture(s)",
            summary.frames, summary.saved
        ))?;

        Ok(summary)
    }

    /// Runs one frame through sensing, detection, capture and output. Returns
    /// the key pressed while the frame was displayed.
    fn process_frame(
        &self,
        session: &mut CaptureSession,
        mut frame: Mat,
        frame_size: FrameSize,
        started: Instant,
    ) -> Result<Option<char>, Box<dyn std::error::Error + Send + Sync>> {
        let frame_number = session.begin_frame();

        self.record_sensors(frame_number)?;

        let detections = self.detect(&frame)?;
        let decisions = session.decide(
            &detections,
            frame_size,
            Instant::now(),
            &self.config.capture,
        );

        for (detection, decision) in detections.iter().zip(decisions) {
            if !decision.is_annotated() {
                continue;
            }
            draw_video_detection(&mut frame, detection)?;

            if let Decision::AnnotateAndSave { index } = decision {
                self.save(index, &frame)?;
            }
        }

        let elapsed = started.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            frame_number as f64 / elapsed
        } else {
            0.0
        };
        draw_fps(&mut frame, fps)?;

        let key = lock(&*self.display)?.show(&frame)?;
        lock(&*self.sink)?.write_frame(&frame)?;
        Ok(key)
    }

    fn record_sensors(&self, frame_number: u64) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let reading = match self.sensor.read() {
            Ok(reading) => reading,
            Err(e) => {
                self.logger.error(&format!("Sensor read failed: {}", e))?;
                return Ok(());
            }
        };

        self.logger
            .info(&format!("Simulated accelerometer data: {}", reading.accel))?;
        self.logger
            .info(&format!("Simulated gyroscope data: {}", reading.gyro))?;

        if let Err(e) = self.sensor_log.append(frame_number, &reading) {
            self.logger
                .error(&format!("Failed to append sensor log: {}", e))?;
        }
        Ok(())
    }

    fn detect(&self, frame: &Mat) -> Result<Vec<Detection>, Box<dyn std::error::Error + Send + Sync>> {
        let image = DynamicImage::ImageRgb8(mat_to_rgb_image(frame)?);
        self.detector.detect(
            &image,
            self.config.video_detection.confidence_threshold,
            self.config.video_detection.nms_threshold,
        )
    }

    /// Write failures are logged and the loop carries on.
    fn save(&self, index: u64, frame: &Mat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let saved = mat_to_rgb_image(frame)
            .and_then(|rgb| self.store.save(index, &rgb, self.coordinates));

        match saved {
            Ok(artifact) => self.logger.info(&format!(
                "Saved capture {} to {}",
                artifact.index,
                artifact.image_path.display()
            )),
            Err(e) => self
                .logger
                .error(&format!("Failed to save capture {}: {}", index, e)),
        }
    }
}
