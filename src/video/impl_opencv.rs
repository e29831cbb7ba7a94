use crate::capture::core::FrameSize;
use crate::library::logger::interface::Logger;
use crate::library::path::ensure_file_exists;
use crate::video::interface::{VideoSink, VideoSource};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, VideoWriter};
use std::path::Path;
use std::sync::Arc;

pub struct VideoSourceOpenCv {
    capture: VideoCapture,
    frame_size: FrameSize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl VideoSourceOpenCv {
    pub fn open(
        path: &Path,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("video").with_namespace("source");
        logger.info(&format!("Checking file: {}", path.display()))?;

        let absolute = ensure_file_exists(path)?;
        let path_str = absolute
            .to_str()
            .ok_or_else(|| format!("Path is not valid UTF-8: {}", absolute.display()))?;

        let capture = VideoCapture::from_file(path_str, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(format!("Video file could not be opened: {}", absolute.display()).into());
        }

        let frame_size = FrameSize::new(
            capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32,
            capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32,
        );
        logger.info(&format!(
            "Opened {} ({}x{})",
            absolute.display(),
            frame_size.width,
            frame_size.height
        ))?;

        Ok(Self {
            capture,
            frame_size,
            logger,
        })
    }
}

impl VideoSource for VideoSourceOpenCv {
    fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    fn read_frame(&mut self) -> Result<Option<Mat>, Box<dyn std::error::Error + Send + Sync>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.capture.release()?;
        self.logger.info("Input released")?;
        Ok(())
    }
}

/// Motion-JPEG AVI writer.
pub struct VideoSinkOpenCv {
    writer: VideoWriter,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl VideoSinkOpenCv {
    pub fn create(
        path: &Path,
        fps: f64,
        frame_size: FrameSize,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let logger = logger.with_namespace("video").with_namespace("sink");
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Path is not valid UTF-8: {}", path.display()))?;

        let writer = VideoWriter::new(
            path_str,
            VideoWriter::fourcc('M', 'J', 'P', 'G')?,
            fps,
            Size::new(frame_size.width as i32, frame_size.height as i32),
            true,
        )?;
        if !writer.is_opened()? {
            return Err(format!("Output video could not be created: {}", path.display()).into());
        }

        logger.info(&format!("Writing {}", path.display()))?;

        Ok(Self { writer, logger })
    }
}

impl VideoSink for VideoSinkOpenCv {
    fn write_frame(&mut self, frame: &Mat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.writer.write(frame)?;
        Ok(())
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.writer.release()?;
        self.logger.info("Output released")?;
        Ok(())
    }
}
