use crate::capture::core::FrameSize;
use crate::frame::blank_frame;
#[cfg(test)]
use crate::video::interface::VideoSink;
use crate::video::interface::VideoSource;
use opencv::core::Mat;

/// Yields a fixed number of black frames.
pub struct VideoSourceFake {
    frame_size: FrameSize,
    remaining: usize,
    released: bool,
}

impl VideoSourceFake {
    pub fn new(frame_size: FrameSize, frame_count: usize) -> Self {
        Self {
            frame_size,
            remaining: frame_count,
            released: false,
        }
    }

    #[cfg(test)]
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl VideoSource for VideoSourceFake {
    fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    fn read_frame(&mut self) -> Result<Option<Mat>, Box<dyn std::error::Error + Send + Sync>> {
        if self.released || self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some(blank_frame(
            self.frame_size.width,
            self.frame_size.height,
        )?))
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.released = true;
        Ok(())
    }
}

/// Counts written frames and rejects writes after release.
#[cfg(test)]
#[derive(Default)]
pub struct VideoSinkFake {
    pub written: usize,
    pub released: bool,
}

#[cfg(test)]
impl VideoSinkFake {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl VideoSink for VideoSinkFake {
    fn write_frame(&mut self, _frame: &Mat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.released {
            return Err("Write after release".into());
        }
        self.written += 1;
        Ok(())
    }

    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.released = true;
        Ok(())
    }
}
