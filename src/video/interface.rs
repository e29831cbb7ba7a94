use crate::capture::core::FrameSize;
use opencv::core::Mat;

pub trait VideoSource {
    fn frame_size(&self) -> FrameSize;
    /// `Ok(None)` once the stream has no more frames.
    fn read_frame(&mut self) -> Result<Option<Mat>, Box<dyn std::error::Error + Send + Sync>>;
    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

pub trait VideoSink {
    fn write_frame(&mut self, frame: &Mat) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn release(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
