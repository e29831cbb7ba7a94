use opencv::core::Mat;

pub trait FrameDisplay {
    /// Shows the frame and returns the key pressed while it was up, if any.
    fn show(&mut self, frame: &Mat) -> Result<Option<char>, Box<dyn std::error::Error + Send + Sync>>;

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
