use crate::display::interface::FrameDisplay;
use opencv::core::Mat;
use std::collections::VecDeque;

/// Headless display. Replays scripted key presses, one per shown frame.
#[derive(Default)]
pub struct DisplayFake {
    keys: VecDeque<Option<char>>,
    pub shown: usize,
    pub closed: bool,
}

impl DisplayFake {
    pub fn headless() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_keys(keys: Vec<Option<char>>) -> Self {
        Self {
            keys: keys.into(),
            ..Self::default()
        }
    }
}

impl FrameDisplay for DisplayFake {
    fn show(&mut self, _frame: &Mat) -> Result<Option<char>, Box<dyn std::error::Error + Send + Sync>> {
        self.shown += 1;
        Ok(self.keys.pop_front().flatten())
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.closed = true;
        Ok(())
    }
}
