use crate::display::interface::FrameDisplay;
use opencv::core::Mat;
use opencv::highgui;

/// OpenCV window. `wait_ms` of 0 blocks until a key is pressed.
pub struct DisplayHighgui {
    window_name: String,
    wait_ms: i32,
}

impl DisplayHighgui {
    pub fn new(window_name: &str, wait_ms: i32) -> Self {
        Self {
            window_name: window_name.to_string(),
            wait_ms,
        }
    }
}

pub fn key_from_code(code: i32) -> Option<char> {
    if code < 0 {
        return None;
    }
    char::from_u32((code & 0xFF) as u32)
}

impl FrameDisplay for DisplayHighgui {
    fn show(&mut self, frame: &Mat) -> Result<Option<char>, Box<dyn std::error::Error + Send + Sync>> {
        highgui::imshow(&self.window_name, frame)?;
        let code = highgui::wait_key(self.wait_ms)?;
        Ok(key_from_code(code))
    }

    fn close(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        highgui::destroy_all_windows()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_code() {
        assert_eq!(key_from_code(-1), None);
        assert_eq!(key_from_code(113), Some('q'));
        // modifier bits above the low byte are ignored
        assert_eq!(key_from_code(0x100000 | 113), Some('q'));
    }
}
