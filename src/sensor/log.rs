use crate::sensor::interface::SensorReading;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn format_line(frame: u64, reading: &SensorReading) -> String {
    format!(
        "Frame {}: Accel {}, Gyro {}",
        frame, reading.accel, reading.gyro
    )
}

/// Append-only text log, one line per frame. The file is reopened for each
/// line so nothing is held open between frames.
pub struct SensorLog {
    path: PathBuf,
}

impl SensorLog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn append(
        &self,
        frame: u64,
        reading: &SensorReading,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_line(frame, reading))?;
        Ok(())
    }
}
