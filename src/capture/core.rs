use crate::config::CaptureConfig;
use crate::detector::interface::Detection;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Ignore,
    Annotate,
    AnnotateAndSave { index: u64 },
}

impl Decision {
    pub fn is_annotated(&self) -> bool {
        !matches!(self, Decision::Ignore)
    }
}

/// Confident, small enough for a pothole, and below the horizon band.
pub fn is_significant(detection: &Detection, frame_size: FrameSize, config: &CaptureConfig) -> bool {
    if detection.confidence < config.min_confidence {
        return false;
    }

    let frame_area = frame_size.area();
    if frame_area <= 0 {
        return false;
    }
    let area_ratio = detection.bbox.area() as f64 / frame_area as f64;
    if area_ratio > config.max_area_ratio {
        return false;
    }

    detection.bbox.y < config.max_box_y
}

/// Counters carried across frames of one video run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSession {
    pub frame_counter: u64,
    pub next_index: u64,
    pub last_save: Option<Instant>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) -> u64 {
        self.frame_counter += 1;
        self.frame_counter
    }

    pub fn saved_count(&self) -> u64 {
        self.next_index
    }

    /// Index 0 is never held back. Later saves wait for the cooldown.
    pub fn cooldown_elapsed(&self, now: Instant, cooldown: Duration) -> bool {
        if self.next_index == 0 {
            return true;
        }
        match self.last_save {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= cooldown,
        }
    }

    fn record_save(&mut self, now: Instant) -> u64 {
        let index = self.next_index;
        self.next_index += 1;
        self.last_save = Some(now);
        index
    }

    /// One decision per detection, in input order. A save updates the session
    /// before the next detection of the same frame is considered.
    pub fn decide(
        &mut self,
        detections: &[Detection],
        frame_size: FrameSize,
        now: Instant,
        config: &CaptureConfig,
    ) -> Vec<Decision> {
        detections
            .iter()
            .map(|detection| {
                if !is_significant(detection, frame_size, config) {
                    return Decision::Ignore;
                }
                if self.cooldown_elapsed(now, config.cooldown) {
                    Decision::AnnotateAndSave {
                        index: self.record_save(now),
                    }
                } else {
                    Decision::Annotate
                }
            })
            .collect()
    }
}
