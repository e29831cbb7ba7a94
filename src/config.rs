use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DetectionConfig {
    pub confidence_threshold: f32,
    pub nms_threshold: f32,
}

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub min_confidence: f32,
    pub max_area_ratio: f64,
    pub max_box_y: i32,
    pub cooldown: Duration,
}

#[derive(Debug, Clone)]
pub struct SensorConfig {
    pub accel_range: (f64, f64),
    pub gyro_range: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub video_path: PathBuf,
    pub image_path: PathBuf,
    pub model_path: PathBuf,
    pub class_names_path: PathBuf,
    pub model_input_size: (u32, u32),
    pub output_dir: PathBuf,
    pub output_video_name: String,
    pub output_fps: f64,
    pub sensor_log_name: String,
    pub video_detection: DetectionConfig,
    pub image_detection: DetectionConfig,
    pub capture: CaptureConfig,
    pub sensor: SensorConfig,
    pub quit_key: char,
    pub geolocation_url: String,
    pub geolocation_timeout: Duration,
    pub logger_timezone: chrono::FixedOffset,
}

impl Config {
    pub fn output_video_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_video_name)
    }

    pub fn sensor_log_path(&self) -> PathBuf {
        self.output_dir.join(&self.sensor_log_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video_path: PathBuf::from("test.mp4"),
            image_path: PathBuf::from("img1.jpg"),
            model_path: PathBuf::from("project_files/yolov4_tiny.onnx"),
            class_names_path: PathBuf::from("project_files/obj.names"),
            // (width, height)
            model_input_size: (640, 480),
            output_dir: PathBuf::from("pothole_coordinates"),
            output_video_name: "result.avi".to_string(),
            output_fps: 10.0,
            sensor_log_name: "sensor_data.log".to_string(),
            video_detection: DetectionConfig {
                confidence_threshold: 0.5,
                nms_threshold: 0.4,
            },
            image_detection: DetectionConfig {
                confidence_threshold: 0.6,
                nms_threshold: 0.4,
            },
            capture: CaptureConfig {
                min_confidence: 0.7,
                max_area_ratio: 0.1,
                max_box_y: 600,
                cooldown: Duration::from_secs(2),
            },
            sensor: SensorConfig {
                accel_range: (-1.0, 1.0),
                gyro_range: (-180.0, 180.0),
            },
            quit_key: 'q',
            geolocation_url: "https://ipinfo.io/json".to_string(),
            geolocation_timeout: Duration::from_secs(5),
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap_or_else(|| chrono::Utc.fix())
}
