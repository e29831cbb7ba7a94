use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x: {}, y: {}, z: {}}}", self.x, self.y, self.z)
    }
}

/// One inertial sample. `gyro` is angular rate in degrees per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub accel: Vector3,
    pub gyro: Vector3,
}

pub trait SensorSource {
    fn read(&self) -> Result<SensorReading, Box<dyn std::error::Error + Send + Sync>>;
}
