use crate::sensor::interface::{SensorReading, SensorSource, Vector3};

pub struct SensorFake {
    reading: SensorReading,
}

impl SensorFake {
    pub fn new() -> Self {
        let zero = Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        Self {
            reading: SensorReading {
                accel: zero,
                gyro: zero,
            },
        }
    }
}

impl SensorSource for SensorFake {
    fn read(&self) -> Result<SensorReading, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.reading)
    }
}
