use crate::config::SensorConfig;
use crate::sensor::interface::{SensorReading, SensorSource, Vector3};
use rand::distr::{Distribution, Uniform};

/// Uniform noise standing in for an accelerometer and gyroscope.
pub struct SensorSimulated {
    config: SensorConfig,
}

impl SensorSimulated {
    pub fn new(config: SensorConfig) -> Self {
        Self { config }
    }
}

fn sample_vector(
    range: (f64, f64),
) -> Result<Vector3, Box<dyn std::error::Error + Send + Sync>> {
    let mut rng = rand::rng();
    let dist = Uniform::new_inclusive(range.0, range.1)?;

    Ok(Vector3 {
        x: dist.sample(&mut rng),
        y: dist.sample(&mut rng),
        z: dist.sample(&mut rng),
    })
}

impl SensorSource for SensorSimulated {
    fn read(&self) -> Result<SensorReading, Box<dyn std::error::Error + Send + Sync>> {
        Ok(SensorReading {
            accel: sample_vector(self.config.accel_range)?,
            gyro: sample_vector(self.config.gyro_range)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn within(v: &Vector3, range: (f64, f64)) -> bool {
        [v.x, v.y, v.z]
            .iter()
            .all(|c| *c >= range.0 && *c <= range.1)
    }

    #[test]
    fn test_readings_stay_in_range() {
        let config = Config::default().sensor;
        let sensor = SensorSimulated::new(config.clone());

        for _ in 0..500 {
            let reading = sensor.read().unwrap();
            assert!(within(&reading.accel, config.accel_range));
            assert!(within(&reading.gyro, config.gyro_range));
        }
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let sensor = SensorSimulated::new(SensorConfig {
            accel_range: (1.0, -1.0),
            gyro_range: (-180.0, 180.0),
        });

        assert!(sensor.read().is_err());
    }
}
