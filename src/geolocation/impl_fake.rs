use crate::geolocation::interface::{Coordinates, Geolocation};

pub struct GeolocationFake {
    coordinates: Option<Coordinates>,
}

impl GeolocationFake {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates: Some(coordinates),
        }
    }

    pub fn unavailable() -> Self {
        Self { coordinates: None }
    }
}

impl Geolocation for GeolocationFake {
    fn locate(&self) -> Result<Coordinates, Box<dyn std::error::Error + Send + Sync>> {
        self.coordinates
            .ok_or_else(|| "Geolocation unavailable".into())
    }
}
