use crate::geolocation::interface::Coordinates;
use image::RgbImage;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct SavedArtifact {
    pub index: u64,
    pub image_path: PathBuf,
    pub coordinates_path: Option<PathBuf>,
}

pub trait ArtifactStore {
    /// Persists one captured frame. The companion coordinates file is written
    /// only when `coordinates` is known.
    fn save(
        &self,
        index: u64,
        frame: &RgbImage,
        coordinates: Option<Coordinates>,
    ) -> Result<SavedArtifact, Box<dyn std::error::Error + Send + Sync>>;
}
