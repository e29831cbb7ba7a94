use crate::capture::store::interface::{ArtifactStore, SavedArtifact};
use crate::geolocation::interface::Coordinates;
use image::RgbImage;
use std::path::PathBuf;
use std::sync::Mutex;

/// Keeps saves in memory.
#[derive(Default)]
pub struct ArtifactStoreFake {
    saved: Mutex<Vec<SavedArtifact>>,
}

impl ArtifactStoreFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<SavedArtifact> {
        self.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl ArtifactStore for ArtifactStoreFake {
    fn save(
        &self,
        index: u64,
        _frame: &RgbImage,
        coordinates: Option<Coordinates>,
    ) -> Result<SavedArtifact, Box<dyn std::error::Error + Send + Sync>> {
        let artifact = SavedArtifact {
            index,
            image_path: PathBuf::from(format!("pothole{}.jpg", index)),
            coordinates_path: coordinates.map(|_| PathBuf::from(format!("pothole{}.txt", index))),
        };
        self.saved
            .lock()
            .map_err(|_| "store poisoned")?
            .push(artifact.clone());
        Ok(artifact)
    }
}
