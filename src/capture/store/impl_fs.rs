use crate::capture::store::interface::{ArtifactStore, SavedArtifact};
use crate::geolocation::interface::Coordinates;
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

pub struct ArtifactStoreFs {
    dir: PathBuf,
}

impl ArtifactStoreFs {
    pub fn new(dir: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn image_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("pothole{}.jpg", index))
    }

    pub fn coordinates_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("pothole{}.txt", index))
    }
}

impl ArtifactStore for ArtifactStoreFs {
    fn save(
        &self,
        index: u64,
        frame: &RgbImage,
        coordinates: Option<Coordinates>,
    ) -> Result<SavedArtifact, Box<dyn std::error::Error + Send + Sync>> {
        let image_path = self.image_path(index);
        frame.save_with_format(&image_path, ImageFormat::Jpeg)?;

        let coordinates_path = match coordinates {
            Some(coordinates) => {
                let path = self.coordinates_path(index);
                std::fs::write(&path, coordinates.to_string())?;
                Some(path)
            }
            None => None,
        };

        Ok(SavedArtifact {
            index,
            image_path,
            coordinates_path,
        })
    }
}
