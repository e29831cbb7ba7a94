use std::path::{Path, PathBuf};

/// Resolves `path` against the working directory without touching the filesystem.
pub fn absolute_path(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

pub fn ensure_file_exists(path: &Path) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
    let absolute = absolute_path(path)?;
    if !absolute.is_file() {
        return Err(format!("File does not exist: {}", absolute.display()).into());
    }
    Ok(absolute)
}
