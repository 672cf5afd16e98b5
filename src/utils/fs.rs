use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::BoxResult;

/// Create a directory and any parent directories if they don't exist
pub fn create_directory<P: AsRef<Path>>(path: P) -> BoxResult<()> {
    fs::create_dir_all(path.as_ref())?;
    Ok(())
}

/// Read a file to string
pub fn read_file<P: AsRef<Path>>(path: P) -> BoxResult<String> {
    Ok(fs::read_to_string(path.as_ref())?)
}

/// Write a string to a file, creating parent directories as needed
pub fn write_file<P: AsRef<Path>>(path: P, contents: &str) -> BoxResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        create_directory(parent)?;
    }

    fs::write(path.as_ref(), contents)?;
    Ok(())
}

/// Check whether a path has one of the given extensions (case-insensitive)
pub fn has_extension<P: AsRef<Path>>(path: P, extensions: &[&str]) -> bool {
    path.as_ref()
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            extensions.iter().any(|candidate| *candidate == ext)
        })
        .unwrap_or(false)
}

/// Turn a path under `base` into a forward-slash route string
pub fn route_for<P: AsRef<Path>, B: AsRef<Path>>(path: P, base: B) -> String {
    let relative: PathBuf = path
        .as_ref()
        .strip_prefix(base.as_ref())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|_| path.as_ref().to_path_buf());

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
