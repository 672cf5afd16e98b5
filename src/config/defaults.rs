use std::path::PathBuf;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default destination directory
pub fn default_destination() -> PathBuf {
    PathBuf::from("_site")
}

/// Default directory of markdown posts, relative to the source
pub fn default_posts_dir() -> PathBuf {
    PathBuf::from("_posts")
}

/// Default site title
pub fn default_site_title() -> String {
    "My Blog".to_string()
}
