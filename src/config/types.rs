use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Site configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Site source directory
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Directory the built site is written to
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Markdown posts, relative to the source
    #[serde(default = "defaults::default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Liquid layout for post pages, relative to the source
    #[serde(default)]
    pub layout: Option<PathBuf>,

    /// Site title
    #[serde(default = "defaults::default_site_title")]
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: defaults::default_source(),
            destination: defaults::default_destination(),
            posts_dir: defaults::default_posts_dir(),
            layout: None,
            title: defaults::default_site_title(),
        }
    }
}

impl Config {
    /// Absolute-or-cwd-relative path of the posts directory
    pub fn posts_path(&self) -> PathBuf {
        self.source.join(&self.posts_dir)
    }

    pub fn layout_path(&self) -> Option<PathBuf> {
        self.layout.as_ref().map(|layout| self.source.join(layout))
    }
}
