use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::markdown::engine::{create_comrak_options, render_markdown};
use crate::utils::error::BoxResult;
use crate::utils::fs;

lazy_static! {
    /// Metadata line hidden from rendering as a link reference: `[//]: # (key: value)`
    static ref METADATA_REGEX: Regex =
        Regex::new(r"(?m)^\[//\]: # \((?P<key>[^:()]+?):\s+(?P<value>.*?)\)\s*$").unwrap();

    static ref TITLE_HEADING_REGEX: Regex = Regex::new(r"(?m)^#\s+(.+?)\s*#*\s*$").unwrap();
}

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata embedded at the top of a markdown post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: String,
    pub published: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl PostMetadata {
    /// Metadata for a freshly started post
    pub fn draft(title: &str, created_at: NaiveDateTime) -> Self {
        Self {
            title: title.trim().to_string(),
            published: false,
            created_at: Some(created_at),
        }
    }

    /// Write the metadata back out as comment lines, one key per line
    pub fn to_markdown(&self) -> String {
        let mut header = metadata_line("title", &self.title);
        if let Some(created_at) = self.created_at {
            header.push_str(&metadata_line("created_at", created_at.format(DATE_FORMAT)));
        }
        header.push_str(&metadata_line("published", self.published));
        header
    }

    /// Read metadata lines; the first occurrence of a key wins
    pub fn from_markdown(source: &str, fallback_title: &str) -> Self {
        let mut values: HashMap<&str, &str> = HashMap::new();
        for cap in METADATA_REGEX.captures_iter(source) {
            if let (Some(key), Some(value)) = (cap.name("key"), cap.name("value")) {
                values.entry(key.as_str().trim()).or_insert(value.as_str());
            }
        }

        let title = values
            .get("title")
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .or_else(|| {
                TITLE_HEADING_REGEX
                    .captures(source)
                    .map(|cap| cap[1].to_string())
            })
            .unwrap_or_else(|| fallback_title.to_string());

        let published = match values.get("published") {
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!("Invalid published flag '{}' in post '{}'", value, title);
                false
            }),
            None => false,
        };

        let created_at = values.get("created_at").and_then(|value| {
            NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT)
                .map_err(|e| warn!("Invalid created_at '{}' in post '{}': {}", value, title, e))
                .ok()
        });

        Self {
            title,
            published,
            created_at,
        }
    }
}

fn metadata_line(key: &str, value: impl std::fmt::Display) -> String {
    format!("[//]: # ({}: {})\n", key, value)
}

/// A markdown blog post
#[derive(Debug, Clone)]
pub struct Post {
    pub metadata: PostMetadata,
    source: String,
}

impl Post {
    pub fn from_markdown(source: &str, fallback_title: &str) -> Self {
        let source = source.trim().to_string();
        let metadata = PostMetadata::from_markdown(&source, fallback_title);
        Self { metadata, source }
    }

    /// Load a post file; the file stem is the fallback title
    pub fn load(path: &Path) -> BoxResult<Self> {
        let source = fs::read_file(path)?;
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::from_markdown(&source, &stem))
    }

    pub fn to_html(&self) -> String {
        let options = create_comrak_options();
        render_markdown(&self.source, &options).trim().to_string()
    }

    /// Source of a new, unpublished post with its metadata header
    pub fn draft_source(title: &str, created_at: NaiveDateTime) -> String {
        let metadata = PostMetadata::draft(title, created_at);
        format!("{}\n# {}\n", metadata.to_markdown(), metadata.title)
    }

    pub fn slug(&self) -> String {
        slug::slugify(&self.metadata.title)
    }

    /// Route of the rendered page under the site root
    pub fn route(&self) -> String {
        format!("posts/{}/index.html", self.slug())
    }
}
