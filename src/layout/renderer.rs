use std::path::Path;

use liquid::model::Value;
use liquid::{Object, Parser, Template};
use log::debug;

use crate::markdown::Post;
use crate::utils::error::{BoxResult, TocsmithError};
use crate::utils::fs;

/// Layout used when the site does not configure one.
///
/// The `data-toc` mount point sits in its own wrapper so that a post without
/// headings loses the whole sidebar.
pub const DEFAULT_POST_LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title | escape }} | {{ site_title | escape }}</title>
<style>
nav[data-toc] a { display: block; }
nav[data-toc] a[data-depth="2"] { padding-left: 1em; }
nav[data-toc] a[data-depth="3"] { padding-left: 2em; }
nav[data-toc] a[data-depth="4"] { padding-left: 3em; }
nav[data-toc] a[data-depth="5"] { padding-left: 4em; }
</style>
</head>
<body>
<aside class="toc-wrapper">
<p class="toc-title">Contents</p>
<nav data-toc></nav>
</aside>
<article>
<header><h1>{{ title | escape }}</h1>{% if date %}<time>{{ date }}</time>{% endif %}</header>
{{ content }}
</article>
</body>
</html>
"#;

/// Liquid layout wrapping rendered posts into full pages
#[derive(Debug, Clone)]
pub struct PostLayout {
    name: String,
    source: String,
}

impl PostLayout {
    /// The built-in layout
    pub fn builtin() -> BoxResult<Self> {
        Self::from_source("default", DEFAULT_POST_LAYOUT)
    }

    /// Load a layout from a file
    pub fn from_file(path: &Path) -> BoxResult<Self> {
        debug!("Using layout: {}", path.display());
        let source = fs::read_file(path).map_err(|e| {
            TocsmithError::Template(format!("Failed to read layout {}: {}", path.display(), e))
        })?;
        Self::from_source(&path.display().to_string(), source)
    }

    /// Build a layout from template text, rejecting templates that do not parse
    pub fn from_source(name: &str, source: impl Into<String>) -> BoxResult<Self> {
        let layout = Self {
            name: name.to_string(),
            source: source.into(),
        };
        layout.parse()?;
        Ok(layout)
    }

    fn parse(&self) -> BoxResult<Template> {
        create_parser()?.parse(&self.source).map_err(|e| {
            TocsmithError::Template(format!("Failed to parse layout {}: {}", self.name, e)).into()
        })
    }

    /// Render a post into a complete page
    pub fn render(&self, post: &Post, site_title: &str) -> BoxResult<String> {
        let template = self.parse()?;

        let mut globals = Object::new();
        globals.insert("title".into(), Value::Scalar(post.metadata.title.clone().into()));
        globals.insert("site_title".into(), Value::Scalar(site_title.to_string().into()));
        globals.insert("content".into(), Value::Scalar(post.to_html().into()));
        globals.insert(
            "date".into(),
            match post.metadata.created_at {
                Some(created_at) => {
                    Value::Scalar(created_at.format("%Y-%m-%d").to_string().into())
                }
                None => Value::Nil,
            },
        );

        template.render(&globals).map_err(|e| {
            TocsmithError::Template(format!("Failed to render layout {}: {}", self.name, e)).into()
        })
    }
}

fn create_parser() -> BoxResult<Parser> {
    liquid::ParserBuilder::with_stdlib().build().map_err(|e| {
        TocsmithError::Template(format!("Failed to create Liquid parser: {}", e)).into()
    })
}
