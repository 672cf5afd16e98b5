use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::Config;
use crate::layout::PostLayout;
use crate::markdown::Post;
use crate::page::{self, PageResult};
use crate::site::SiteReport;
use crate::utils::error::{BoxResult, TocsmithError};
use crate::utils::fs::{has_extension, write_file};

const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdown"];

/// Options for rendering posts
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Render posts not marked as published
    pub unpublished: bool,
}

/// Summary of a post build
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    /// Routes written, relative to the destination
    pub rendered: Vec<String>,
    pub unpublished: usize,
    pub toc: SiteReport,
}

/// Render every markdown post into the destination and build its table of contents
pub fn build_posts(config: &Config, options: &BuildOptions) -> BoxResult<BuildReport> {
    let posts_dir = config.posts_path();
    if !posts_dir.is_dir() {
        return Err(TocsmithError::Config(format!(
            "Posts directory does not exist: {}",
            posts_dir.display()
        ))
        .into());
    }

    let layout = match config.layout_path() {
        Some(path) => PostLayout::from_file(&path)?,
        None => PostLayout::builtin()?,
    };

    let sources = collect_sources(&posts_dir);
    info!("Rendering {} posts from {}", sources.len(), posts_dir.display());

    let results: Vec<(PathBuf, BoxResult<Option<PageResult>>)> = sources
        .into_par_iter()
        .map(|path| {
            let result = render_post(&path, &layout, config, options);
            (path, result)
        })
        .collect();

    // Written in source order so a later post sharing a slug always wins
    let mut report = BuildReport::default();
    let mut seen = HashSet::new();
    for (path, result) in results {
        match result {
            Ok(Some(page)) => {
                if let Err(e) = write_file(config.destination.join(&page.route), &page.html) {
                    error!("Failed to write {}: {}", page.route, e);
                    report.toc.failed.push(path);
                    continue;
                }

                report.toc.record(&page);
                if seen.insert(page.route.clone()) {
                    report.rendered.push(page.route);
                } else {
                    warn!("{} overwrote an earlier post at {}", path.display(), page.route);
                }
            }
            Ok(None) => report.unpublished += 1,
            Err(e) => {
                error!("Failed to render {}: {}", path.display(), e);
                report.toc.failed.push(path);
            }
        }
    }

    info!(
        "Rendered {} posts into {} ({} unpublished skipped)",
        report.rendered.len(),
        config.destination.display(),
        report.unpublished
    );
    Ok(report)
}

fn collect_sources(posts_dir: &Path) -> Vec<PathBuf> {
    let mut sources: Vec<PathBuf> = WalkDir::new(posts_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &MARKDOWN_EXTENSIONS))
        .collect();
    sources.sort();
    sources
}

/// Render one post without writing it; `None` when it is unpublished and those are not wanted
fn render_post(
    path: &Path,
    layout: &PostLayout,
    config: &Config,
    options: &BuildOptions,
) -> BoxResult<Option<PageResult>> {
    let post = Post::load(path)?;
    if !post.metadata.published && !options.unpublished {
        info!("Skipping unpublished post '{}'", post.metadata.title);
        return Ok(None);
    }

    let html = layout.render(&post, &config.title)?;
    let route = post.route();

    // The page is complete here, which is when its table of contents is built
    Ok(Some(page::process_html(&route, &html)))
}
