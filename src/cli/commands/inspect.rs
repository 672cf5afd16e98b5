use std::path::Path;

use serde::Serialize;

use crate::document::HtmlDocument;
use crate::page;
use crate::toc::{BuildOutcome, Heading};
use crate::utils::error::BoxResult;
use crate::utils::fs::read_file;

/// What a table of contents pass would see and do on one page
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub route: String,
    pub is_post: bool,
    pub headings: Vec<Heading>,
    pub outcome: Option<BuildOutcome>,
}

/// Dry-run the lifecycle over a page
pub fn inspect_html(route: &str, html: &str) -> InspectReport {
    let mut document = HtmlDocument::parse(html);
    let headings = document.headings();
    let outcome = page::on_content_ready(route, &mut document);

    InspectReport {
        route: route.to_string(),
        is_post: page::is_post_route(route),
        headings,
        outcome,
    }
}

/// Handle the inspect command
pub fn handle_inspect_command(file: &Path, route: Option<&str>) -> BoxResult<()> {
    let html = read_file(file)?;
    let route = route
        .map(str::to_string)
        .unwrap_or_else(|| file.to_string_lossy().replace('\\', "/"));

    let report = inspect_html(&route, &html);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
