use log::debug;
use serde::Serialize;

use crate::document::HtmlDocument;
use crate::toc::BuildOutcome;

/// Route segment identifying a post detail page
pub const POST_ROUTE_SEGMENT: &str = "posts/";

/// Whether a page route is a post detail view
pub fn is_post_route(route: &str) -> bool {
    route.replace('\\', "/").contains(POST_ROUTE_SEGMENT)
}

/// Called once per page when its content is fully rendered.
///
/// Returns `None` without touching the document when the route is not a post.
pub fn on_content_ready(route: &str, document: &mut HtmlDocument) -> Option<BuildOutcome> {
    if !is_post_route(route) {
        debug!("Skipping {}: not a post page", route);
        return None;
    }

    let outcome = document.build_toc();
    debug!(
        "Table of contents for {}: {} entries, {} skipped",
        route,
        outcome.entries().len(),
        outcome.skipped().len()
    );
    Some(outcome)
}

/// Result of running the lifecycle over one page of markup
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub route: String,
    #[serde(skip)]
    pub html: String,
    /// `None` when the page was gated out
    pub outcome: Option<BuildOutcome>,
}

impl PageResult {
    pub fn is_modified(&self) -> bool {
        self.outcome.as_ref().map_or(false, BuildOutcome::is_modified)
    }
}

/// Run the lifecycle over a page given as a string
pub fn process_html(route: &str, html: &str) -> PageResult {
    let mut document = HtmlDocument::parse(html);
    let outcome = on_content_ready(route, &mut document);

    PageResult {
        route: route.to_string(),
        html: document.into_string(),
        outcome,
    }
}
