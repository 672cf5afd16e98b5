mod processor;

use std::path::PathBuf;

use serde::Serialize;

pub use processor::process_site;

/// Counts from one run over a built site
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteReport {
    pub pages: usize,
    /// Pages whose route is not a post
    pub gated_out: usize,
    pub populated: usize,
    pub removed: usize,
    /// Post pages without a container
    pub untouched: usize,
    pub skipped_headings: usize,
    pub failed: Vec<PathBuf>,
}

impl SiteReport {
    pub fn summary(&self) -> String {
        format!(
            "{} pages: {} populated, {} removed, {} untouched, {} not posts, {} headings skipped, {} failed",
            self.pages,
            self.populated,
            self.removed,
            self.untouched,
            self.gated_out,
            self.skipped_headings,
            self.failed.len()
        )
    }
}
