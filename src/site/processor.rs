use std::path::{Path, PathBuf};

use log::{debug, error, info};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::page::{self, PageResult};
use crate::site::SiteReport;
use crate::toc::BuildOutcome;
use crate::utils::error::{BoxResult, TocsmithError};
use crate::utils::fs::{has_extension, read_file, route_for, write_file};

const PAGE_EXTENSIONS: [&str; 2] = ["html", "htm"];

/// Collect every HTML page under the site root
pub fn collect_pages(site_dir: &Path) -> BoxResult<Vec<PathBuf>> {
    if !site_dir.is_dir() {
        return Err(TocsmithError::Generic(format!(
            "Site directory does not exist: {}",
            site_dir.display()
        ))
        .into());
    }

    let pages = WalkDir::new(site_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                error!("Failed to read directory entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &PAGE_EXTENSIONS))
        .collect();

    Ok(pages)
}

/// Run the table of contents pass over one page file, writing it back if it changed
pub fn process_page(site_dir: &Path, path: &Path) -> BoxResult<PageResult> {
    let route = route_for(path, site_dir);
    let html = read_file(path)?;

    let result = page::process_html(&route, &html);
    if result.is_modified() {
        write_file(path, &result.html)?;
        debug!("Updated {}", path.display());
    }

    Ok(result)
}

/// Run the table of contents pass over every page of a built site.
///
/// Pages are independent and processed in parallel. A page that fails to
/// read or write is logged and counted; the rest of the site still runs.
pub fn process_site(site_dir: &Path) -> BoxResult<SiteReport> {
    info!("Building tables of contents in {}", site_dir.display());

    let pages = collect_pages(site_dir)?;
    debug!("Found {} pages", pages.len());

    let results: Vec<(PathBuf, BoxResult<PageResult>)> = pages
        .into_par_iter()
        .map(|path| {
            let result = process_page(site_dir, &path);
            (path, result)
        })
        .collect();

    let mut report = SiteReport::default();
    for (path, result) in results {
        match result {
            Ok(page) => report.record(&page),
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                report.failed.push(path);
            }
        }
    }

    info!("{}", report.summary());
    Ok(report)
}

impl SiteReport {
    pub(crate) fn record(&mut self, page: &PageResult) {
        self.pages += 1;
        let Some(outcome) = &page.outcome else {
            self.gated_out += 1;
            return;
        };

        self.skipped_headings += outcome.skipped().len();
        match outcome {
            BuildOutcome::Populated { .. } => self.populated += 1,
            BuildOutcome::Removed { .. } | BuildOutcome::Detached { .. } => self.removed += 1,
            BuildOutcome::Unchanged { .. } => self.untouched += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const WITH_HEADINGS: &str = r#"<div><nav data-toc></nav></div><h2><a class="anchor" id="a"></a>A</h2>"#;
    const WITHOUT_HEADINGS: &str = r#"<div><nav data-toc></nav></div><p>short</p>"#;

    fn write(dir: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_process_site() {
        let dir = TempDir::new().unwrap();
        let long = write(dir.path(), "posts/long/index.html", WITH_HEADINGS);
        let short = write(dir.path(), "posts/short/index.html", WITHOUT_HEADINGS);
        let about = write(dir.path(), "about/index.html", WITH_HEADINGS);
        write(dir.path(), "posts/long/style.css", "h2 { color: red }");

        let report = process_site(dir.path()).unwrap();

        assert_eq!(report.pages, 3);
        assert_eq!(report.populated, 1);
        assert_eq!(report.removed, 1);
        assert_eq!(report.gated_out, 1);
        assert!(report.failed.is_empty());

        assert!(fs::read_to_string(long)
            .unwrap()
            .contains("<nav data-toc><a href=\"#a\" data-depth=\"1\">A</a></nav>"));
        assert_eq!(fs::read_to_string(short).unwrap(), "<p>short</p>");
        assert_eq!(fs::read_to_string(about).unwrap(), WITH_HEADINGS);
    }

    #[test]
    fn test_missing_site_dir() {
        let dir = TempDir::new().unwrap();
        assert!(process_site(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_collect_pages_filters_extensions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.html", "");
        write(dir.path(), "b/c.htm", "");
        write(dir.path(), "b/d.js", "");

        let mut pages = collect_pages(dir.path()).unwrap();
        pages.sort();

        assert_eq!(pages, vec![dir.path().join("a.html"), dir.path().join("b/c.htm")]);
    }
}
