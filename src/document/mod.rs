//! Rendered HTML pages as seen by the table of contents pass.
//!
//! [`HtmlDocument`] indexes the elements of a page once, hands out the
//! heading descriptors and the container handle the builder works on, and
//! splices the recorded edits back into the markup on [`HtmlDocument::commit`].

mod scanner;
mod text;

use std::ops::Range;

use log::debug;

use crate::toc::{BuildOutcome, Heading, HeadingLevel, TocBuilder, TocContainer, TocEntry};

pub use scanner::{scan, Element};
pub use text::text_content;

/// Attribute marking the table of contents mount point
pub const TOC_MARKER: &str = "data-toc";

/// Class of the element nested in a heading that carries its anchor id
pub const ANCHOR_CLASS: &str = "anchor";

/// A rendered page together with its element index
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    source: String,
    elements: Vec<Element>,
}

impl HtmlDocument {
    pub fn parse(html: impl Into<String>) -> Self {
        let source = html.into();
        let elements = scan(&source);
        Self { source, elements }
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn into_string(self) -> String {
        self.source
    }

    /// All `h2`-`h6` headings in document order
    pub fn headings(&self) -> Vec<Heading> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(idx, element)| {
                let level = HeadingLevel::from_tag(&element.name)?;
                let label = text_content(&self.source[element.inner()]);
                let anchor = self.anchor_within(idx);
                Some(Heading::new(level, label, anchor))
            })
            .collect()
    }

    /// Id of the first descendant of `idx` carrying the anchor class
    fn anchor_within(&self, idx: usize) -> Option<String> {
        let end = self.elements[idx].end;
        self.elements[idx + 1..]
            .iter()
            .take_while(|descendant| descendant.open.start < end)
            .find(|descendant| descendant.has_class(ANCHOR_CLASS))
            .and_then(|anchor| anchor.attr("id"))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Handle on the first element marked with [`TOC_MARKER`]
    pub fn container(&self) -> Option<MarkupContainer> {
        let element = self.elements.iter().find(|e| e.has_attr(TOC_MARKER))?;

        // Without an element parent only the container itself can go
        let parent_range = element
            .parent
            .map(|parent| self.elements[parent].outer())
            .unwrap_or_else(|| element.outer());

        Some(MarkupContainer {
            tag: element.name.clone(),
            open: element.open.clone(),
            insert_at: element.inner().end,
            self_closing: element.self_closing,
            own_range: element.outer(),
            parent_range,
            appended: String::new(),
            removal: None,
        })
    }

    /// Apply the edits recorded on a container. Returns whether the page changed.
    pub fn commit(&mut self, container: MarkupContainer) -> bool {
        if let Some(removal) = container.removal {
            self.source.replace_range(removal, "");
        } else if container.appended.is_empty() {
            return false;
        } else if container.self_closing {
            let tag_text = &self.source[container.open.clone()];
            let start_tag = tag_text
                .strip_suffix("/>")
                .unwrap_or(tag_text)
                .trim_end();
            let expanded = format!(
                "{}>{}</{}>",
                start_tag, container.appended, container.tag
            );
            self.source.replace_range(container.open, &expanded);
        } else {
            self.source.insert_str(container.insert_at, &container.appended);
        }

        self.elements = scan(&self.source);
        true
    }

    /// Run one table of contents pass over this page
    pub fn build_toc(&mut self) -> BuildOutcome {
        let headings = self.headings();
        debug!("Found {} headings", headings.len());

        let mut container = self.container();
        let outcome = TocBuilder::build(headings, container.as_mut());

        if let Some(container) = container {
            self.commit(container);
        }
        outcome
    }
}

/// Container located in page markup; records edits until committed
#[derive(Debug, Clone)]
pub struct MarkupContainer {
    tag: String,
    open: Range<usize>,
    insert_at: usize,
    self_closing: bool,
    own_range: Range<usize>,
    parent_range: Range<usize>,
    appended: String,
    removal: Option<Range<usize>>,
}

impl TocContainer for MarkupContainer {
    fn append(&mut self, entry: &TocEntry) {
        self.appended.push_str(&entry.to_html());
    }

    fn remove_with_parent(&mut self) {
        self.removal = Some(self.parent_range.clone());
    }

    fn remove(&mut self) {
        self.removal = Some(self.own_range.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = r##"<html><body>
<aside class="toc-wrapper"><nav data-toc></nav></aside>
<article>
<h1>Title</h1>
<h2><a href="#a" aria-hidden="true" class="anchor" id="a"></a>A</h2>
<p>text</p>
<h3><a href="#b" aria-hidden="true" class="anchor" id="b"></a>B</h3>
<h2><a href="#c" aria-hidden="true" class="anchor" id="c"></a>C</h2>
</article>
</body></html>"##;

    #[test]
    fn test_headings_in_document_order() {
        let doc = HtmlDocument::parse(POST);
        let headings = doc.headings();

        let summary: Vec<(u8, &str, Option<&str>)> = headings
            .iter()
            .map(|h| (h.level.get(), h.label.as_str(), h.anchor.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![(2, "A", Some("a")), (3, "B", Some("b")), (2, "C", Some("c"))]
        );
    }

    #[test]
    fn test_populates_container() {
        let mut doc = HtmlDocument::parse(POST);

        let outcome = doc.build_toc();

        assert_eq!(outcome.entries().len(), 3);
        assert!(doc.as_str().contains(concat!(
            "<nav data-toc>",
            "<a href=\"#a\" data-depth=\"1\">A</a>",
            "<a href=\"#b\" data-depth=\"2\">B</a>",
            "<a href=\"#c\" data-depth=\"1\">C</a>",
            "</nav>"
        )));
    }

    #[test]
    fn test_empty_post_removes_container_and_parent() {
        let html = r#"<body><aside class="toc-wrapper"><nav data-toc></nav></aside><article><h1>Only a title</h1></article></body>"#;
        let mut doc = HtmlDocument::parse(html);

        let outcome = doc.build_toc();

        assert!(matches!(outcome, BuildOutcome::Removed { .. }));
        assert_eq!(doc.as_str(), "<body><article><h1>Only a title</h1></article></body>");
        assert!(doc.container().is_none());
    }

    #[test]
    fn test_rerun_after_removal_is_noop() {
        let html = r#"<div><ul data-toc></ul></div><p>no headings</p>"#;
        let mut doc = HtmlDocument::parse(html);
        doc.build_toc();
        let after_first = doc.as_str().to_string();

        let outcome = doc.build_toc();

        assert!(!outcome.is_modified());
        assert_eq!(doc.as_str(), after_first);
        assert_eq!(after_first, "<p>no headings</p>");
    }

    #[test]
    fn test_top_level_container_removes_only_itself() {
        let mut doc = HtmlDocument::parse("<nav data-toc></nav><p>x</p>");
        doc.build_toc();
        assert_eq!(doc.as_str(), "<p>x</p>");
    }

    #[test]
    fn test_heading_without_anchor_is_skipped() {
        let html = r#"<div><nav data-toc></nav></div>
<h2>Plain</h2>
<h2><span class="anchor" id="kept"></span>Kept</h2>"#;
        let mut doc = HtmlDocument::parse(html);

        let outcome = doc.build_toc();

        assert_eq!(outcome.skipped().len(), 1);
        assert_eq!(outcome.entries().len(), 1);
        assert!(doc
            .as_str()
            .contains("<nav data-toc><a href=\"#kept\" data-depth=\"1\">Kept</a></nav>"));
    }

    #[test]
    fn test_unlinkable_headings_keep_surrounding_content() {
        let html = "<article><nav data-toc></nav><h2>Plain</h2><p>Body text</p></article><footer>f</footer>";
        let mut doc = HtmlDocument::parse(html);

        let outcome = doc.build_toc();

        assert!(matches!(outcome, BuildOutcome::Detached { .. }));
        assert_eq!(outcome.skipped().len(), 1);
        assert_eq!(
            doc.as_str(),
            "<article><h2>Plain</h2><p>Body text</p></article><footer>f</footer>"
        );
        assert!(doc.container().is_none());
    }

    #[test]
    fn test_slash_on_html_container_is_ignored() {
        let html = r#"<div><div data-toc /></div><h4><a class="anchor" id="d"></a>Deep</h4>"#;
        let mut doc = HtmlDocument::parse(html);

        doc.build_toc();

        assert!(doc.as_str().starts_with(
            "<div><div data-toc /><a href=\"#d\" data-depth=\"3\">Deep</a></div>"
        ));
    }

    #[test]
    fn test_self_closing_svg_container_is_expanded() {
        let html = r#"<div><svg><g data-toc/></svg></div><h2><a class="anchor" id="s"></a>S</h2>"#;
        let mut doc = HtmlDocument::parse(html);

        doc.build_toc();

        assert!(doc.as_str().starts_with(
            "<div><svg><g data-toc><a href=\"#s\" data-depth=\"1\">S</a></g></svg></div>"
        ));
    }

    #[test]
    fn test_rerun_with_entries_duplicates() {
        let html = r#"<div><nav data-toc></nav></div><h2><a class="anchor" id="a"></a>A</h2>"#;
        let mut doc = HtmlDocument::parse(html);

        doc.build_toc();
        doc.build_toc();

        assert_eq!(doc.as_str().matches("href=\"#a\" data-depth").count(), 2);
    }

    #[test]
    fn test_missing_container_leaves_page_alone() {
        let html = r#"<h2><a class="anchor" id="a"></a>A</h2>"#;
        let mut doc = HtmlDocument::parse(html);

        let outcome = doc.build_toc();

        assert!(!outcome.is_modified());
        assert_eq!(doc.as_str(), html);
    }
}
