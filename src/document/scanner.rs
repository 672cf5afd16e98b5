use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Comments, doctypes, CDATA, processing instructions and tags.
    /// Only tags capture: 1 = "/" for end tags, 2 = name, 3 = attribute text.
    pub(crate) static ref MARKUP_REGEX: Regex = Regex::new(
        r#"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<[!?][^>]*>|<(/?)([A-Za-z][A-Za-z0-9:-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#
    ).unwrap();

    static ref ATTR_REGEX: Regex = Regex::new(
        r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#
    ).unwrap();
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "textarea", "title"];

/// Roots of foreign content, where `/>` really closes an element
const FOREIGN_ROOTS: [&str; 2] = ["svg", "math"];

/// An element located in the page source by byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercased tag name
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub parent: Option<usize>,
    /// Start tag
    pub open: Range<usize>,
    /// End tag, when one was written
    pub close: Option<Range<usize>>,
    /// Offset just past the element, end tag included
    pub end: usize,
    /// Closed by `/>`. Only honoured on SVG and MathML elements; HTML
    /// elements ignore the slash.
    pub self_closing: bool,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(key, _)| key == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Content between the tags
    pub fn inner(&self) -> Range<usize> {
        let end = self.close.as_ref().map_or(self.end, |close| close.start);
        self.open.end..end.max(self.open.end)
    }

    /// Whole element, tags included
    pub fn outer(&self) -> Range<usize> {
        self.open.start..self.end
    }
}

/// Index every element of an HTML page in document order.
///
/// Tolerates the usual sloppiness of rendered pages: an end tag closes any
/// unclosed children of its element, stray end tags are dropped, and elements
/// still open at the end of input run to the end of the source.
pub fn scan(source: &str) -> Vec<Element> {
    let mut elements: Vec<Element> = Vec::new();
    let mut stack: Vec<usize> = Vec::new();
    let mut pos = 0;

    while let Some(caps) = MARKUP_REGEX.captures_at(source, pos) {
        let Some(whole) = caps.get(0) else { break };
        pos = whole.end();

        let Some(name) = caps.get(2) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        let is_end_tag = caps.get(1).map_or(false, |m| !m.as_str().is_empty());

        if is_end_tag {
            if let Some(depth) = stack.iter().rposition(|&idx| elements[idx].name == name) {
                for &idx in &stack[depth + 1..] {
                    elements[idx].end = whole.start();
                }
                let matched = stack[depth];
                elements[matched].close = Some(whole.range());
                elements[matched].end = whole.end();
                stack.truncate(depth);
            }
            continue;
        }

        let raw_attrs = caps.get(3).map_or("", |m| m.as_str()).trim_end();
        let (raw_attrs, slash) = split_self_closing(raw_attrs);
        let attrs = parse_attributes(raw_attrs);
        let foreign = FOREIGN_ROOTS.contains(&name.as_str())
            || stack
                .iter()
                .any(|&open| FOREIGN_ROOTS.contains(&elements[open].name.as_str()));
        let self_closing = slash && foreign;

        let idx = elements.len();
        elements.push(Element {
            name,
            attrs,
            parent: stack.last().copied(),
            open: whole.range(),
            close: None,
            end: whole.end(),
            self_closing,
        });

        let name = elements[idx].name.as_str();
        if self_closing || VOID_ELEMENTS.contains(&name) {
            continue;
        }

        if RAW_TEXT_ELEMENTS.contains(&name) {
            // Raw text may contain '<'; jump straight to the end tag
            let needle = format!("</{}", name);
            pos = source[pos..]
                .to_ascii_lowercase()
                .find(&needle)
                .map_or(source.len(), |offset| pos + offset);
        }

        stack.push(idx);
    }

    for idx in stack {
        elements[idx].end = source.len();
    }

    elements
}

/// Separate a trailing `/` from the attribute text.
///
/// A slash that ends an unquoted attribute value (`href=/posts/`) belongs to
/// the value and does not close the tag.
fn split_self_closing(raw: &str) -> (&str, bool) {
    let Some(stripped) = raw.strip_suffix('/') else {
        return (raw, false);
    };

    let in_unquoted_value = ATTR_REGEX
        .captures_iter(raw)
        .last()
        .and_then(|cap| cap.get(4))
        .map_or(false, |value| value.end() == raw.len());

    if in_unquoted_value {
        (raw, false)
    } else {
        (stripped, true)
    }
}

/// Parse the attribute text of a start tag
pub fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTR_REGEX
        .captures_iter(raw)
        .filter_map(|cap| {
            let name = cap.get(1)?.as_str().to_ascii_lowercase();
            let value = cap
                .get(2)
                .or_else(|| cap.get(3))
                .or_else(|| cap.get(4))
                .map_or("", |m| m.as_str());
            Some((name, html_escape::decode_html_entities(value).into_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(elements: &[Element]) -> Vec<&str> {
        elements.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_nesting_and_parents() {
        let html = r#"<div class="wrap"><nav data-toc></nav><p>Hi</p></div>"#;
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["div", "nav", "p"]);
        assert_eq!(elements[0].parent, None);
        assert_eq!(elements[1].parent, Some(0));
        assert_eq!(elements[2].parent, Some(0));
        assert_eq!(elements[0].outer(), 0..html.len());
        assert_eq!(&html[elements[2].inner()], "Hi");
    }

    #[test]
    fn test_comments_and_doctype_are_skipped() {
        let html = "<!DOCTYPE html><!-- <h2>not a heading</h2> --><h2>Real</h2>";
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["h2"]);
        assert_eq!(&html[elements[0].inner()], "Real");
    }

    #[test]
    fn test_void_elements_and_ignored_html_slash() {
        let html = r#"<p>a<br>b<img src="x.png"/><span/>c</p>"#;
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["p", "br", "img", "span"]);
        assert!(elements[1..].iter().all(|e| e.parent == Some(0)));
        assert!(!elements[3].self_closing);
        assert_eq!(&html[elements[3].inner()], "c");
        assert_eq!(elements[0].end, html.len());
    }

    #[test]
    fn test_slash_on_html_element_keeps_it_open() {
        let html = "<section><div data-toc/><p>intro</p></section>";
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["section", "div", "p"]);
        assert_eq!(elements[2].parent, Some(1));
        assert_eq!(elements[1].end, html.find("</section>").unwrap());
    }

    #[test]
    fn test_svg_elements_self_close() {
        let html = r#"<svg><path d="M0 0"/><circle r="1"/></svg><p>after</p>"#;
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["svg", "path", "circle", "p"]);
        assert!(elements[1].self_closing);
        assert_eq!(elements[2].parent, Some(0));
        assert_eq!(elements[3].parent, None);
    }

    #[test]
    fn test_unquoted_value_keeps_trailing_slash() {
        let elements = scan("<a href=/posts/>Posts</a><br/>");

        assert_eq!(elements[0].attr("href"), Some("/posts/"));
        assert!(!elements[0].self_closing);
        assert_eq!(split_self_closing(" class=x /"), (" class=x ", true));
        assert_eq!(split_self_closing(" disabled/"), (" disabled", true));
        assert_eq!(elements[1].name, "br");
    }

    #[test]
    fn test_script_content_is_raw() {
        let html = r#"<script>if (a < b) { document.write("<h2>x</h2>") }</script><h3>After</h3>"#;
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["script", "h3"]);
        assert_eq!(elements[1].parent, None);
    }

    #[test]
    fn test_implicit_close_and_stray_end_tag() {
        let html = "<ul><li>one<li>two</ul></span><p>after";
        let elements = scan(html);

        assert_eq!(names(&elements), vec!["ul", "li", "li", "p"]);
        assert_eq!(elements[2].parent, Some(1));
        assert_eq!(elements[1].end, html.find("</ul>").unwrap());
        assert_eq!(elements[3].parent, None);
        assert_eq!(elements[3].end, html.len());
    }

    #[test]
    fn test_attributes() {
        let attrs = parse_attributes(r#" class="anchor big" id='x&amp;y' hidden data-depth=3"#);

        assert_eq!(
            attrs,
            vec![
                ("class".to_string(), "anchor big".to_string()),
                ("id".to_string(), "x&y".to_string()),
                ("hidden".to_string(), String::new()),
                ("data-depth".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_class_and_attr_lookup() {
        let elements = scan(r#"<a class="anchor" id="intro" data-toc></a>"#);
        let anchor = &elements[0];

        assert!(anchor.has_class("anchor"));
        assert!(!anchor.has_class("anch"));
        assert_eq!(anchor.attr("id"), Some("intro"));
        assert!(anchor.has_attr("data-toc"));
    }
}
