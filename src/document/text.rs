use crate::document::scanner::MARKUP_REGEX;

/// Text content of a fragment of markup, as a reader would see it
pub fn text_content(fragment: &str) -> String {
    let stripped = MARKUP_REGEX.replace_all(fragment, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    collapse_whitespace(&decoded)
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
