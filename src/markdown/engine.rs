use comrak::Options;

/// Comrak options with GitHub Flavored Markdown settings.
///
/// Header ids are enabled with an empty prefix, so every heading gets a
/// nested `<a class="anchor" id="...">` the table of contents links to.
pub fn create_comrak_options<'a>() -> Options<'a> {
    let mut options = Options::default();

    // Extension options - GitHub Flavored Markdown
    options.extension.strikethrough = true;
    options.extension.tagfilter = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    options.render.github_pre_lang = true;
    options.render.unsafe_ = true;

    options.parse.smart = true;

    options
}

/// Render markdown to HTML using Comrak
pub fn render_markdown(content: &str, options: &Options<'_>) -> String {
    comrak::markdown_to_html(content, options)
}
