//! Front-matter parsing and Markdown-to-HTML rendering for content files.
//!
//! [`frontmatter`] splits a content file into its metadata block and body and
//! decodes the block's restricted `key: value` dialect into JSON. [`render_html`]
//! turns a body into HTML for project detail pages.

pub mod frontmatter;

use pulldown_cmark::{Options, Parser, html::push_html};
use tracing::{debug, instrument};

pub use frontmatter::{Document, parse_document, parse_front_matter, split_front_matter};

/// Render a Markdown body to HTML.
///
/// Uses pulldown-cmark with GFM-style extensions (tables, strikethrough, task
/// lists, footnotes). Raw HTML blocks pass through unchanged.
#[instrument(skip_all, fields(len = markdown.len()))]
pub fn render_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    push_html(&mut html, parser);

    debug!(html_len = html.len(), "markdown rendered");
    html
}
