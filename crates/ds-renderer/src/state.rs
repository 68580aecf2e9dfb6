//! Rendering state and text helpers shared by both content paths.

use std::collections::HashMap;

use pulldown_cmark::Alignment;
use serde::{Deserialize, Serialize};

/// Table of contents entry collected from a rendered heading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Plain-text heading title (inline markup stripped).
    pub title: String,
    /// Anchor id assigned to the heading.
    pub id: String,
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Slugify heading text into an anchor id.
///
/// Lowercases, keeps alphanumerics, and collapses everything else into
/// single hyphens. Duplicate handling lives in [`SlugCounter`].
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Assigns unique ids to possibly-repeating slugs (`faq`, `faq-1`, `faq-2`).
#[derive(Debug, Default)]
pub struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    /// Return a unique id for `base`, numbering repeats.
    pub fn assign(&mut self, base: &str) -> String {
        let count = self.seen.entry(base.to_owned()).or_insert(0);
        let id = if *count == 0 {
            base.to_owned()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

/// Heading capture state for the event renderer.
///
/// While a heading is open, inline content is buffered twice: as plain text
/// (for the slug and ToC title) and as HTML (for the final tag body).
#[derive(Debug, Default)]
pub(crate) struct HeadingState {
    active: Option<u8>,
    text: String,
    html: String,
    slugs: SlugCounter,
    toc: Vec<TocEntry>,
}

impl HeadingState {
    pub(crate) fn start(&mut self, level: u8) {
        self.active = Some(level);
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }

    /// Close the open heading, record its ToC entry, and return
    /// `(level, id, html)` for emission. Level-1 headings render but stay
    /// out of the ToC; the page title already occupies that slot.
    pub(crate) fn complete(&mut self) -> Option<(u8, String, String)> {
        let level = self.active.take()?;
        let title = self.text.trim().to_owned();
        let id = self.slugs.assign(&slugify(&title));
        if level > 1 {
            self.toc.push(TocEntry {
                level,
                title,
                id: id.clone(),
            });
        }
        Some((level, id, std::mem::take(&mut self.html)))
    }

    pub(crate) fn take_toc(&mut self) -> Vec<TocEntry> {
        std::mem::take(&mut self.toc)
    }
}

/// Code block capture state for the event renderer.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    content: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.content.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    pub(crate) fn push_newline(&mut self) {
        self.content.push('\n');
    }

    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.content))
    }
}

/// Table rendering state: column alignments and head/body position.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Inline style attribute for the current cell, empty when unaligned.
    pub(crate) fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}

/// Image alt-text capture state for the event renderer.
#[derive(Debug, Default)]
pub(crate) struct ImageState {
    active: bool,
    alt: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt.clear();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }

    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("\"x\" 'y'"), "&quot;x&quot; &#x27;y&#x27;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Section Title"), "section-title");
        assert_eq!(slugify("Install npm"), "install-npm");
        assert_eq!(slugify("  What's new?  "), "what-s-new");
        assert_eq!(slugify("C++ API"), "c-api");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Über uns"), "über-uns");
    }

    #[test]
    fn test_slug_counter_dedup() {
        let mut counter = SlugCounter::default();
        assert_eq!(counter.assign("faq"), "faq");
        assert_eq!(counter.assign("faq"), "faq-1");
        assert_eq!(counter.assign("faq"), "faq-2");
        assert_eq!(counter.assign("intro"), "intro");
    }

    #[test]
    fn test_heading_state_collects_toc() {
        let mut heading = HeadingState::default();
        heading.start(2);
        heading.push_text("Setup");
        heading.push_html("Setup");
        let (level, id, html) = heading.complete().unwrap();
        assert_eq!(level, 2);
        assert_eq!(id, "setup");
        assert_eq!(html, "Setup");

        let toc = heading.take_toc();
        assert_eq!(toc.len(), 1);
        assert_eq!(toc[0].title, "Setup");
    }

    #[test]
    fn test_heading_state_h1_not_in_toc() {
        let mut heading = HeadingState::default();
        heading.start(1);
        heading.push_text("Page Title");
        heading.push_html("Page Title");
        assert!(heading.complete().is_some());
        assert!(heading.take_toc().is_empty());
    }

    #[test]
    fn test_code_block_state() {
        let mut code = CodeBlockState::default();
        code.start(Some("rust".to_owned()));
        assert!(code.is_active());
        code.push_str("fn main() {}");
        code.push_newline();
        let (lang, content) = code.end();
        assert_eq!(lang.as_deref(), Some("rust"));
        assert_eq!(content, "fn main() {}\n");
        assert!(!code.is_active());
    }

    #[test]
    fn test_table_state_alignment() {
        let mut table = TableState::default();
        table.start(vec![Alignment::Left, Alignment::None, Alignment::Right]);
        assert_eq!(
            table.current_alignment_style(),
            r#" style="text-align: left""#
        );
        table.next_cell();
        assert_eq!(table.current_alignment_style(), "");
        table.next_cell();
        assert_eq!(
            table.current_alignment_style(),
            r#" style="text-align: right""#
        );
    }
}
