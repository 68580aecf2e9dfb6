//! Shared element emitters.
//!
//! Both content paths map their element kinds through this table, so a
//! heading or list renders identically whether it came from markdown events
//! or from a pre-parsed HTML tree. The mapping is a closed enumeration:
//! adding an element kind forces every match below to account for it.

use std::fmt::Write;

use crate::state::escape_html;

/// List item spacing shared by both content paths.
pub(crate) const LIST_SPACING: u8 = 2;

/// Content element kinds with a dedicated presentation mapping.
///
/// Tags outside this table (e.g. `div`, `span`) are passed through verbatim
/// by the tree path and never produced by the markdown path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    /// Heading levels 1-6.
    Heading(u8),
    Paragraph,
    BulletList,
    OrderedList,
    ListItem,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    Preformatted,
    Code,
    Emphasis,
    Strong,
    Strikethrough,
    Blockquote,
    Divider,
    Link,
    Image,
}

impl ElementKind {
    /// Map an HTML tag name to its element kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "ul" => Self::BulletList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "table" => Self::Table,
            "thead" => Self::TableHead,
            "tbody" => Self::TableBody,
            "tr" => Self::TableRow,
            "th" => Self::TableHeaderCell,
            "td" => Self::TableCell,
            "pre" => Self::Preformatted,
            "code" => Self::Code,
            "em" | "i" => Self::Emphasis,
            "strong" | "b" => Self::Strong,
            "s" | "del" => Self::Strikethrough,
            "blockquote" => Self::Blockquote,
            "hr" => Self::Divider,
            "a" => Self::Link,
            "img" => Self::Image,
            _ => return None,
        })
    }
}

/// Heading size token, matching the original docs theme scale.
pub(crate) fn heading_size(level: u8) -> &'static str {
    match level {
        1 => "3xl",
        2 => "2xl",
        3 => "xl",
        4 => "lg",
        5 => "md",
        _ => "sm",
    }
}

pub(crate) fn push_heading_open(out: &mut String, level: u8, id: &str) {
    write!(
        out,
        r#"<h{level} id="{id}" class="heading heading-{}">"#,
        heading_size(level)
    )
    .unwrap();
}

pub(crate) fn push_heading_close(out: &mut String, level: u8) {
    write!(out, "</h{level}>").unwrap();
}

pub(crate) fn push_list_open(out: &mut String, ordered: bool, start: Option<u64>) {
    let tag = if ordered { "ol" } else { "ul" };
    match start {
        Some(n) if n != 1 => write!(
            out,
            r#"<{tag} class="list list-spacing-{LIST_SPACING}" start="{n}">"#
        )
        .unwrap(),
        _ => write!(out, r#"<{tag} class="list list-spacing-{LIST_SPACING}">"#).unwrap(),
    }
}

pub(crate) fn push_list_close(out: &mut String, ordered: bool) {
    out.push_str(if ordered { "</ol>" } else { "</ul>" });
}

pub(crate) fn push_code_block(out: &mut String, lang: Option<&str>, content: &str) {
    match lang {
        Some(lang) if !lang.is_empty() => write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap(),
        _ => write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap(),
    }
}

pub(crate) fn push_inline_code(out: &mut String, code: &str) {
    write!(out, "<code>{}</code>", escape_html(code)).unwrap();
}

pub(crate) fn push_image(out: &mut String, src: &str, alt: &str, title: &str) {
    if title.is_empty() {
        write!(out, r#"<img src="{}" alt="{}">"#, escape_html(src), escape_html(alt)).unwrap();
    } else {
        write!(
            out,
            r#"<img src="{}" title="{}" alt="{}">"#,
            escape_html(src),
            escape_html(title),
            escape_html(alt)
        )
        .unwrap();
    }
}

pub(crate) fn push_divider(out: &mut String) {
    out.push_str(r#"<hr class="divider">"#);
}

/// Opening tag for element kinds whose markup takes no per-instance data.
///
/// Headings, lists, code blocks, dividers, links, and images carry
/// per-instance attributes and go through their dedicated emitters; calling
/// this for one of them is a programming error caught in debug builds.
pub(crate) fn push_simple_open(out: &mut String, kind: ElementKind) {
    let tag = simple_tag(kind);
    debug_assert!(tag.is_some(), "{kind:?} requires a dedicated emitter");
    if let Some(tag) = tag {
        write!(out, "<{tag}>").unwrap();
    }
}

pub(crate) fn push_simple_close(out: &mut String, kind: ElementKind) {
    if let Some(tag) = simple_tag(kind) {
        write!(out, "</{tag}>").unwrap();
    }
}

fn simple_tag(kind: ElementKind) -> Option<&'static str> {
    match kind {
        ElementKind::Paragraph => Some("p"),
        ElementKind::ListItem => Some("li"),
        ElementKind::Table => Some("table"),
        ElementKind::TableHead => Some("thead"),
        ElementKind::TableBody => Some("tbody"),
        ElementKind::TableRow => Some("tr"),
        ElementKind::TableHeaderCell => Some("th"),
        ElementKind::TableCell => Some("td"),
        ElementKind::Emphasis => Some("em"),
        ElementKind::Strong => Some("strong"),
        ElementKind::Strikethrough => Some("s"),
        ElementKind::Blockquote => Some("blockquote"),
        ElementKind::Heading(_)
        | ElementKind::BulletList
        | ElementKind::OrderedList
        | ElementKind::Preformatted
        | ElementKind::Code
        | ElementKind::Divider
        | ElementKind::Link
        | ElementKind::Image => None,
    }
}
