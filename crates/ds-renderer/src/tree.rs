//! Structured-HTML tree renderer (the plain content path).
//!
//! Plain content arrives from the pipeline as a pre-parsed tree of
//! [`HtmlNode`] values rather than markdown source. Recognized tags map
//! through the same [`ElementKind`](crate::ElementKind) table as the rich
//! path, links route through the same resolver, and headings receive ids
//! from the same slugger, so both content kinds render with identical
//! conventions. Unrecognized elements pass through verbatim.

use std::collections::HashMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::element::{self, ElementKind};
use crate::link;
use crate::renderer::RenderContext;
use crate::state::{SlugCounter, escape_html, slugify};

/// Elements with no closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// One node of pre-parsed structured HTML content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HtmlNode {
    /// An element with tag name, attributes, and children.
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        attrs: HashMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<HtmlNode>,
    },
    /// A text node.
    Text { value: String },
}

impl HtmlNode {
    /// Element node without attributes.
    #[must_use]
    pub fn element(tag: &str, children: Vec<HtmlNode>) -> Self {
        Self::Element {
            tag: tag.to_owned(),
            attrs: HashMap::new(),
            children,
        }
    }

    /// Element node with attributes.
    #[must_use]
    pub fn element_with_attrs(
        tag: &str,
        attrs: &[(&str, &str)],
        children: Vec<HtmlNode>,
    ) -> Self {
        Self::Element {
            tag: tag.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            children,
        }
    }

    /// Text node.
    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text {
            value: value.to_owned(),
        }
    }
}

/// Render a structured-HTML tree to HTML.
#[must_use]
pub fn render_tree(nodes: &[HtmlNode], ctx: &RenderContext<'_>) -> String {
    let mut renderer = TreeRenderer {
        ctx,
        out: String::with_capacity(1024),
        slugs: SlugCounter::default(),
    };
    renderer.render_nodes(nodes);
    renderer.out
}

struct TreeRenderer<'a> {
    ctx: &'a RenderContext<'a>,
    out: String,
    slugs: SlugCounter,
}

impl TreeRenderer<'_> {
    fn render_nodes(&mut self, nodes: &[HtmlNode]) {
        for node in nodes {
            self.render_node(node);
        }
    }

    fn render_node(&mut self, node: &HtmlNode) {
        match node {
            HtmlNode::Text { value } => self.out.push_str(&escape_html(value)),
            HtmlNode::Element {
                tag,
                attrs,
                children,
            } => match ElementKind::from_tag(tag) {
                Some(kind) => self.render_mapped(kind, attrs, children),
                None => self.render_passthrough(tag, attrs, children),
            },
        }
    }

    fn render_mapped(
        &mut self,
        kind: ElementKind,
        attrs: &HashMap<String, String>,
        children: &[HtmlNode],
    ) {
        match kind {
            ElementKind::Heading(level) => {
                let text = collect_text(children);
                let id = match attrs.get("id") {
                    Some(id) => id.clone(),
                    None => self.slugs.assign(&slugify(&text)),
                };
                element::push_heading_open(&mut self.out, level, &id);
                self.render_nodes(children);
                element::push_heading_close(&mut self.out, level);
            }
            ElementKind::Link => {
                if let Some(href) = attrs.get("href") {
                    link::push_link_open(&mut self.out, Some(href), self.ctx.current_path);
                } else {
                    // No href: a non-navigating element, remaining
                    // attributes pass through
                    self.out.push_str("<a");
                    push_attrs(&mut self.out, attrs);
                    self.out.push('>');
                }
                self.render_nodes(children);
                self.out.push_str("</a>");
            }
            ElementKind::Image => {
                element::push_image(
                    &mut self.out,
                    attrs.get("src").map_or("", String::as_str),
                    attrs.get("alt").map_or("", String::as_str),
                    attrs.get("title").map_or("", String::as_str),
                );
            }
            ElementKind::BulletList => {
                element::push_list_open(&mut self.out, false, None);
                self.render_nodes(children);
                element::push_list_close(&mut self.out, false);
            }
            ElementKind::OrderedList => {
                let start = attrs.get("start").and_then(|s| s.parse().ok());
                element::push_list_open(&mut self.out, true, start);
                self.render_nodes(children);
                element::push_list_close(&mut self.out, true);
            }
            ElementKind::Preformatted => self.render_code_block(children),
            ElementKind::Code => {
                element::push_inline_code(&mut self.out, &collect_text(children));
            }
            ElementKind::Divider => element::push_divider(&mut self.out),
            ElementKind::Paragraph
            | ElementKind::ListItem
            | ElementKind::Table
            | ElementKind::TableHead
            | ElementKind::TableBody
            | ElementKind::TableRow
            | ElementKind::TableHeaderCell
            | ElementKind::TableCell
            | ElementKind::Emphasis
            | ElementKind::Strong
            | ElementKind::Strikethrough
            | ElementKind::Blockquote => {
                element::push_simple_open(&mut self.out, kind);
                self.render_nodes(children);
                element::push_simple_close(&mut self.out, kind);
            }
        }
    }

    /// `<pre><code class="language-x">…</code></pre>` renders through the
    /// shared code-block emitter; any other `<pre>` content renders as-is.
    fn render_code_block(&mut self, children: &[HtmlNode]) {
        if let [
            HtmlNode::Element {
                tag,
                attrs,
                children: code_children,
            },
        ] = children
        {
            if tag == "code" {
                let lang = attrs.get("class").and_then(|classes| {
                    classes
                        .split_whitespace()
                        .find_map(|cls| cls.strip_prefix("language-"))
                });
                element::push_code_block(&mut self.out, lang, &collect_text(code_children));
                return;
            }
        }
        self.out.push_str("<pre>");
        self.render_nodes(children);
        self.out.push_str("</pre>");
    }

    fn render_passthrough(
        &mut self,
        tag: &str,
        attrs: &HashMap<String, String>,
        children: &[HtmlNode],
    ) {
        write!(self.out, "<{tag}").unwrap();
        push_attrs(&mut self.out, attrs);
        self.out.push('>');

        if children.is_empty() && VOID_TAGS.contains(&tag) {
            return;
        }
        self.render_nodes(children);
        write!(self.out, "</{tag}>").unwrap();
    }
}

/// Emit attributes in sorted order for deterministic output.
fn push_attrs(out: &mut String, attrs: &HashMap<String, String>) {
    let mut sorted: Vec<_> = attrs.iter().collect();
    sorted.sort_by_key(|(name, _)| name.as_str());
    for (name, value) in sorted {
        write!(out, r#" {name}="{}""#, escape_html(value)).unwrap();
    }
}

fn collect_text(nodes: &[HtmlNode]) -> String {
    let mut text = String::new();
    push_text(nodes, &mut text);
    text
}

fn push_text(nodes: &[HtmlNode], out: &mut String) {
    for node in nodes {
        match node {
            HtmlNode::Text { value } => out.push_str(value),
            HtmlNode::Element { children, .. } => push_text(children, out),
        }
    }
}
