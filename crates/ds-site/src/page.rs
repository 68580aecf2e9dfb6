//! Page records and navigation configuration supplied by the content
//! pipeline.

use ds_renderer::{HtmlNode, MarkdownRenderer, RenderContext};
use serde::{Deserialize, Serialize};

use crate::frontmatter::{FrontmatterError, split_frontmatter};
use crate::navigation::NavItem;

/// A heading from the page's content, in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6).
    pub depth: u8,
    /// Plain-text heading title.
    pub value: String,
}

/// Page body content: one of two mutually exclusive kinds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageBody {
    /// Markdown source with directive extensions.
    Rich(String),
    /// Pre-parsed structured HTML content.
    Tree(Vec<HtmlNode>),
}

/// A page record. Immutable once supplied to the composer.
#[derive(Clone, Debug, Deserialize)]
pub struct PageRecord {
    /// Logical document name; `index` marks the docset index page.
    pub name: String,
    /// Page title.
    pub title: String,
    /// Optional description, shown as a subtitle.
    #[serde(default)]
    pub description: Option<String>,
    /// Render without navigation chrome.
    #[serde(default)]
    pub standalone: bool,
    /// Body content.
    pub body: PageBody,
    /// Headings for the table of contents.
    #[serde(default)]
    pub headings: Vec<Heading>,
    /// Content partition this page was sourced from; scopes the sidebar.
    pub source_partition: String,
}

impl PageRecord {
    /// Build a rich-content record from a source document.
    ///
    /// Splits YAML frontmatter (title, description, standalone flag) from
    /// the body and derives the heading list from a rendering pass. The
    /// title falls back to the document name when the frontmatter carries
    /// none.
    pub fn from_document(
        name: &str,
        source_partition: &str,
        source: &str,
    ) -> Result<Self, FrontmatterError> {
        let (frontmatter, body) = split_frontmatter(source)?;

        let ctx = RenderContext::new("/");
        let result = MarkdownRenderer::new(&ctx).render_markdown(body);
        let headings = result
            .toc
            .into_iter()
            .map(|entry| Heading {
                depth: entry.level,
                value: entry.title,
            })
            .collect();

        Ok(Self {
            name: name.to_owned(),
            title: frontmatter.title.unwrap_or_else(|| name.to_owned()),
            description: frontmatter.description,
            standalone: frontmatter.standalone,
            body: PageBody::Rich(body.to_owned()),
            headings,
            source_partition: source_partition.to_owned(),
        })
    }
}

/// Version switcher entry; navigates to `/{slug}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Display label (e.g. `v2`).
    pub label: String,
    /// Site path of the version's docset, without leading slash.
    pub slug: String,
}

/// Docset-level navigation configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NavigationConfig {
    /// Docset display title.
    pub docset_title: String,
    /// Currently selected version label shown on the switcher control.
    #[serde(default)]
    pub version: Option<String>,
    /// Sidebar navigation tree; absent disables the sidebar nav region.
    #[serde(default)]
    pub sidebar: Option<Vec<NavItem>>,
    /// Version list; empty disables the version switcher.
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
}
