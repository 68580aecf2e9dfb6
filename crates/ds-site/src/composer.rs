//! Page composition.
//!
//! [`PageComposer`] assembles the final page HTML: body content rendered
//! through the path matching its kind, wrapped (unless the page is
//! standalone) in a two-region layout with sidebar navigation and a table
//! of contents. Mirrors the docs frontend's DOM structure and class names
//! so the external stylesheet applies unchanged.

use std::fmt::Write;

use ds_renderer::link::dirname;
use ds_renderer::{
    MarkdownRenderer, RenderContext, SlugCounter, escape_html, render_tree, slugify,
};

use crate::navigation::render_nav;
use crate::page::{NavigationConfig, PageBody, PageRecord};
use crate::prefs::{LANGUAGE_KEY, PreferenceStore};
use crate::seo::{MetadataSink, PageSeo};

/// Composes page records into finished HTML pages.
///
/// Holds the docset-level configuration and the injected collaborators;
/// each [`render`](Self::render) call is an independent, synchronous pass
/// over one page.
pub struct PageComposer<'a> {
    config: &'a NavigationConfig,
    site_base_url: &'a str,
    sink: &'a dyn MetadataSink,
    prefs: &'a dyn PreferenceStore,
}

impl<'a> PageComposer<'a> {
    /// Create a composer for one docset.
    #[must_use]
    pub fn new(
        config: &'a NavigationConfig,
        site_base_url: &'a str,
        sink: &'a dyn MetadataSink,
        prefs: &'a dyn PreferenceStore,
    ) -> Self {
        Self {
            config,
            site_base_url,
            sink,
            prefs,
        }
    }

    /// Render a page at `current_uri`.
    ///
    /// Publishes SEO metadata to the sink as a side effect. Standalone
    /// pages return body content alone; everything else gets the full
    /// chrome.
    #[must_use]
    pub fn render(&self, page: &PageRecord, current_uri: &str) -> String {
        tracing::debug!(page = %page.name, uri = %current_uri, "rendering page");

        // The docset index is its own directory; every other page resolves
        // links relative to its parent.
        let current_path = if page.name == "index" {
            current_uri
        } else {
            dirname(current_uri)
        };

        self.sink.publish(&PageSeo::for_page(
            &page.title,
            page.description.as_deref(),
            self.site_base_url,
            current_uri,
        ));

        let language = self.prefs.get(LANGUAGE_KEY);
        let ctx = RenderContext::new(current_path).with_language(language.as_deref());
        let body = self.render_body(page, &ctx);

        if page.standalone {
            return body;
        }

        let mut html = String::with_capacity(body.len() + 2048);
        html.push_str(r#"<div class="page-grid">"#);
        self.render_sidebar(&mut html, page, current_uri);

        html.push_str(r#"<main class="page-main"><div class="page-content">"#);
        let _ = write!(
            html,
            r#"<h1 class="heading heading-3xl">{}</h1>"#,
            escape_html(&page.title)
        );
        if let Some(description) = &page.description {
            let _ = write!(
                html,
                r#"<h2 class="page-description">{}</h2>"#,
                escape_html(description)
            );
        }
        html.push_str(r#"<hr class="divider">"#);
        html.push_str(&body);
        html.push_str("</div>");

        render_toc(&mut html, page);
        html.push_str("</main></div>");
        html
    }

    fn render_body(&self, page: &PageRecord, ctx: &RenderContext<'_>) -> String {
        match &page.body {
            PageBody::Rich(markdown) => {
                let result = MarkdownRenderer::new(ctx).render_markdown(markdown);
                for warning in &result.warnings {
                    tracing::warn!(page = %page.name, warning = %warning, "content warning");
                }
                result.html
            }
            PageBody::Tree(nodes) => render_tree(nodes, ctx),
        }
    }

    fn render_sidebar(&self, html: &mut String, page: &PageRecord, current_uri: &str) {
        html.push_str(r#"<aside class="page-sidebar">"#);
        html.push_str(r#"<header class="sidebar-header"><a href="/" class="home-link">Documentation</a></header>"#);

        html.push_str(r#"<div class="sidebar-controls">"#);
        let _ = write!(
            html,
            r#"<button class="docset-title">{}</button>"#,
            escape_html(&self.config.docset_title)
        );
        if !self.config.versions.is_empty() {
            self.render_version_switcher(html);
        }
        html.push_str("</div>");

        if let Some(sidebar) = &self.config.sidebar {
            if !sidebar.is_empty() {
                html.push_str(&render_nav(sidebar, &page.source_partition, current_uri));
            }
        }
        html.push_str("</aside>");
    }

    fn render_version_switcher(&self, html: &mut String) {
        let current = self
            .config
            .version
            .as_deref()
            .or_else(|| self.config.versions.first().map(|v| v.label.as_str()))
            .unwrap_or_default();

        html.push_str(r#"<div class="version-switcher">"#);
        let _ = write!(
            html,
            r#"<button class="version-switcher-button" aria-haspopup="menu">{}</button>"#,
            escape_html(current)
        );
        html.push_str(r#"<ul class="version-switcher-menu" role="menu">"#);
        for version in &self.config.versions {
            let _ = write!(
                html,
                r#"<li role="menuitem"><a href="/{}">{}</a></li>"#,
                escape_html(&version.slug),
                escape_html(&version.label)
            );
        }
        html.push_str("</ul></div>");
    }
}

/// Render the sticky table of contents panel from the page's heading list.
///
/// Anchors come from the same slugger the body renderer uses, so they line
/// up with the heading ids in the content. Level-1 headings consume an id
/// but stay out of the panel, mirroring the body renderer's ToC.
fn render_toc(html: &mut String, page: &PageRecord) {
    html.push_str(r#"<aside class="page-toc">"#);
    let _ = write!(
        html,
        r#"<h2 class="toc-title heading heading-md">{}</h2>"#,
        escape_html(&page.title)
    );

    let mut slugs = SlugCounter::default();
    let entries: Vec<_> = page
        .headings
        .iter()
        .filter_map(|heading| {
            let id = slugs.assign(&slugify(&heading.value));
            (heading.depth > 1).then_some((heading, id))
        })
        .collect();

    if !entries.is_empty() {
        html.push_str(r#"<ul class="toc-list">"#);
        for (heading, id) in entries {
            let indent = if heading.depth >= 3 {
                r#" class="toc-indent""#
            } else {
                ""
            };
            let _ = write!(
                html,
                r##"<li{indent}><a href="#{id}" class="toc-link">{}</a></li>"##,
                escape_html(&heading.value)
            );
        }
        html.push_str("</ul>");
    }
    html.push_str("</aside>");
}
