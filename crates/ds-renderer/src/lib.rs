//! Content rendering for documentation pages.
//!
//! This crate transforms page body content into HTML. Two content kinds are
//! supported, each with its own transformation path:
//!
//! - **Rich content** (markdown with directive extensions) is rendered by
//!   [`MarkdownRenderer`], an event-driven renderer over `pulldown-cmark`.
//! - **Plain content** (a pre-parsed HTML tree) is rendered by
//!   [`render_tree`] over [`HtmlNode`] values.
//!
//! Both paths emit through the same [`ElementKind`] table and route every
//! hyperlink through the resolver in [`link`], so output conventions are
//! identical regardless of content kind. The current document path is
//! threaded explicitly via [`RenderContext`] — there is no ambient state.
//!
//! # Example
//!
//! ```
//! use ds_renderer::{MarkdownRenderer, RenderContext};
//!
//! let ctx = RenderContext::new("/docs/guide");
//! let result = MarkdownRenderer::new(&ctx).render_markdown("See [intro](../intro).");
//! assert!(result.html.contains(r#"href="/docs/intro""#));
//! ```

mod code_group;
mod element;
pub mod link;
mod renderer;
mod state;
mod tree;

pub use code_group::{CodeGroup, CodeGroupPreprocessor, CodeGroupProcessor, SampleMetadata};
pub use element::ElementKind;
pub use link::LinkTarget;
pub use renderer::{MarkdownRenderer, RenderContext, RenderResult};
pub use state::{SlugCounter, TocEntry, escape_html, slugify};
pub use tree::{HtmlNode, render_tree};
