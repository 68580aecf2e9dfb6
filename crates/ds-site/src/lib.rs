//! Page composition for documentation sites.
//!
//! The content pipeline supplies a [`PageRecord`] (title, body content,
//! headings) and a [`NavigationConfig`] (docset title, sidebar tree,
//! versions); [`PageComposer`] turns them into a finished HTML page with
//! navigation chrome, a table of contents, and resolved links — or, for
//! standalone pages, the body alone.
//!
//! External collaborators are injected as traits: a [`MetadataSink`]
//! receives SEO metadata for each render, and a [`PreferenceStore`] holds
//! the reader's code-sample language selection.
//!
//! # Example
//!
//! ```
//! use ds_site::{
//!     MemoryStore, NavigationConfig, NullSink, PageBody, PageComposer, PageRecord,
//! };
//!
//! let config = NavigationConfig {
//!     docset_title: "Guide".to_owned(),
//!     ..NavigationConfig::default()
//! };
//! let prefs = MemoryStore::new();
//! let composer = PageComposer::new(&config, "https://docs.example.com", &NullSink, &prefs);
//!
//! let page = PageRecord {
//!     name: "intro".to_owned(),
//!     title: "Introduction".to_owned(),
//!     description: None,
//!     standalone: false,
//!     body: PageBody::Rich("Welcome to the **guide**.".to_owned()),
//!     headings: Vec::new(),
//!     source_partition: "guide".to_owned(),
//! };
//! let html = composer.render(&page, "/guide/intro");
//! assert!(html.contains("<strong>guide</strong>"));
//! ```

mod composer;
mod frontmatter;
mod navigation;
mod page;
mod prefs;
mod seo;

pub use composer::PageComposer;
pub use frontmatter::{Frontmatter, FrontmatterError, split_frontmatter};
pub use navigation::{NavItem, render_nav};
pub use page::{Heading, NavigationConfig, PageBody, PageRecord, VersionEntry};
pub use prefs::{LANGUAGE_KEY, MemoryStore, PreferenceStore};
pub use seo::{MetadataSink, NullSink, PageSeo};
