//! SEO metadata publication.
//!
//! Each page render emits a [`PageSeo`] payload to an injected
//! [`MetadataSink`]. The sink is write-only and fire-and-forget: the
//! composer never consumes a return value, and implementations must not
//! fail the render.

use serde::Serialize;

/// Metadata payload for one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageSeo {
    /// Page title.
    pub title: String,
    /// Page description, when the page carries one.
    pub description: Option<String>,
    /// Canonical URL: site base URL plus the page URI.
    pub canonical_url: String,
    /// Open Graph title (mirrors `title`).
    pub og_title: String,
    /// Open Graph description (mirrors `description`).
    pub og_description: Option<String>,
}

impl PageSeo {
    /// Assemble the payload for a page at `current_uri`.
    #[must_use]
    pub fn for_page(
        title: &str,
        description: Option<&str>,
        site_base_url: &str,
        current_uri: &str,
    ) -> Self {
        Self {
            title: title.to_owned(),
            description: description.map(str::to_owned),
            canonical_url: format!("{site_base_url}{current_uri}"),
            og_title: title.to_owned(),
            og_description: description.map(str::to_owned),
        }
    }
}

/// Receiver for page metadata.
pub trait MetadataSink: Send + Sync {
    /// Receive metadata for a rendered page.
    fn publish(&self, seo: &PageSeo);
}

/// Sink that discards all metadata.
pub struct NullSink;

impl MetadataSink for NullSink {
    fn publish(&self, _seo: &PageSeo) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_page_builds_canonical_url() {
        let seo = PageSeo::for_page(
            "Intro",
            Some("First steps"),
            "https://docs.example.com",
            "/guide/intro",
        );
        assert_eq!(seo.canonical_url, "https://docs.example.com/guide/intro");
        assert_eq!(seo.og_title, "Intro");
        assert_eq!(seo.og_description.as_deref(), Some("First steps"));
    }

    #[test]
    fn test_for_page_without_description() {
        let seo = PageSeo::for_page("Intro", None, "https://docs.example.com", "/intro");
        assert!(seo.description.is_none());
        assert!(seo.og_description.is_none());
    }

    #[test]
    fn test_null_sink_accepts_anything() {
        let seo = PageSeo::for_page("X", None, "https://a", "/b");
        NullSink.publish(&seo);
    }
}
