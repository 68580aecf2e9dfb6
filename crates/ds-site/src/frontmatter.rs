//! YAML frontmatter parsing for rich content documents.
//!
//! Frontmatter is a `---`-delimited YAML block at the very top of a
//! document:
//!
//! ```markdown
//! ---
//! title: Getting Started
//! description: First steps
//! ---
//!
//! Body content.
//! ```
//!
//! A document without a frontmatter block is valid; every field has a
//! default. Unknown fields are ignored.

use serde::Deserialize;

/// Page-level metadata from a document's frontmatter block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Page title.
    pub title: Option<String>,
    /// Page description, shown as a subtitle.
    pub description: Option<String>,
    /// Render the page without navigation chrome.
    pub standalone: bool,
}

/// Error parsing a frontmatter block.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// Opening `---` with no closing delimiter.
    #[error("unterminated frontmatter block")]
    Unterminated,
    /// Malformed YAML between the delimiters.
    #[error("invalid frontmatter YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Split a document into its frontmatter and body.
///
/// Returns default metadata and the whole source when no frontmatter block
/// is present.
pub fn split_frontmatter(source: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok((Frontmatter::default(), source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let frontmatter = if yaml.trim().is_empty() {
                Frontmatter::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((frontmatter, body));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = split_frontmatter("# Title\n\nBody").unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "# Title\n\nBody");
    }

    #[test]
    fn test_all_fields() {
        let source = "---\ntitle: My Page\ndescription: Overview\nstandalone: true\n---\nBody";
        let (fm, body) = split_frontmatter(source).unwrap();
        assert_eq!(fm.title.as_deref(), Some("My Page"));
        assert_eq!(fm.description.as_deref(), Some("Overview"));
        assert!(fm.standalone);
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_title_only() {
        let (fm, body) = split_frontmatter("---\ntitle: Intro\n---\n\nBody here").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Intro"));
        assert!(fm.description.is_none());
        assert!(!fm.standalone);
        assert_eq!(body, "\nBody here");
    }

    #[test]
    fn test_empty_block() {
        let (fm, body) = split_frontmatter("---\n---\nBody").unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let (fm, _) = split_frontmatter("---\ntitle: X\nlayout: wide\n---\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_unterminated() {
        let result = split_frontmatter("---\ntitle: X\n");
        assert!(matches!(result, Err(FrontmatterError::Unterminated)));
    }

    #[test]
    fn test_invalid_yaml() {
        let result = split_frontmatter("---\ntitle: [broken\n---\n");
        assert!(matches!(result, Err(FrontmatterError::Parse(_))));
    }

    #[test]
    fn test_closing_delimiter_at_eof() {
        let (fm, body) = split_frontmatter("---\ntitle: X\n---").unwrap();
        assert_eq!(fm.title.as_deref(), Some("X"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_dashes_later_in_body_not_frontmatter() {
        let (fm, body) = split_frontmatter("Intro\n---\nMore").unwrap();
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "Intro\n---\nMore");
    }
}
