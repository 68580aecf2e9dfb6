//! Code-group post-processor.
//!
//! Transforms the intermediate `<ds-code-group>` / `<ds-sample>` elements
//! produced by [`CodeGroupPreprocessor`](super::CodeGroupPreprocessor) into
//! an accessible tablist. Exactly one tab is selected: the sample whose
//! language matches the reader's stored preference, or the first sample.

use std::collections::HashMap;
use std::fmt::Write;

use crate::state::escape_html;

use super::CodeGroup;

/// Post-processor for rendered HTML containing code-group wrappers.
///
/// # Output HTML structure
///
/// ```html
/// <div class="code-group" id="code-group-0">
///   <div class="code-group-buttons" role="tablist">
///     <button role="tab" id="tab-0-0" aria-controls="panel-0-0"
///             data-lang="rust" aria-selected="true" tabindex="0">rust</button>
///     <button role="tab" id="tab-0-1" aria-controls="panel-0-1"
///             data-lang="python" aria-selected="false" tabindex="-1">python</button>
///   </div>
///   <div role="tabpanel" id="panel-0-0" aria-labelledby="tab-0-0">
///     <!-- rendered code block -->
///   </div>
///   <div role="tabpanel" id="panel-0-1" aria-labelledby="tab-0-1" hidden>
///     <!-- rendered code block -->
///   </div>
/// </div>
/// ```
pub struct CodeGroupProcessor<'a> {
    groups: HashMap<usize, CodeGroup>,
    preferred: Option<&'a str>,
    warnings: Vec<String>,
}

impl<'a> CodeGroupProcessor<'a> {
    /// Create a processor for the given groups and language preference.
    #[must_use]
    pub fn new(groups: Vec<CodeGroup>, preferred: Option<&'a str>) -> Self {
        Self {
            groups: groups.into_iter().map(|g| (g.id, g)).collect(),
            preferred,
            warnings: Vec::new(),
        }
    }

    /// Warnings collected during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Replace all `<ds-code-group>` wrappers in `html` with tablists.
    pub fn post_process(&mut self, html: &mut String) {
        let mut result = String::with_capacity(html.len());
        let mut remaining = html.as_str();

        while let Some(start) = remaining.find("<ds-code-group") {
            result.push_str(&remaining[..start]);

            let Some(tag_end) = remaining[start..].find('>').map(|i| start + i + 1) else {
                result.push_str(&remaining[start..]);
                remaining = "";
                break;
            };

            let close_tag = "</ds-code-group>";
            let Some(close_start) = remaining[tag_end..].find(close_tag).map(|i| tag_end + i)
            else {
                // Unclosed wrapper (unclosed directive in the source)
                result.push_str(&remaining[start..]);
                remaining = "";
                break;
            };

            let opening_tag = &remaining[start..tag_end];
            let inner = &remaining[tag_end..close_start];
            let close_end = close_start + close_tag.len();

            if let Some(id) = parse_data_id(opening_tag) {
                let transformed = self.transform(id, inner);
                result.push_str(&transformed);
            } else {
                self.warnings
                    .push("ds-code-group element without data-id".to_owned());
                result.push_str(&remaining[start..close_end]);
            }

            remaining = &remaining[close_end..];
        }

        result.push_str(remaining);
        *html = result;
    }

    fn transform(&mut self, group_id: usize, inner: &str) -> String {
        let Some(group) = self.groups.get(&group_id) else {
            self.warnings.push(format!(
                "code group {group_id} not found in metadata, passing through"
            ));
            return format!(r#"<ds-code-group data-id="{group_id}">{inner}</ds-code-group>"#);
        };

        if group.samples.is_empty() {
            // Empty group: unwrap, nothing to tab between
            return inner.to_owned();
        }

        let selected = self
            .preferred
            .and_then(|lang| group.samples.iter().position(|s| s.language == lang))
            .unwrap_or(0);

        let mut out = String::with_capacity(inner.len() + 512);
        write!(out, r#"<div class="code-group" id="code-group-{group_id}">"#).unwrap();

        out.push_str(r#"<div class="code-group-buttons" role="tablist">"#);
        for (idx, sample) in group.samples.iter().enumerate() {
            let is_selected = idx == selected;
            write!(
                out,
                r#"<button role="tab" id="tab-{group_id}-{sid}" aria-controls="panel-{group_id}-{sid}" data-lang="{lang}" aria-selected="{is_selected}" tabindex="{tabindex}">{label}</button>"#,
                sid = sample.id,
                lang = escape_html(&sample.language),
                tabindex = if is_selected { "0" } else { "-1" },
                label = escape_html(&sample.language),
            )
            .unwrap();
        }
        out.push_str("</div>");

        let (panels, leftover) = parse_sample_panels(inner);
        if leftover {
            self.warnings.push(format!(
                "code group {group_id}: content outside code fences ignored"
            ));
        }

        for (sample_id, content) in panels {
            let position = group.samples.iter().position(|s| s.id == sample_id);
            if position.is_none() {
                self.warnings.push(format!(
                    "sample {sample_id} not found in code group {group_id} metadata"
                ));
            }
            let hidden = if position == Some(selected) { "" } else { " hidden" };
            write!(
                out,
                r#"<div role="tabpanel" id="panel-{group_id}-{sample_id}" aria-labelledby="tab-{group_id}-{sample_id}"{hidden}>{content}</div>"#
            )
            .unwrap();
        }

        out.push_str("</div>");
        out
    }
}

/// Extract `(sample id, content)` pairs from a group's inner HTML.
///
/// Returns the panels in document order and whether any non-whitespace
/// content sat outside the sample wrappers.
fn parse_sample_panels(inner: &str) -> (Vec<(usize, &str)>, bool) {
    let mut panels = Vec::new();
    let mut leftover = false;
    let mut remaining = inner;

    while let Some(start) = remaining.find("<ds-sample") {
        if !remaining[..start].trim().is_empty() {
            leftover = true;
        }

        let Some(tag_end) = remaining[start..].find('>').map(|i| start + i + 1) else {
            break;
        };
        let close_tag = "</ds-sample>";
        let Some(close_start) = remaining[tag_end..].find(close_tag).map(|i| tag_end + i) else {
            break;
        };

        if let Some(id) = parse_data_id(&remaining[start..tag_end]) {
            panels.push((id, remaining[tag_end..close_start].trim()));
        }
        remaining = &remaining[close_start + close_tag.len()..];
    }

    if !remaining.trim().is_empty() {
        leftover = true;
    }
    (panels, leftover)
}

/// Parse the `data-id` attribute out of an opening tag.
fn parse_data_id(tag: &str) -> Option<usize> {
    let start = tag.find("data-id=\"")? + "data-id=\"".len();
    let end = tag[start..].find('"')? + start;
    tag[start..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::super::SampleMetadata;
    use super::*;

    fn group(id: usize, languages: &[&str]) -> CodeGroup {
        CodeGroup {
            id,
            samples: languages
                .iter()
                .enumerate()
                .map(|(i, lang)| SampleMetadata {
                    id: i,
                    language: (*lang).to_owned(),
                    line: i + 2,
                })
                .collect(),
        }
    }

    fn wrapped(group_id: usize, samples: &[(usize, &str)]) -> String {
        let mut html = format!("<ds-code-group data-id=\"{group_id}\">\n");
        for (id, content) in samples {
            html.push_str(&format!("<ds-sample data-id=\"{id}\">\n{content}\n</ds-sample>\n"));
        }
        html.push_str("</ds-code-group>");
        html
    }

    #[test]
    fn test_transforms_to_tablist() {
        let mut html = wrapped(0, &[(0, "<pre>rust code</pre>"), (1, "<pre>py code</pre>")]);
        let mut processor = CodeGroupProcessor::new(vec![group(0, &["rust", "python"])], None);
        processor.post_process(&mut html);

        assert!(html.contains(r#"<div class="code-group" id="code-group-0">"#));
        assert!(html.contains(r#"role="tablist""#));
        assert!(html.contains(r#"data-lang="rust" aria-selected="true""#));
        assert!(html.contains(r#"data-lang="python" aria-selected="false""#));
        assert!(html.contains(r#"<div role="tabpanel" id="panel-0-0" aria-labelledby="tab-0-0">"#));
        assert!(html.contains(r#"id="panel-0-1" aria-labelledby="tab-0-1" hidden"#));
        assert!(!html.contains("<ds-code-group"));
        assert!(processor.warnings().is_empty());
    }

    #[test]
    fn test_preference_selects_tab() {
        let mut html = wrapped(0, &[(0, "<pre>a</pre>"), (1, "<pre>b</pre>")]);
        let mut processor =
            CodeGroupProcessor::new(vec![group(0, &["rust", "python"])], Some("python"));
        processor.post_process(&mut html);

        assert!(html.contains(r#"data-lang="python" aria-selected="true""#));
        assert!(html.contains(r#"data-lang="rust" aria-selected="false""#));
        // The rust panel is hidden, the python panel visible
        assert!(html.contains(r#"id="panel-0-0" aria-labelledby="tab-0-0" hidden"#));
        assert!(html.contains(r#"id="panel-0-1" aria-labelledby="tab-0-1">"#));
    }

    #[test]
    fn test_unknown_preference_falls_back_to_first() {
        let mut html = wrapped(0, &[(0, "<pre>a</pre>"), (1, "<pre>b</pre>")]);
        let mut processor =
            CodeGroupProcessor::new(vec![group(0, &["rust", "python"])], Some("haskell"));
        processor.post_process(&mut html);

        assert!(html.contains(r#"data-lang="rust" aria-selected="true""#));
    }

    #[test]
    fn test_missing_group_passes_through() {
        let mut html = wrapped(7, &[(0, "<pre>a</pre>")]);
        let mut processor = CodeGroupProcessor::new(vec![], None);
        processor.post_process(&mut html);

        assert!(html.contains("<ds-code-group"));
        assert!(processor.warnings().iter().any(|w| w.contains("not found")));
    }

    #[test]
    fn test_unclosed_wrapper_passes_through() {
        let mut html = "<ds-code-group data-id=\"0\">\n<pre>a</pre>".to_owned();
        let before = html.clone();
        let mut processor = CodeGroupProcessor::new(vec![group(0, &["rust"])], None);
        processor.post_process(&mut html);

        assert_eq!(html, before);
    }

    #[test]
    fn test_content_outside_samples_warns() {
        let mut html = format!(
            "<ds-code-group data-id=\"0\">\n<p>stray</p>\n{}\n</ds-code-group>",
            "<ds-sample data-id=\"0\">\n<pre>a</pre>\n</ds-sample>"
        );
        let mut processor = CodeGroupProcessor::new(vec![group(0, &["rust"])], None);
        processor.post_process(&mut html);

        assert!(processor.warnings().iter().any(|w| w.contains("outside")));
    }

    #[test]
    fn test_surrounding_html_preserved() {
        let mut html = format!(
            "<p>before</p>{}<p>after</p>",
            wrapped(0, &[(0, "<pre>a</pre>")])
        );
        let mut processor = CodeGroupProcessor::new(vec![group(0, &["rust"])], None);
        processor.post_process(&mut html);

        assert!(html.starts_with("<p>before</p>"));
        assert!(html.ends_with("<p>after</p>"));
    }

    #[test]
    fn test_multiple_groups() {
        let mut html = format!(
            "{}\n{}",
            wrapped(0, &[(0, "<pre>a</pre>")]),
            wrapped(1, &[(1, "<pre>b</pre>")])
        );
        let g1 = group(0, &["rust"]);
        let g2 = CodeGroup {
            id: 1,
            samples: vec![SampleMetadata {
                id: 1,
                language: "go".to_owned(),
                line: 10,
            }],
        };
        let mut processor = CodeGroupProcessor::new(vec![g1, g2], None);
        processor.post_process(&mut html);

        assert!(html.contains(r#"id="code-group-0""#));
        assert!(html.contains(r#"id="code-group-1""#));
        assert!(!html.contains("<ds-code-group"));
    }

    #[test]
    fn test_parse_data_id() {
        assert_eq!(parse_data_id(r#"<ds-code-group data-id="3">"#), Some(3));
        assert_eq!(parse_data_id("<ds-code-group>"), None);
        assert_eq!(parse_data_id(r#"<ds-code-group data-id="x">"#), None);
    }
}
