//! Code-group preprocessor.
//!
//! Converts `::: code-group` directives into intermediate `<ds-code-group>`
//! and `<ds-sample>` elements that pass through pulldown-cmark unchanged,
//! collecting sample metadata for the post-processing phase.

use super::fence::{FenceEvent, FenceScanner};

/// Metadata for one code sample within a group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleMetadata {
    /// Unique id for this sample within the document.
    pub id: usize,
    /// Language from the fence info string (tab label and preference key).
    pub language: String,
    /// Line number where the fence opened (1-indexed).
    pub line: usize,
}

/// Metadata for a code-sample group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeGroup {
    /// Unique id for this group.
    pub id: usize,
    /// Samples in document order.
    pub samples: Vec<SampleMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Normal markdown processing.
    Normal,
    /// Between `::: code-group` and its closing `:::`.
    InGroup,
}

/// Preprocessor that wraps code groups in pass-through HTML elements.
///
/// - `::: code-group` → `<ds-code-group data-id="N">`
/// - each fenced block inside → wrapped in `<ds-sample data-id="M" data-lang="...">`
/// - closing `:::` → `</ds-code-group>`
///
/// Blank lines are inserted around the intermediate tags so pulldown-cmark
/// treats them as standalone HTML blocks and still parses the fences.
pub struct CodeGroupPreprocessor {
    state: State,
    fence: FenceScanner,
    sample_open: bool,
    warnings: Vec<String>,
    groups: Vec<CodeGroup>,
    current: Option<CodeGroup>,
    next_group_id: usize,
    next_sample_id: usize,
    group_start_line: usize,
}

impl CodeGroupPreprocessor {
    /// Create a new preprocessor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            fence: FenceScanner::new(),
            sample_open: false,
            warnings: Vec::new(),
            groups: Vec::new(),
            current: None,
            next_group_id: 0,
            next_sample_id: 0,
            group_start_line: 0,
        }
    }

    /// Process markdown text and return the transformed output.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.into_iter().enumerate() {
            let processed = self.process_line(line, idx + 1);
            output.push_str(&processed);
            if idx < line_count - 1 || input.ends_with('\n') {
                output.push('\n');
            }
        }

        self.finalize();
        output
    }

    /// Warnings generated during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the preprocessor and return the collected groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<CodeGroup> {
        self.groups
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> String {
        match self.fence.scan(line) {
            FenceEvent::Open { language } => {
                if self.state == State::InGroup {
                    return self.open_sample(line, &language, line_num);
                }
                return line.to_owned();
            }
            FenceEvent::Close => {
                if self.state == State::InGroup && self.sample_open {
                    self.sample_open = false;
                    return format!("{line}\n\n</ds-sample>");
                }
                return line.to_owned();
            }
            FenceEvent::None => {}
        }

        if self.fence.in_fence() {
            return line.to_owned();
        }

        match parse_directive(line.trim()) {
            Some(Directive::Open) => self.handle_open(line_num),
            Some(Directive::Close) => self.handle_close(line_num),
            None => line.to_owned(),
        }
    }

    fn open_sample(&mut self, line: &str, language: &str, line_num: usize) -> String {
        let sample_id = self.next_sample_id;
        self.next_sample_id += 1;
        self.sample_open = true;

        if let Some(ref mut group) = self.current {
            group.samples.push(SampleMetadata {
                id: sample_id,
                language: language.to_owned(),
                line: line_num,
            });
        }

        format!("<ds-sample data-id=\"{sample_id}\" data-lang=\"{language}\">\n\n{line}")
    }

    fn handle_open(&mut self, line_num: usize) -> String {
        match self.state {
            State::Normal => {
                let group_id = self.next_group_id;
                self.next_group_id += 1;
                self.current = Some(CodeGroup {
                    id: group_id,
                    samples: Vec::new(),
                });
                self.group_start_line = line_num;
                self.state = State::InGroup;
                format!("<ds-code-group data-id=\"{group_id}\">\n")
            }
            State::InGroup => {
                self.warnings.push(format!(
                    "line {line_num}: nested ::: code-group not supported, passing through"
                ));
                "::: code-group".to_owned()
            }
        }
    }

    fn handle_close(&mut self, line_num: usize) -> String {
        match self.state {
            State::InGroup => {
                if let Some(group) = self.current.take() {
                    if group.samples.is_empty() {
                        self.warnings.push(format!(
                            "line {}: ::: code-group with no code samples",
                            self.group_start_line
                        ));
                    }
                    self.groups.push(group);
                }
                self.state = State::Normal;
                "\n</ds-code-group>".to_owned()
            }
            State::Normal => {
                self.warnings.push(format!(
                    "line {line_num}: stray ::: with no opening directive"
                ));
                ":::".to_owned()
            }
        }
    }

    fn finalize(&mut self) {
        if self.state == State::InGroup {
            self.warnings.push(format!(
                "line {}: unclosed ::: code-group (missing closing :::)",
                self.group_start_line
            ));
        }
    }
}

impl Default for CodeGroupPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Directive {
    Open,
    Close,
}

fn parse_directive(trimmed: &str) -> Option<Directive> {
    let rest = trimmed.strip_prefix(":::")?.trim();
    if rest.is_empty() {
        return Some(Directive::Close);
    }
    if rest == "code-group" {
        return Some(Directive::Open);
    }
    // Unknown directive, not ours
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directive() {
        assert_eq!(parse_directive("::: code-group"), Some(Directive::Open));
        assert_eq!(parse_directive(":::code-group"), Some(Directive::Open));
        assert_eq!(parse_directive(":::"), Some(Directive::Close));
        assert_eq!(parse_directive("::: "), Some(Directive::Close));
        assert_eq!(parse_directive("::: note"), None);
        assert_eq!(parse_directive("regular text"), None);
    }

    #[test]
    fn test_simple_group() {
        let mut pp = CodeGroupPreprocessor::new();
        let output = pp.process(
            "::: code-group\n```rust\nfn main() {}\n```\n```python\nprint()\n```\n:::",
        );

        assert!(output.contains(r#"<ds-code-group data-id="0">"#));
        assert!(output.contains(r#"<ds-sample data-id="0" data-lang="rust">"#));
        assert!(output.contains(r#"<ds-sample data-id="1" data-lang="python">"#));
        assert!(output.contains("</ds-sample>"));
        assert!(output.contains("</ds-code-group>"));
        assert!(output.contains("fn main() {}"));

        let groups = pp.into_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].samples.len(), 2);
        assert_eq!(groups[0].samples[0].language, "rust");
        assert_eq!(groups[0].samples[1].language, "python");
    }

    #[test]
    fn test_directive_inside_fence_is_literal() {
        let mut pp = CodeGroupPreprocessor::new();
        let output = pp.process("```\n::: code-group\n:::\n```");

        assert!(!output.contains("<ds-code-group"));
        assert!(output.contains("::: code-group"));
        assert!(pp.warnings().is_empty());
    }

    #[test]
    fn test_fences_outside_group_untouched() {
        let mut pp = CodeGroupPreprocessor::new();
        let input = "```rust\nfn main() {}\n```\n";
        let output = pp.process(input);

        assert_eq!(output, input);
        assert!(pp.into_groups().is_empty());
    }

    #[test]
    fn test_nested_group_warning() {
        let mut pp = CodeGroupPreprocessor::new();
        let output = pp.process("::: code-group\n::: code-group\n:::");

        assert!(pp.warnings().iter().any(|w| w.contains("nested")));
        assert!(output.contains("::: code-group"));
    }

    #[test]
    fn test_empty_group_warning() {
        let mut pp = CodeGroupPreprocessor::new();
        let _output = pp.process("::: code-group\n:::");

        assert!(pp.warnings().iter().any(|w| w.contains("no code samples")));
    }

    #[test]
    fn test_unclosed_group_warning() {
        let mut pp = CodeGroupPreprocessor::new();
        let _output = pp.process("::: code-group\n```rust\nfn main() {}\n```");

        assert!(pp.warnings().iter().any(|w| w.contains("unclosed")));
    }

    #[test]
    fn test_stray_close_warning() {
        let mut pp = CodeGroupPreprocessor::new();
        let output = pp.process(":::");

        assert!(pp.warnings().iter().any(|w| w.contains("stray")));
        assert_eq!(output.trim(), ":::");
    }

    #[test]
    fn test_multiple_groups() {
        let mut pp = CodeGroupPreprocessor::new();
        let _output = pp.process(
            "::: code-group\n```rust\na\n```\n:::\n\ntext\n\n::: code-group\n```go\nb\n```\n:::",
        );

        let groups = pp.into_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, 0);
        assert_eq!(groups[1].id, 1);
        // Sample ids are document-wide
        assert_eq!(groups[1].samples[0].id, 1);
    }

    #[test]
    fn test_preserves_line_endings() {
        let mut pp = CodeGroupPreprocessor::new();
        let input = "Line 1\nLine 2\n";
        assert_eq!(pp.process(input), input);
    }
}
