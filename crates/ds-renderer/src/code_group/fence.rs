//! Code fence scanning for directive parsing.
//!
//! Directive syntax (`:::`) inside a fenced code block is literal content,
//! and fences inside a code group mark sample boundaries, so the
//! preprocessor needs to know where fences open and close. Closing fences
//! must repeat the opening character at least as many times.

/// What a scanned line means for fence state.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FenceEvent {
    /// The line opens a fence; the info-string language may be empty.
    Open { language: String },
    /// The line closes the current fence.
    Close,
    /// The line does not change fence state.
    None,
}

/// Line-by-line fence state tracker.
#[derive(Debug, Default)]
pub(crate) struct FenceScanner {
    delimiter: Option<(char, usize)>,
}

impl FenceScanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the scanner is currently inside a fenced block.
    pub(crate) fn in_fence(&self) -> bool {
        self.delimiter.is_some()
    }

    /// Advance over one line and report the resulting fence event.
    pub(crate) fn scan(&mut self, line: &str) -> FenceEvent {
        let trimmed = line.trim_start();

        if let Some((ch, len)) = self.delimiter {
            if closes_fence(trimmed, ch, len) {
                self.delimiter = None;
                return FenceEvent::Close;
            }
            return FenceEvent::None;
        }

        let Some(first) = trimmed.chars().next() else {
            return FenceEvent::None;
        };
        if first != '`' && first != '~' {
            return FenceEvent::None;
        }
        let count = trimmed.chars().take_while(|&c| c == first).count();
        if count < 3 {
            return FenceEvent::None;
        }

        self.delimiter = Some((first, count));
        let language = trimmed[count..]
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_owned();
        FenceEvent::Open { language }
    }
}

/// A closing fence repeats the opening character at least `min_len` times
/// and carries nothing but trailing whitespace.
fn closes_fence(trimmed: &str, fence_char: char, min_len: usize) -> bool {
    let count = trimmed.chars().take_while(|&c| c == fence_char).count();
    count >= min_len && trimmed[count..].chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_language() {
        let mut scanner = FenceScanner::new();
        assert_eq!(
            scanner.scan("```rust"),
            FenceEvent::Open {
                language: "rust".to_owned()
            }
        );
        assert!(scanner.in_fence());
    }

    #[test]
    fn test_open_without_language() {
        let mut scanner = FenceScanner::new();
        assert_eq!(
            scanner.scan("```"),
            FenceEvent::Open {
                language: String::new()
            }
        );
    }

    #[test]
    fn test_content_is_none() {
        let mut scanner = FenceScanner::new();
        scanner.scan("```python");
        assert_eq!(scanner.scan("print('hi')"), FenceEvent::None);
        assert_eq!(scanner.scan("::: code-group"), FenceEvent::None);
        assert!(scanner.in_fence());
    }

    #[test]
    fn test_close() {
        let mut scanner = FenceScanner::new();
        scanner.scan("```rust");
        assert_eq!(scanner.scan("```"), FenceEvent::Close);
        assert!(!scanner.in_fence());
    }

    #[test]
    fn test_tilde_fence() {
        let mut scanner = FenceScanner::new();
        assert_eq!(
            scanner.scan("~~~python"),
            FenceEvent::Open {
                language: "python".to_owned()
            }
        );
        assert_eq!(scanner.scan("~~~"), FenceEvent::Close);
    }

    #[test]
    fn test_shorter_fence_does_not_close() {
        let mut scanner = FenceScanner::new();
        scanner.scan("````");
        assert_eq!(scanner.scan("```"), FenceEvent::None);
        assert!(scanner.in_fence());
        assert_eq!(scanner.scan("````"), FenceEvent::Close);
    }

    #[test]
    fn test_mixed_chars_do_not_close() {
        let mut scanner = FenceScanner::new();
        scanner.scan("```");
        assert_eq!(scanner.scan("~~~"), FenceEvent::None);
        assert!(scanner.in_fence());
    }

    #[test]
    fn test_two_backticks_not_a_fence() {
        let mut scanner = FenceScanner::new();
        assert_eq!(scanner.scan("``inline``"), FenceEvent::None);
        assert!(!scanner.in_fence());
    }

    #[test]
    fn test_indented_fence() {
        let mut scanner = FenceScanner::new();
        assert_eq!(
            scanner.scan("   ```js"),
            FenceEvent::Open {
                language: "js".to_owned()
            }
        );
        assert_eq!(scanner.scan("  ```"), FenceEvent::Close);
    }

    #[test]
    fn test_info_string_extra_fields_ignored() {
        let mut scanner = FenceScanner::new();
        assert_eq!(
            scanner.scan("```rust title=main.rs"),
            FenceEvent::Open {
                language: "rust".to_owned()
            }
        );
    }
}
