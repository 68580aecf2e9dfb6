//! Language-tabbed code sample groups.
//!
//! A `::: code-group` block holds one fenced code block per language and
//! closes with `:::`; it renders as a tab switcher showing one sample at a
//! time. The fence info strings become the tab labels.
//!
//! # Architecture
//!
//! Two-phase processing around the markdown pass:
//!
//! 1. **Preprocessing** ([`CodeGroupPreprocessor`]): wraps the group and each
//!    contained fence in intermediate `<ds-code-group>` / `<ds-sample>`
//!    elements that pass through pulldown-cmark unchanged.
//! 2. **Post-processing** ([`CodeGroupProcessor`]): transforms the
//!    intermediate elements into an accessible tablist. The selected tab is
//!    the one matching the reader's stored language preference, falling back
//!    to the first sample.

mod fence;
mod preprocessor;
mod processor;

pub use preprocessor::{CodeGroup, CodeGroupPreprocessor, SampleMetadata};
pub use processor::CodeGroupProcessor;
