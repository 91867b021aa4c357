//! Prompt context built from a ranked result.

use std::fmt::Write;

use kb_core::models::{FormattedContext, SearchResult};

/// Renders numbered entries with title, category label, truncated content
/// and keywords.
#[derive(Debug, Clone, Copy)]
pub struct ContextFormatter {
    content_chars: usize,
}

impl ContextFormatter {
    pub fn new(content_chars: usize) -> Self {
        Self { content_chars }
    }

    /// Format the first `max_entries` entries. An empty result gives an
    /// empty string and no entries.
    pub fn format(&self, result: &SearchResult, max_entries: usize) -> FormattedContext {
        let relevant: Vec<_> = result.entries.iter().take(max_entries).cloned().collect();
        let mut out = String::new();

        for (i, scored) in relevant.iter().enumerate() {
            let entry = &scored.entry;
            if i > 0 {
                out.push('\n');
            }
            // Writing into a String cannot fail.
            let _ = writeln!(out, "[{}] {} ({})", i + 1, entry.title, entry.category.label());
            let _ = writeln!(out, "{}", truncate_chars(&entry.content, self.content_chars));
            if !entry.keywords.is_empty() {
                let _ = writeln!(out, "Mots-clés : {}", entry.keywords.join(", "));
            }
        }

        FormattedContext {
            formatted_context: out.trim_end().to_string(),
            relevant_entries: relevant,
        }
    }
}

/// First `max` chars of `text`, with "..." appended when cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
