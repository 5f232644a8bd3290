//! Extraction of `{{variable}}` references from template text.

use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;

static VARIABLE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn variable_pattern() -> &'static Regex {
    VARIABLE_PATTERN.get_or_init(|| {
        // Identifier between double braces, whitespace tolerated inside
        // the delimiters. Malformed fragments stay literal text.
        Regex::new(r"\{\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\}")
            .expect("variable pattern is valid")
    })
}

/// Returns every variable referenced in `text`, deduplicated in
/// first-seen order. Each call scans independently; no state is carried
/// between invocations.
pub fn extract_variables(text: &str) -> Vec<String> {
    variable_pattern()
        .captures_iter(text)
        .map(|capture| capture[1].to_string())
        .unique()
        .collect()
}
