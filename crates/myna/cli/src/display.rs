//! Console rendering for the `myna` command

use std::fmt::Display;

use colored::Colorize;

/// A formatted section title
#[derive(Debug)]
pub(crate) struct SectionTitle(pub(crate) &'static str);

impl Display for SectionTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\n{}", self.0.bold().underline())
    }
}

pub(crate) const fn section_title(title: &'static str) -> SectionTitle {
    SectionTitle(title)
}

pub(crate) fn success(message: &str) -> String {
    format!("✅ {}", message.green().bold())
}

pub(crate) fn warning(message: &str) -> String {
    format!("⚠️  {}", message.yellow().bold())
}

pub(crate) fn error(message: &str) -> String {
    format!("❌ {}", message.red().bold())
}

/// Format a key-value section
pub(crate) fn key_value_box(title: &str, items: Vec<(&str, String)>) -> String {
    let mut result = format!("{}", title.bold().underline());

    for (key, value) in items {
        result.push_str(&format!("\n  {}: {}", key.bold(), value));
    }

    result
}
