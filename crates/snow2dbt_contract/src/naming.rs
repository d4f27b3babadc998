//! Column name normalization.
//!
//! Steps run in a fixed order: suffix, prefix, lower-case, snake_case. Prefix
//! and suffix are attached to the original casing, so snake_case applies to the
//! whole composed name.

use regex::Regex;
use std::sync::OnceLock;

/// Which naming transforms to apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub lower: bool,
    pub snake: bool,
}

impl NamingOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn lower(mut self, lower: bool) -> Self {
        self.lower = lower;
        self
    }

    pub fn snake(mut self, snake: bool) -> Self {
        self.snake = snake;
        self
    }

    /// Run the pipeline on one column name.
    pub fn normalize(&self, name: &str) -> String {
        let mut out = name.to_string();
        if let Some(suffix) = self.suffix.as_deref().filter(|s| !s.is_empty()) {
            out.push_str(suffix);
        }
        if let Some(prefix) = self.prefix.as_deref().filter(|p| !p.is_empty()) {
            out.insert_str(0, prefix);
        }
        if self.lower {
            out = out.to_lowercase();
        }
        if self.snake {
            out = snake_case(&out);
        }
        out
    }
}

fn uppercase_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z]+)").expect("uppercase run pattern"))
}

fn capitalized_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z][a-z]+)").expect("capitalized word pattern"))
}

/// Convert a field name to snake_case.
///
/// Two regex passes: a space before every uppercase run, then a space before
/// every capitalized word. The second pass is what splits the acronym off
/// `HTTPServer` (`http_server`) while `myHttpServer` still gives
/// `my_http_server`.
pub fn snake_case(field: &str) -> String {
    let dashed = field.replace('-', " ");
    let runs = uppercase_run().replace_all(&dashed, " ${1}");
    let words = capitalized_word().replace_all(&runs, " ${1}");
    words
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
