//! Scanned code normalization
//!
//! Some scanners emit tags as `0-<tag>` while the sheet stores `<tag>`. The
//! strip pattern removes such a prefix once, at the start of the code only.

use regex::Regex;

/// Prefix removed from scanned codes unless configured otherwise
pub const DEFAULT_STRIP_PREFIX: &str = "^0-";

#[derive(Debug, Clone)]
pub struct CodeNormalizer {
    prefix: Option<Regex>,
}

impl Default for CodeNormalizer {
    fn default() -> Self {
        Self {
            prefix: Regex::new(DEFAULT_STRIP_PREFIX).ok(),
        }
    }
}

impl CodeNormalizer {
    /// Normalizer that only trims
    pub fn trim_only() -> Self {
        Self { prefix: None }
    }

    /// Build from a configured pattern; `"none"` or an empty value disables stripping
    ///
    /// Patterns are anchored at the start of the code, every alternation
    /// branch included.
    pub fn from_setting(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern.eq_ignore_ascii_case("none") {
            return Ok(Self::trim_only());
        }
        let body = pattern.strip_prefix('^').unwrap_or(pattern);
        let anchored = format!("^(?:{})", body);
        Ok(Self {
            prefix: Some(Regex::new(&anchored)?),
        })
    }

    pub fn pattern(&self) -> Option<&str> {
        self.prefix.as_ref().map(Regex::as_str)
    }

    /// Trim and strip the prefix; `None` when nothing is left
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        let code = match &self.prefix {
            Some(prefix) => prefix.replace(trimmed, "").into_owned(),
            None => trimmed.to_string(),
        };
        (!code.is_empty()).then_some(code)
    }
}
