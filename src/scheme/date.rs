use chrono::NaiveDate;
use regex::Regex;

use crate::error::{ReleaseError, Result};

/// Calendar-based release naming scheme.
///
/// Produces identifiers of the form `<prefix><NNN>[-module]`, where the
/// prefix is a strftime rendering of the current date (by default
/// `YYYY.MM.`) and `NNN` is a zero-padded counter scoped to that prefix
/// and module.
#[derive(Debug, Clone)]
pub struct DateScheme {
    format: String,
    include_number: bool,
}

impl Default for DateScheme {
    fn default() -> Self {
        DateScheme {
            format: "%Y.%m.".to_string(),
            include_number: true,
        }
    }
}

impl DateScheme {
    /// Create a scheme with a custom strftime prefix format
    pub fn new(format: impl Into<String>) -> Self {
        DateScheme {
            format: format.into(),
            include_number: true,
        }
    }

    /// Toggle the trailing counter component
    pub fn with_number(mut self, include_number: bool) -> Self {
        self.include_number = include_number;
        self
    }

    /// Proposes the next release identifier for `module` on `today`.
    ///
    /// Scans `existing_tags` for names that are exactly the rendered date
    /// prefix, a decimal counter, and the module suffix; anything else
    /// (other months, other modules, malformed trailers) is ignored. The
    /// proposal uses the highest matching counter plus one, starting at 1
    /// when nothing matches, printed with three-digit zero padding.
    ///
    /// # Arguments
    /// * `today` - Date the prefix is rendered from
    /// * `existing_tags` - Tag names currently in the repository
    /// * `module` - Component suffix, empty for the whole-repo release
    ///
    /// # Example
    /// ```ignore
    /// let scheme = DateScheme::default();
    /// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let tags = vec!["2024.01.001".to_string(), "2024.01.002".to_string()];
    /// assert_eq!(scheme.propose(today, &tags, "").unwrap(), "2024.01.003");
    /// ```
    pub fn propose(&self, today: NaiveDate, existing_tags: &[String], module: &str) -> Result<String> {
        let prefix = today.format(&self.format).to_string();

        if !self.include_number {
            let base = prefix.trim_end_matches('.').to_string();
            return Ok(attach_module(base, module));
        }

        let suffix = if module.is_empty() {
            String::new()
        } else {
            format!("-{}", regex::escape(module))
        };
        let pattern = format!(r"^{}(\d+){}$", regex::escape(&prefix), suffix);
        let re = Regex::new(&pattern)
            .map_err(|e| ReleaseError::internal(format!("invalid tag pattern: {}", e)))?;

        let next = existing_tags
            .iter()
            .filter_map(|tag| re.captures(tag))
            .filter_map(|caps| caps[1].parse::<u64>().ok())
            .max()
            .map(|highest| highest.saturating_add(1))
            .unwrap_or(1);

        Ok(attach_module(format!("{}{:03}", prefix, next), module))
    }
}

fn attach_module(base: String, module: &str) -> String {
    if module.is_empty() {
        base
    } else {
        format!("{}-{}", base, module)
    }
}
