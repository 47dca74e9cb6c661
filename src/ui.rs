//! Terminal output helpers.
//!
//! Formatting that builds strings is kept in pure functions so it can be
//! tested; the [Ui] value does the actual printing and carries the
//! verbosity setting, threaded explicitly instead of living in
//! process-wide logger state.

/// Console reporter for one invocation
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    verbose: bool,
}

impl Ui {
    pub fn new(verbose: bool) -> Self {
        Ui { verbose }
    }

    /// Print an error message in red to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("\x1b[31merror:\x1b[0m {}", message);
    }

    /// Print a dimmed diagnostic line to stderr, only in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("\x1b[2m{}\x1b[0m", message);
        }
    }
}

/// "s" when `count` calls for a plural
pub fn plural(count: usize) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

/// Format the dry-run summary listing every identifier that would be created.
pub fn dry_run_summary(names: &[String]) -> String {
    format!(
        "would create release{}:\n{}",
        plural(names.len()),
        names.join(", ")
    )
}

/// Format the recovery instructions printed after a failed push.
///
/// The tag is still in the local repository at this point; the user decides
/// whether to delete it or push it by hand once the underlying issue is
/// fixed.
pub fn push_recovery_hint(tag: &str, remote: &str) -> String {
    format!(
        "the tag will still be in the local repo you can delete it with `git tag -d {}` or push it with `git push {} {}` once you have resolved the issue preventing push",
        tag, remote, tag
    )
}

/// Format the reminder shown when tags were created without `--push`.
pub fn manual_push_hint(tags: &[String], remote: &str) -> String {
    format!(
        "tag{} ({}) not pushed (--push not set), push it with:\n git push {} {}",
        plural(tags.len()),
        tags.join(", "),
        remote,
        tags.join(" ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(0), "");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }

    #[test]
    fn test_dry_run_summary_lists_all_names() {
        let names = vec!["2024.01.003".to_string(), "2024.01.001-api".to_string()];
        assert_eq!(
            dry_run_summary(&names),
            "would create releases:\n2024.01.003, 2024.01.001-api"
        );
    }

    #[test]
    fn test_dry_run_summary_singular() {
        let names = vec!["1.5.0".to_string()];
        assert_eq!(dry_run_summary(&names), "would create release:\n1.5.0");
    }

    #[test]
    fn test_push_recovery_hint_names_tag_and_remote() {
        let hint = push_recovery_hint("2024.01.003", "origin");
        assert!(hint.contains("git tag -d 2024.01.003"));
        assert!(hint.contains("git push origin 2024.01.003"));
    }

    #[test]
    fn test_manual_push_hint() {
        let tags = vec!["1.5.0-api".to_string(), "1.5.0-web".to_string()];
        let hint = manual_push_hint(&tags, "origin");
        assert!(hint.starts_with("tags (1.5.0-api, 1.5.0-web) not pushed"));
        assert!(hint.ends_with("git push origin 1.5.0-api 1.5.0-web"));
    }
}
