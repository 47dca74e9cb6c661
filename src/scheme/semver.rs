use semver::Version;

/// Parses a semantic version from a git tag string.
///
/// Accepts an optional single `v` or `V` prefix (e.g. "v1.2.3") before the
/// version proper. Pre-release and build metadata are understood by the
/// parser; tags that are not semantic versions at all yield `None`.
///
/// # Example
/// ```ignore
/// assert_eq!(parse_semver_tag("v1.2.3"), Version::parse("1.2.3").ok());
/// assert_eq!(parse_semver_tag("release-1.2.3"), None);
/// ```
pub fn parse_semver_tag(tag: &str) -> Option<Version> {
    let clean_tag = tag
        .strip_prefix('v')
        .or_else(|| tag.strip_prefix('V'))
        .unwrap_or(tag);
    Version::parse(clean_tag).ok()
}

/// The branch a release is cut from, with its role resolved.
///
/// Releases from a primary branch carry no branch suffix; anything else
/// gets the branch name appended so side-branch tags are distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_primary: bool,
}

impl BranchContext {
    /// Resolve a branch name against the configured primary branch set
    pub fn new(name: impl Into<String>, primary_branches: &[String]) -> Self {
        let name = name.into();
        let is_primary = primary_branches.iter().any(|b| b == &name);
        BranchContext { name, is_primary }
    }
}

/// A semantic version proposal derived from existing tags.
///
/// Only the release triple is kept; pre-release and build metadata from
/// parsed tags participate in ordering but are dropped from the proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl ProposedVersion {
    /// Creates a new proposal with the specified components.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        ProposedVersion {
            major,
            minor,
            patch,
        }
    }

    /// Derives a proposal from the highest semantic-version tag present.
    ///
    /// Tags that do not parse as semantic versions are skipped. Ordering
    /// follows semver precedence, so `2.0.0-rc.1` outranks `1.9.0` and the
    /// proposal becomes `2.0.0`. An empty or unparseable tag set yields
    /// `0.0.0`, the base for a first release.
    pub fn from_tags(tags: &[String]) -> Self {
        tags.iter()
            .filter_map(|tag| parse_semver_tag(tag))
            .max()
            .map(|v| ProposedVersion::new(v.major, v.minor, v.patch))
            .unwrap_or(ProposedVersion::new(0, 0, 0))
    }

    /// Applies the requested component bumps, most significant wins.
    ///
    /// When several flags are set only the most significant one applies:
    /// major beats minor beats patch. Bumping a component resets the less
    /// significant ones to zero. With no flag set the proposal is returned
    /// unchanged.
    ///
    /// # Example
    /// ```ignore
    /// let v = ProposedVersion::new(1, 4, 7);
    /// assert_eq!(v.increment(false, true, false), ProposedVersion::new(1, 5, 0));
    /// assert_eq!(v.increment(true, true, true), ProposedVersion::new(2, 0, 0));
    /// ```
    pub fn increment(self, major: bool, minor: bool, patch: bool) -> Self {
        if major {
            ProposedVersion::new(self.major + 1, 0, 0)
        } else if minor {
            ProposedVersion::new(self.major, self.minor + 1, 0)
        } else if patch {
            ProposedVersion::new(self.major, self.minor, self.patch + 1)
        } else {
            self
        }
    }

    /// Formats the full release identifier for a module on a branch.
    ///
    /// The module suffix comes before the branch suffix, and the branch
    /// suffix is omitted on primary branches:
    /// `<major>.<minor>.<patch>[-module][-branch]`.
    pub fn format_release(&self, module: &str, branch: &BranchContext) -> String {
        let mut name = self.to_string();
        if !module.is_empty() {
            name.push('-');
            name.push_str(module);
        }
        if !branch.name.is_empty() && !branch.is_primary {
            name.push('-');
            name.push_str(&branch.name);
        }
        name
    }
}

impl std::fmt::Display for ProposedVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primaries() -> Vec<String> {
        vec!["main".to_string(), "master".to_string()]
    }

    #[test]
    fn test_parse_plain_and_prefixed() {
        assert_eq!(parse_semver_tag("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_semver_tag("v1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(parse_semver_tag("V0.1.0"), Some(Version::new(0, 1, 0)));
    }

    #[test]
    fn test_parse_rejects_non_semver() {
        assert_eq!(parse_semver_tag("release-1.2.3"), None);
        assert_eq!(parse_semver_tag("1.2"), None);
        assert_eq!(parse_semver_tag("2024.03.001"), None);
        assert_eq!(parse_semver_tag("vv1.2.3"), None);
    }

    #[test]
    fn test_from_tags_takes_highest() {
        let tags = vec![
            "0.9.0".to_string(),
            "v1.4.7".to_string(),
            "1.2.0".to_string(),
        ];
        assert_eq!(ProposedVersion::from_tags(&tags), ProposedVersion::new(1, 4, 7));
    }

    #[test]
    fn test_from_tags_prerelease_base_wins() {
        let tags = vec!["2.0.0-rc.1".to_string(), "1.9.0".to_string()];
        assert_eq!(ProposedVersion::from_tags(&tags), ProposedVersion::new(2, 0, 0));
    }

    #[test]
    fn test_from_tags_empty_is_zero() {
        let tags: Vec<String> = vec![];
        assert_eq!(ProposedVersion::from_tags(&tags), ProposedVersion::new(0, 0, 0));
    }

    #[test]
    fn test_increment_most_significant_wins() {
        let v = ProposedVersion::new(1, 4, 7);
        assert_eq!(v.increment(true, false, false), ProposedVersion::new(2, 0, 0));
        assert_eq!(v.increment(false, true, false), ProposedVersion::new(1, 5, 0));
        assert_eq!(v.increment(false, false, true), ProposedVersion::new(1, 4, 8));
        assert_eq!(v.increment(true, true, true), ProposedVersion::new(2, 0, 0));
        assert_eq!(v.increment(false, false, false), v);
    }

    #[test]
    fn test_format_release_suffix_order() {
        let v = ProposedVersion::new(1, 5, 0);
        let feature = BranchContext::new("feature-x", &primaries());
        let main = BranchContext::new("main", &primaries());

        assert_eq!(v.format_release("", &main), "1.5.0");
        assert_eq!(v.format_release("api", &main), "1.5.0-api");
        assert_eq!(v.format_release("", &feature), "1.5.0-feature-x");
        assert_eq!(v.format_release("api", &feature), "1.5.0-api-feature-x");
    }

    #[test]
    fn test_master_is_primary_too() {
        let v = ProposedVersion::new(1, 0, 0);
        let master = BranchContext::new("master", &primaries());
        assert_eq!(v.format_release("", &master), "1.0.0");
    }
}
