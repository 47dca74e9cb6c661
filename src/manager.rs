use std::path::Path;

use chrono::NaiveDate;

use crate::auth::SshKeyAuth;
use crate::config::Identity;
use crate::error::{ReleaseError, Result};
use crate::git::{Git2Repository, Repository, TagAnnotation};
use crate::scheme::{DateScheme, ProposedVersion};

/// Coordinates release computation and tag lifecycle against one repository.
///
/// Generic over the [Repository] trait so the release logic can run against
/// a mock in tests. Proposals always re-read the tag list, so tags created
/// earlier in a multi-module run are seen by later proposals.
pub struct ReleaseManager<R> {
    repo: R,
    date_scheme: DateScheme,
}

impl ReleaseManager<Git2Repository> {
    /// Open the repository containing `path` and manage releases in it
    pub fn open<P: AsRef<Path>>(path: P, date_scheme: DateScheme) -> Result<Self> {
        Ok(ReleaseManager {
            repo: Git2Repository::open(path)?,
            date_scheme,
        })
    }
}

impl<R: Repository> ReleaseManager<R> {
    pub fn new(repo: R, date_scheme: DateScheme) -> Self {
        ReleaseManager { repo, date_scheme }
    }

    /// Verify the remote exists before any tag work begins
    pub fn check_remote(&self, name: &str) -> Result<()> {
        self.repo.check_remote(name)
    }

    /// The branch HEAD points at
    pub fn current_branch(&self) -> Result<String> {
        self.repo.head_branch()
    }

    pub fn list_tags(&self) -> Result<Vec<String>> {
        self.repo.list_tags()
    }

    pub fn date_scheme(&self) -> &DateScheme {
        &self.date_scheme
    }

    /// The underlying repository, for callers that need direct access
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Propose the next date-based identifier for `module` on `today`.
    ///
    /// Scans the current tag list on every call. In a multi-module run this
    /// is what keeps counters collision-free: a tag created for one module
    /// is visible when the next module's identifier is computed.
    pub fn propose_date_release(&self, today: NaiveDate, module: &str) -> Result<String> {
        let tags = self.repo.list_tags()?;
        self.date_scheme.propose(today, &tags, module)
    }

    /// Derive the semver proposal from the highest existing version tag
    pub fn propose_semver(&self) -> Result<ProposedVersion> {
        let tags = self.repo.list_tags()?;
        Ok(ProposedVersion::from_tags(&tags))
    }

    /// Create a tag at HEAD for a computed release identifier.
    ///
    /// With no message and no identity the tag is lightweight. Anything
    /// else requests an annotated tag, which needs both a tagger name and
    /// email; the check happens here rather than up front, so runs that
    /// never annotate never need an identity.
    pub fn create_tag(&self, name: &str, message: &str, identity: &Identity) -> Result<()> {
        if message.is_empty() && identity.is_empty() {
            return self.repo.create_tag(name, None);
        }

        if !identity.is_complete() {
            return Err(ReleaseError::MissingIdentity);
        }

        let annotation = TagAnnotation {
            message: message.to_string(),
            tagger_name: identity.name.clone(),
            tagger_email: identity.email.clone(),
        };
        self.repo.create_tag(name, Some(&annotation))
    }

    /// Push one tag to `remote`, leaving the local tag intact on failure
    pub fn push_tag(&self, name: &str, remote: &str, auth: &SshKeyAuth) -> Result<String> {
        self.repo.push_tag(name, remote, auth)
    }
}
