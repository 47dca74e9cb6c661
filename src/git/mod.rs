//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! release management needs, allowing for multiple implementations including
//! real repositories and mocks for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing and flexibility.
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.list_tags()?;
//! let branch = repo.head_branch()?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::auth::SshKeyAuth;
use crate::error::Result;

/// Metadata for an annotated tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAnnotation {
    /// The tag message
    pub message: String,
    /// Name recorded as the tagger
    pub tagger_name: String,
    /// Email recorded as the tagger
    pub tagger_email: String,
}

/// Common git operation trait for abstraction
///
/// Abstracts the git operations used when computing and creating releases.
/// Implementations map underlying errors (like `git2::Error`) to the
/// appropriate [crate::error::ReleaseError] variants.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation for mocking git operations
pub trait Repository {
    /// Get all tags in the repository
    ///
    /// Re-reads the tag list on every call so that tags created mid-run are
    /// visible to later proposals.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names currently in the repository
    /// * `Err` - If there's a git error
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Get the branch HEAD currently points at
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g. "main")
    /// * `Err(ReleaseError::DetachedHead)` - If HEAD is detached or the
    ///   branch cannot be determined
    fn head_branch(&self) -> Result<String>;

    /// Verify that a remote with the given name is configured
    ///
    /// # Arguments
    /// * `name` - Name of the remote (e.g., "origin", "upstream")
    ///
    /// # Returns
    /// * `Ok(())` - The remote exists
    /// * `Err(ReleaseError::RemoteNotConfigured)` - It does not
    fn check_remote(&self, name: &str) -> Result<()>;

    /// Create a tag at the current HEAD commit
    ///
    /// With an annotation this creates an annotated tag object carrying the
    /// message and tagger identity; without one, a lightweight tag.
    ///
    /// # Arguments
    /// * `name` - Name for the new tag
    /// * `annotation` - Message and tagger identity, or `None` for lightweight
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(ReleaseError::TagAlreadyExists)` - A tag of that name exists
    fn create_tag(&self, name: &str, annotation: Option<&TagAnnotation>) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// # Arguments
    /// * `name` - Name of the tag to push
    /// * `remote` - Name of the remote to push to
    /// * `auth` - SSH credentials for the transport
    ///
    /// # Returns
    /// * `Ok(String)` - A human-readable status line on success
    /// * `Err(ReleaseError::RemoteTagConflict)` - The remote refused the ref update
    /// * `Err(ReleaseError::PushFailed)` - Transport or authentication failure
    fn push_tag(&self, name: &str, remote: &str, auth: &SshKeyAuth) -> Result<String>;
}
