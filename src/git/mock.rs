use std::cell::RefCell;
use std::collections::HashMap;

use crate::auth::SshKeyAuth;
use crate::error::{ReleaseError, Result};
use crate::git::{Repository, TagAnnotation};

/// How a mock push should fail
#[derive(Debug, Clone)]
pub enum MockPushFailure {
    /// Transport-level failure (network, auth)
    Transport(String),
    /// The remote refused the ref update
    Conflict(String),
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: RefCell<Vec<String>>,
    annotations: RefCell<HashMap<String, TagAnnotation>>,
    branch: Option<String>,
    remotes: Vec<String>,
    push_failure: Option<MockPushFailure>,
    pushed: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            tags: RefCell::new(Vec::new()),
            annotations: RefCell::new(HashMap::new()),
            branch: None,
            remotes: Vec::new(),
            push_failure: None,
            pushed: RefCell::new(Vec::new()),
        }
    }

    /// Set the branch HEAD points at
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Add a configured remote
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remotes.push(remote.into());
        self
    }

    /// Seed existing tags
    pub fn with_tags(self, tags: &[&str]) -> Self {
        self.tags
            .borrow_mut()
            .extend(tags.iter().map(|t| t.to_string()));
        self
    }

    /// Make every push fail at the transport level
    pub fn fail_pushes_with_transport(mut self, reason: impl Into<String>) -> Self {
        self.push_failure = Some(MockPushFailure::Transport(reason.into()));
        self
    }

    /// Make every push be rejected by the remote
    pub fn fail_pushes_with_conflict(mut self, reason: impl Into<String>) -> Self {
        self.push_failure = Some(MockPushFailure::Conflict(reason.into()));
        self
    }

    /// True if the tag exists locally
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.borrow().iter().any(|t| t == name)
    }

    /// The annotation recorded for a tag, if it was created annotated
    pub fn annotation_for(&self, name: &str) -> Option<TagAnnotation> {
        self.annotations.borrow().get(name).cloned()
    }

    /// Every (tag, remote) pair successfully pushed, in order
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().clone())
    }

    fn head_branch(&self) -> Result<String> {
        self.branch.clone().ok_or(ReleaseError::DetachedHead)
    }

    fn check_remote(&self, name: &str) -> Result<()> {
        if self.remotes.iter().any(|r| r == name) {
            Ok(())
        } else {
            Err(ReleaseError::RemoteNotConfigured {
                name: name.to_string(),
            })
        }
    }

    fn create_tag(&self, name: &str, annotation: Option<&TagAnnotation>) -> Result<()> {
        if self.has_tag(name) {
            return Err(ReleaseError::TagAlreadyExists {
                name: name.to_string(),
            });
        }

        self.tags.borrow_mut().push(name.to_string());
        if let Some(ann) = annotation {
            self.annotations
                .borrow_mut()
                .insert(name.to_string(), ann.clone());
        }

        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str, _auth: &SshKeyAuth) -> Result<String> {
        self.check_remote(remote)?;

        match &self.push_failure {
            Some(MockPushFailure::Transport(reason)) => Err(ReleaseError::PushFailed {
                name: name.to_string(),
                remote: remote.to_string(),
                reason: reason.clone(),
            }),
            Some(MockPushFailure::Conflict(reason)) => Err(ReleaseError::RemoteTagConflict {
                name: name.to_string(),
                remote: remote.to_string(),
                reason: reason.clone(),
            }),
            None => {
                self.pushed
                    .borrow_mut()
                    .push((name.to_string(), remote.to_string()));
                Ok(format!("pushed tag '{}' to '{}'", name, remote))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_create_and_list_tags() {
        let repo = MockRepository::new().with_tags(&["2024.01.001"]);

        repo.create_tag("2024.01.002", None).unwrap();

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags, vec!["2024.01.001", "2024.01.002"]);
    }

    #[test]
    fn test_mock_duplicate_tag_rejected() {
        let repo = MockRepository::new().with_tags(&["1.0.0"]);

        let result = repo.create_tag("1.0.0", None);
        assert!(matches!(result, Err(ReleaseError::TagAlreadyExists { .. })));
    }

    #[test]
    fn test_mock_records_annotation() {
        let repo = MockRepository::new();
        let ann = TagAnnotation {
            message: "release".to_string(),
            tagger_name: "Test".to_string(),
            tagger_email: "test@example.com".to_string(),
        };

        repo.create_tag("1.0.0", Some(&ann)).unwrap();

        assert_eq!(repo.annotation_for("1.0.0"), Some(ann));
        assert_eq!(repo.annotation_for("2.0.0"), None);
    }

    #[test]
    fn test_mock_branch_and_remote() {
        let repo = MockRepository::new().with_branch("main").with_remote("origin");

        assert_eq!(repo.head_branch().unwrap(), "main");
        assert!(repo.check_remote("origin").is_ok());
        assert!(matches!(
            repo.check_remote("upstream"),
            Err(ReleaseError::RemoteNotConfigured { .. })
        ));
    }

    #[test]
    fn test_mock_detached_head() {
        let repo = MockRepository::new();
        assert!(matches!(repo.head_branch(), Err(ReleaseError::DetachedHead)));
    }

    #[test]
    fn test_mock_push_records_and_fails() {
        let auth = SshKeyAuth::new("/tmp/key");

        let ok = MockRepository::new().with_remote("origin");
        ok.push_tag("1.0.0", "origin", &auth).unwrap();
        assert_eq!(ok.pushed_tags(), vec![("1.0.0".to_string(), "origin".to_string())]);

        let failing = MockRepository::new()
            .with_remote("origin")
            .fail_pushes_with_transport("connection refused");
        let err = failing.push_tag("1.0.0", "origin", &auth).unwrap_err();
        assert!(matches!(err, ReleaseError::PushFailed { .. }));
        assert!(failing.pushed_tags().is_empty());
    }
}
