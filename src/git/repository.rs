use std::cell::RefCell;
use std::path::Path;

use git2::{ErrorClass, ErrorCode, PushOptions, Repository as Git2Repo, Signature};

use crate::auth::SshKeyAuth;
use crate::error::{ReleaseError, Result};
use crate::git::TagAnnotation;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository containing `path`, searching parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|_| ReleaseError::NotARepository {
            path: path.as_ref().to_path_buf(),
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn head_branch(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e)
                if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound =>
            {
                return Err(ReleaseError::DetachedHead)
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Err(ReleaseError::DetachedHead);
        }

        head.shorthand()
            .map(|s| s.to_string())
            .ok_or(ReleaseError::DetachedHead)
    }

    fn check_remote(&self, name: &str) -> Result<()> {
        self.repo
            .find_remote(name)
            .map(|_| ())
            .map_err(|_| ReleaseError::RemoteNotConfigured {
                name: name.to_string(),
            })
    }

    fn create_tag(&self, name: &str, annotation: Option<&TagAnnotation>) -> Result<()> {
        let reference_name = format!("refs/tags/{}", name);
        if self.repo.find_reference(&reference_name).is_ok() {
            return Err(ReleaseError::TagAlreadyExists {
                name: name.to_string(),
            });
        }

        let head = self.repo.head()?.peel_to_commit()?;

        match annotation {
            None => {
                self.repo.tag_lightweight(name, head.as_object(), false)?;
            }
            Some(ann) => {
                let tagger = Signature::now(&ann.tagger_name, &ann.tagger_email)?;
                self.repo
                    .tag(name, head.as_object(), &tagger, &ann.message, false)?;
            }
        }

        Ok(())
    }

    fn push_tag(&self, name: &str, remote: &str, auth: &SshKeyAuth) -> Result<String> {
        let mut remote_handle =
            self.repo
                .find_remote(remote)
                .map_err(|_| ReleaseError::RemoteNotConfigured {
                    name: remote.to_string(),
                })?;

        // Filled in by the push_update_reference callback when the remote
        // accepts the connection but refuses the ref update itself.
        let rejected: RefCell<Option<String>> = RefCell::new(None);

        let mut callbacks = auth.callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                *rejected.borrow_mut() = Some(status.to_string());
                Err(git2::Error::from_str(&format!(
                    "remote rejected {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
        let outcome = remote_handle.push(&[refspec.as_str()], Some(&mut push_options));

        let rejection = rejected.take();
        match (outcome, rejection) {
            (Ok(()), None) => Ok(format!("pushed tag '{}' to '{}'", name, remote)),
            (_, Some(reason)) => Err(ReleaseError::RemoteTagConflict {
                name: name.to_string(),
                remote: remote.to_string(),
                reason,
            }),
            (Err(e), None) => Err(classify_push_error(name, remote, e)),
        }
    }
}

/// Map a push-time git2 error to the matching release error.
///
/// Non-fast-forward answers mean the tag already exists remotely with a
/// different target; everything else is a transport-level failure, prefixed
/// with the transport class when it is recognizable.
fn classify_push_error(name: &str, remote: &str, err: git2::Error) -> ReleaseError {
    if err.code() == ErrorCode::NotFastForward {
        return ReleaseError::RemoteTagConflict {
            name: name.to_string(),
            remote: remote.to_string(),
            reason: err.message().to_string(),
        };
    }

    let reason = match err.class() {
        ErrorClass::Net => format!("network error: {}", err.message()),
        ErrorClass::Ssh => format!("ssh error: {}", err.message()),
        ErrorClass::Http => format!("http error: {}", err.message()),
        _ => err.message().to_string(),
    };

    ReleaseError::PushFailed {
        name: name.to_string(),
        remote: remote.to_string(),
        reason,
    }
}
