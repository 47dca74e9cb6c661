use std::path::{Path, PathBuf};

use git2::{Cred, CredentialType, RemoteCallbacks};

/// SSH credentials used when pushing to a remote.
///
/// Wraps a private key path and the username presented to the server
/// (the one from the remote URL when present, `git` otherwise).
#[derive(Debug, Clone)]
pub struct SshKeyAuth {
    key_path: PathBuf,
    username: String,
}

impl SshKeyAuth {
    /// Authenticate with the given private key file
    pub fn new<P: AsRef<Path>>(key_path: P) -> Self {
        SshKeyAuth {
            key_path: key_path.as_ref().to_path_buf(),
            username: "git".to_string(),
        }
    }

    /// The conventional default key location, `~/.ssh/id_rsa`
    pub fn default_key_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ssh")
            .join("id_rsa")
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Remote callbacks with a credentials handler wired to this key.
    ///
    /// SSH transports get the configured key; anything else falls back to
    /// the credential helpers from the git configuration.
    pub fn callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            if allowed_types.contains(CredentialType::SSH_KEY) {
                Cred::ssh_key(
                    username_from_url.unwrap_or(&self.username),
                    None,
                    &self.key_path,
                    None,
                )
            } else {
                Cred::default()
            }
        });
        callbacks
    }
}
