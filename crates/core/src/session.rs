//! Session state store.
//!
//! Single owner of "who is logged in and with what role". Views and controllers receive a
//! reference to the store; nothing reads the session from ambient state.
//!
//! ## Persistence
//!
//! Only the `user` sub-tree (token and identity) survives a restart. It is written as:
//!
//! ```text
//! { "version": 1, "user": { "token": "...", "user": { ...identity... } } }
//! ```
//!
//! A file with another version or unreadable content is discarded and the store starts
//! anonymous.

use crate::constants::SESSION_FORMAT_VERSION;
use crate::models::LoginUser;
use crate::{ClientError, ClientResult};
use meditrack_types::{ProviderId, Role, UserId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Role exactly as the backend sent it.
    pub role_claim: String,
    /// Doctor record id, present for doctor accounts.
    #[serde(default)]
    pub doc_id: Option<ProviderId>,
}

impl Identity {
    /// The role, or `None` when the claim is outside {admin, doctor, patient}.
    ///
    /// An unrecognised role gets no navigation and no role views.
    pub fn role(&self) -> Option<Role> {
        self.role_claim.parse().ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<LoginUser> for Identity {
    fn from(user: LoginUser) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role_claim: user.role,
            doc_id: user.doc_id,
        }
    }
}

/// The persisted sub-tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<Identity>,
}

#[derive(Serialize, Deserialize)]
struct PersistedRoot {
    version: u32,
    user: SessionState,
}

#[derive(Debug)]
pub struct SessionStore {
    state: SessionState,
    file: Option<PathBuf>,
}

impl SessionStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            state: SessionState::default(),
            file: None,
        }
    }

    /// Opens the store backed by `file`, rehydrating a previous session if one is stored.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::SessionRead` if the file exists but cannot be read. Content that
    /// does not parse, or carries another format version, is discarded rather than reported.
    pub fn open(file: impl Into<PathBuf>) -> ClientResult<Self> {
        let file = file.into();
        let state = match fs::read_to_string(&file) {
            Ok(contents) => rehydrate(&file, &contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionState::default(),
            Err(e) => return Err(ClientError::SessionRead(e)),
        };

        Ok(Self {
            state,
            file: Some(file),
        })
    }

    /// Replaces the current session. No merge: the previous identity is gone.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidInput` for a blank token, or a session write error if the
    /// backing file cannot be updated (the in-memory session is already replaced).
    pub fn set_credentials(
        &mut self,
        token: impl Into<String>,
        identity: Identity,
    ) -> ClientResult<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::InvalidInput("session token cannot be empty".into()));
        }

        tracing::info!(
            user_id = %identity.user_id,
            role = %identity.role_claim,
            "session credentials set"
        );
        self.state = SessionState {
            token: Some(token),
            user: Some(identity),
        };
        self.persist()
    }

    /// Back to anonymous. Used on logout and when the backend rejects the token.
    pub fn clear_credentials(&mut self) -> ClientResult<()> {
        if let Some(user) = &self.state.user {
            tracing::info!(user_id = %user.user_id, "session cleared");
        }
        self.state = SessionState::default();
        self.persist()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.identity().map(|u| u.user_id)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().and_then(Identity::role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.token.is_some() && self.state.user.is_some()
    }

    fn persist(&self) -> ClientResult<()> {
        let Some(file) = &self.file else {
            return Ok(());
        };

        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(ClientError::SessionDirCreation)?;
        }

        let root = PersistedRoot {
            version: SESSION_FORMAT_VERSION,
            user: self.state.clone(),
        };
        let json = serde_json::to_string_pretty(&root).map_err(ClientError::SessionSerialization)?;

        let tmp = file.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(ClientError::SessionWrite)?;
        fs::rename(&tmp, file).map_err(ClientError::SessionWrite)?;
        Ok(())
    }
}

fn rehydrate(file: &Path, contents: &str) -> SessionState {
    match serde_json::from_str::<PersistedRoot>(contents) {
        Ok(root) if root.version == SESSION_FORMAT_VERSION => root.user,
        Ok(root) => {
            tracing::warn!(
                "discarding session file {} with format version {}",
                file.display(),
                root.version
            );
            SessionState::default()
        }
        Err(e) => {
            tracing::warn!("discarding unreadable session file {}: {}", file.display(), e);
            SessionState::default()
        }
    }
}
