//! Session state and persistence.
//!
//! The store keeps the current session in a watch channel so the UI can
//! subscribe before the first signal and react to every later change.
//! A signed-in session is persisted to `<home>/session.json` with restricted
//! permissions (0600), which is what lets a restart come back signed in.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Persisted session filename.
const SESSION_FILE: &str = "session.json";

/// The authenticated-identity handle issued by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-assigned user id.
    pub user_id: String,
    /// Email the session was established with.
    pub email: String,
    /// Bearer token for the session.
    pub id_token: String,
}

/// One delivery of session state.
///
/// `Unknown` is only ever observed before the startup restore has run; every
/// later signal is an explicit signed-in or signed-out answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionSignal {
    #[default]
    Unknown,
    SignedOut,
    SignedIn(Session),
}

impl SessionSignal {
    /// Returns true once the provider has answered either way.
    pub fn is_known(&self) -> bool {
        !matches!(self, SessionSignal::Unknown)
    }
}

/// Process-wide session state with subscribe semantics.
pub struct SessionStore {
    tx: watch::Sender<SessionSignal>,
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store backed by the default session path.
    pub fn new() -> Self {
        Self::at(crate::config::paths::session_path())
    }

    /// Creates a store backed by a specific session file path.
    pub fn at(path: PathBuf) -> Self {
        let (tx, _rx) = watch::channel(SessionSignal::Unknown);
        Self { tx, path }
    }

    /// Subscribes to session changes.
    ///
    /// Subscribe before calling [`SessionStore::restore`] and the first
    /// signal is never missed.
    pub fn subscribe(&self) -> watch::Receiver<SessionSignal> {
        self.tx.subscribe()
    }

    /// Returns the most recently published signal.
    pub fn current(&self) -> SessionSignal {
        self.tx.borrow().clone()
    }

    /// Publishes the persisted session if one exists, `SignedOut` otherwise.
    ///
    /// This is the first answer subscribers observe after startup. An
    /// unreadable session file is treated as signed out, not as a failure.
    pub fn restore(&self) {
        let signal = match self.read_session() {
            Ok(Some(session)) => SessionSignal::SignedIn(session),
            Ok(None) => SessionSignal::SignedOut,
            Err(err) => {
                tracing::warn!("discarding unreadable session file: {err:#}");
                SessionSignal::SignedOut
            }
        };
        self.tx.send_replace(signal);
    }

    /// Persists the session and publishes `SignedIn`.
    ///
    /// # Errors
    /// Returns an error if the session file cannot be written; the signal is
    /// still published so the current process stays signed in.
    pub fn establish(&self, session: Session) -> Result<()> {
        let persisted = self.write_session(&session);
        self.tx.send_replace(SessionSignal::SignedIn(session));
        persisted
    }

    /// Removes the persisted session and publishes `SignedOut`.
    ///
    /// # Errors
    /// Returns an error if the session file exists but cannot be removed.
    pub fn sign_out(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        self.tx.send_replace(SessionSignal::SignedOut);
        Ok(())
    }

    fn read_session(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", self.path.display()))?;

        Ok(Some(session))
    }

    fn write_session(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
