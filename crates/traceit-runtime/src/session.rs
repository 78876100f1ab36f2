use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use traceit_types::Role;

use crate::Result;

/// Authenticated session state: the bearer token plus the role tag the
/// views gate on. Mirrors what the original UI kept in local storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// File-backed store at `<data_dir>/session.toml`.
///
/// This is the single point of mutation for persisted auth state. Its
/// lifecycle: unset at startup, set at login, cleared wholesale at logout
/// or on any 401.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join("session.toml"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current session, or None when signed out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let session: Session = toml::from_str(&content)?;
        Ok(Some(session))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;
        debug!(role = %session.role, "session stored");
        Ok(())
    }

    /// Remove the session wholesale. Idempotent.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            debug!("session cleared");
        }
        Ok(())
    }
}
