use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Per-session browser profile directory.
///
/// The chat service keeps its own credentials inside the profile, which
/// is what lets an already-scanned session skip the QR challenge on the
/// next run. The directory is persistent; bootstrap itself stores
/// nothing in it.
pub struct SessionProfile {
    path: PathBuf,
}

impl SessionProfile {
    /// Profile directory named after the session id, under the current
    /// working directory.
    pub fn for_session(session_id: &str) -> Result<Self> {
        if session_id.trim().is_empty() {
            return Err(Error::Browser("session id must not be empty".to_string()));
        }
        Self::at(PathBuf::from(session_id))
    }

    /// Create or reuse a profile at an explicit path.
    pub fn at(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path)?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// DevTools HTTP endpoint for the running browser, read from the
    /// `DevToolsActivePort` file Chrome writes into the profile.
    pub fn devtools_url(&self) -> Option<String> {
        let contents = std::fs::read_to_string(self.path.join("DevToolsActivePort")).ok()?;
        let port: u16 = contents.lines().next()?.trim().parse().ok()?;
        Some(format!("http://localhost:{}", port))
    }
}
