use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// The bearer token pair representing an authenticated session.
///
/// These are the only two values persisted between runs; everything else
/// about the session lives server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// File-backed store for the session token pair.
///
/// At most one session exists per client; the store is owned by the
/// `ApiClient` and handed to it at construction so tests can point it at a
/// temporary directory.
pub struct SessionStore {
    data_dir: PathBuf,
    tokens: SessionTokens,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            tokens: SessionTokens::default(),
        }
    }

    /// Load tokens from disk. Returns true if a session file was found.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(false);
        }
        let contents =
            std::fs::read_to_string(&path).context("Failed to read session file")?;
        self.tokens =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        debug!("Loaded session from disk");
        Ok(true)
    }

    /// Save the current tokens to disk
    pub fn save(&self) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.tokens)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Replace both tokens and persist them.
    pub fn set_tokens(&mut self, access_token: String, refresh_token: String) -> Result<()> {
        self.tokens.access_token = Some(access_token);
        self.tokens.refresh_token = Some(refresh_token);
        self.save()
    }

    /// Drop both tokens and remove the session file.
    pub fn clear(&mut self) -> Result<()> {
        self.tokens = SessionTokens::default();
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Get the access token if one is stored
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.access_token.as_deref()
    }

    /// Get the refresh token if one is stored
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.refresh_token.as_deref()
    }

    /// True iff an access token is present. Purely local: the token may
    /// already have expired server-side.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token.is_some()
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

// ============================================================================
// Tests
// ============================================================================
