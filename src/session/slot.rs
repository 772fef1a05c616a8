//! Local key-value slot holding the session identity.

use crate::domain::{MarketplaceError, Result, SessionIdentity};
use std::path::PathBuf;

/// A single persisted `{id, name, email}` record.
pub trait SessionSlot {
    /// Reads the stored identity, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be decoded.
    fn load(&self) -> Result<Option<SessionIdentity>>;

    /// Overwrites the stored identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be written.
    fn store(&mut self, identity: &SessionIdentity) -> Result<()>;

    /// Removes the stored identity. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be removed.
    fn clear(&mut self) -> Result<()>;
}

/// Process-local slot, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionSlot {
    identity: Option<SessionIdentity>,
}

impl SessionSlot for MemorySessionSlot {
    fn load(&self) -> Result<Option<SessionIdentity>> {
        Ok(self.identity.clone())
    }

    fn store(&mut self, identity: &SessionIdentity) -> Result<()> {
        self.identity = Some(identity.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.identity = None;
        Ok(())
    }
}

/// Slot stored as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionSlot {
    path: PathBuf,
}

impl FileSessionSlot {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionSlot for FileSessionSlot {
    fn load(&self) -> Result<Option<SessionIdentity>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| MarketplaceError::Storage(format!("invalid session slot: {e}")))
    }

    fn store(&mut self, identity: &SessionIdentity) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(identity)
            .map_err(|e| MarketplaceError::Storage(format!("failed to encode session: {e}")))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
