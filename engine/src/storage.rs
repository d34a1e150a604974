//! Session token persistence.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use six_cities_types::Token;
use six_cities_utils::{FileMode, atomic_write, remove_if_exists};
use thiserror::Error;

/// File name of the persisted token under the data directory.
pub const TOKEN_FILE_NAME: &str = "six-cities-token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("token storage at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the session token lives between runs.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<Token>, StorageError>;
    fn save(&self, token: &Token) -> Result<(), StorageError>;
    /// Clearing an absent token succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/six-cities/six-cities-token`, or `None` without a data dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("six-cities").join(TOKEN_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Token>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = Token::new(raw.trim());
                Ok((!token.is_empty()).then_some(token))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error(err)),
        }
    }

    fn save(&self, token: &Token) -> Result<(), StorageError> {
        atomic_write(&self.path, token.expose().as_bytes(), FileMode::OwnerOnly)
            .map_err(|err| self.io_error(err))?;
        tracing::debug!(path = %self.path.display(), "Saved session token");
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        remove_if_exists(&self.path).map_err(|err| self.io_error(err))
    }
}

/// In-process store for tests and `--no-persist` style runs.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Token>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: Token) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Token>, StorageError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone())
    }

    fn save(&self, token: &Token) -> Result<(), StorageError> {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self
            .token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}
