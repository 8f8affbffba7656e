//! Durable storage for the API key.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

/// The key the API key is stored under.
pub const CREDENTIAL_KEY: &str = "gemini_api_key";

/// The error type for [`CredentialStore`].
#[derive(Debug)]
pub enum StoreError {
    /// The store could not be read or written.
    Io(io::Error),
    /// The store exists but is not a JSON object.
    Format(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "failed to access the store: {err}"),
            StoreError::Format(err) => write!(f, "malformed store: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Format(err) => Some(err),
        }
    }
}

/// A place that keeps the API key between runs.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored key, if any.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replaces the stored key.
    fn save(&self, credential: &str) -> Result<(), StoreError>;
}

/// A key-value store kept as a JSON object in a file.
///
/// Entries other than [`CREDENTIAL_KEY`] are preserved on save.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the file at `path`. The file is created
    /// on the first save.
    #[inline]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(Map::new());
            }
            Err(err) => return Err(StoreError::Io(err)),
        };
        serde_json::from_str(&text).map_err(StoreError::Format)
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .map(ToOwned::to_owned))
    }

    fn save(&self, credential: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(CREDENTIAL_KEY.to_owned(), credential.into());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Io)?;
        }
        let text = serde_json::to_string_pretty(&entries)
            .map_err(StoreError::Format)?;
        fs::write(&self.path, text).map_err(StoreError::Io)?;
        debug!("saved the API key to {}", self.path.display());
        Ok(())
    }
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    credential: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Creates a store already holding `credential`.
    #[inline]
    pub fn with_credential<S: Into<String>>(credential: S) -> Self {
        Self {
            credential: Mutex::new(Some(credential.into())),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let credential =
            self.credential.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(credential.clone())
    }

    fn save(&self, credential: &str) -> Result<(), StoreError> {
        *self.credential.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(credential.to_owned());
        Ok(())
    }
}
