use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use abi::{Error, StorageConfig};
use tracing::debug;

/// Durable key holding the auth token across runs.
pub trait TokenStorage: fmt::Debug + Send + Sync {
    /// load the persisted token, `None` when nothing is stored
    fn load(&self) -> Result<Option<String>, Error>;
    /// persist the token, replacing any previous one
    fn save(&self, token: &str) -> Result<(), Error>;
    /// remove the persisted token; removing nothing is not an error
    fn remove(&self) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, Error> {
        Ok(Self::new(config.token_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, Error> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;
        // an existing file keeps its old mode on open
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(token.as_bytes())?;
        debug!("token saved to {}", self.path.display());
        Ok(())
    }

    fn remove(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl MemoryTokenStorage {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, Error> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), Error> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), Error> {
        self.slot().take();
        Ok(())
    }
}
