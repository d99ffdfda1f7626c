use super::KeyValueStore;
use crate::error::{AuthError, StorageError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One file per key under a root directory.
///
/// Keys are escaped into file names, so `transactions:<id>` and similar keys
/// are safe to use. Files are written owner-only on unix.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let root = root.into();

        // Create storage directory if it doesn't exist
        if !root.exists() {
            fs::create_dir_all(&root)?;
        }

        Ok(Self { root })
    }

    /// Store under the platform data directory
    pub fn open_default() -> Result<Self, AuthError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find data directory".to_string()))?
            .join("moneymap");

        Self::new(data_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(encode_key(key)))
    }

    /// Scratch file for atomic writes. Keys never start with a dot, so this
    /// cannot collide with a stored key.
    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{}.tmp", encode_key(key)))
    }
}

/// Keep `[A-Za-z0-9._-]`, escape every other byte as `%XX`
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp_path = self.tmp_path_for(key);

        fs::write(&tmp_path, value).map_err(|e| io_error(key, e))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&tmp_path)
                .map_err(|e| io_error(key, e))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| io_error(key, e))?;
        }

        fs::rename(&tmp_path, &path).map_err(|e| io_error(key, e))?;
        tracing::debug!("Stored key '{}' at {:?}", key, path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}
