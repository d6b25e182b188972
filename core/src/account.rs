//! Account export and deletion.
//!
//! The snapshot is the boundary representation; where it is kept is up to an
//! [`AccountStorage`] implementation. [`FileAccountStorage`] is the local one:
//! temp file + rename so a crash never leaves a half-written export behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use cyclesync_types::{Partner, User, UserId};

use crate::consent_log::ConsentLogEntry;
use crate::errors::CoreError;

/// Everything the core holds for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub user: User,
    pub partners: Vec<Partner>,
    pub consent_log: Vec<ConsentLogEntry>,
    pub exported_at: DateTime<Utc>,
}

impl AccountSnapshot {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// External persistence for account data.
pub trait AccountStorage {
    /// Persist an export. Returns where it was written.
    fn save_export(&self, snapshot: &AccountSnapshot) -> Result<PathBuf, CoreError>;

    /// Remove everything stored for `user`. Deleting nothing is not an error.
    fn delete(&self, user: UserId) -> Result<(), CoreError>;
}

/// Stores exports as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FileAccountStorage {
    dir: PathBuf,
}

impl FileAccountStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn export_path(&self, user: UserId) -> PathBuf {
        self.dir.join(format!("cyclesync-export-{user}.json"))
    }
}

impl AccountStorage for FileAccountStorage {
    fn save_export(&self, snapshot: &AccountSnapshot) -> Result<PathBuf, CoreError> {
        let json = snapshot.to_json()?;
        fs::create_dir_all(&self.dir)?;
        let path = self.export_path(snapshot.user.id);
        write_owner_only(&path, json.as_bytes())?;
        tracing::info!(user_id = %snapshot.user.id, path = %path.display(), "Wrote account export");
        Ok(path)
    }

    fn delete(&self, user: UserId) -> Result<(), CoreError> {
        let path = self.export_path(user);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(user_id = %user, path = %path.display(), "Removed account export");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Write `bytes` to `path` via a synced temp file in the same directory.
///
/// Exports hold health data, so the file is owner-only (0o600) on Unix.
fn write_owner_only(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
    }
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
