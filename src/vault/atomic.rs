//! Crash-safe file writes.
//!
//! Two primitives:
//! - `write_new` creates a file that must not exist yet, removing it
//!   again if anything fails part-way.
//! - `write_atomic` replaces a file via `<path>.new` + rename, so the
//!   target is always either the complete old file or the complete new
//!   one.  The temp file is removed on every error path.
//!
//! Atomicity relies on rename-replace being atomic within one volume,
//! which is why the temp file is always a sibling of the target.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::errors::{LockboxError, Result};

/// Suffix appended to the target path for the in-flight copy.
pub const TEMP_SUFFIX: &str = ".new";

/// Path of the temp file used while replacing `path`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(TEMP_SUFFIX);
    PathBuf::from(s)
}

/// Removes the file at `path` when dropped, unless disarmed.
struct RemoveOnDrop {
    path: PathBuf,
    armed: bool,
}

impl RemoveOnDrop {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        if self.armed {
            // Best-effort: the error that got us here is the one that matters.
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Mode for files this module creates (Unix).  Replacements keep the
/// mode of the file they replace.
pub const NEW_FILE_MODE: u32 = 0o600;

/// Create `path` (which must not exist) and write `bytes` to it.
///
/// Existence is checked by the open itself (`create_new`), so there is
/// no window between the check and the create.
pub fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    create_new_with(path, |file| file.write_all(bytes))
}

/// `write_new` with the file body produced by `fill`.
///
/// If `fill` or the sync fails, the half-written file is removed.
fn create_new_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut file = create_exclusive(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => LockboxError::AlreadyExists(path.to_path_buf()),
        _ => LockboxError::Io(e),
    })?;
    let guard = RemoveOnDrop::new(path.to_path_buf());

    fill(&mut file)?;
    file.sync_all()?;
    sync_parent(path);

    guard.disarm();
    Ok(())
}

/// Replace `path` with `bytes` atomically.
///
/// On error the original file is untouched and no temp file is left
/// behind.  A stale temp file from an earlier crash is discarded first.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path(path);

    // Errors here are ignored; the create below reports anything real.
    if fs::remove_file(&tmp).is_ok() {
        tracing::debug!(path = %tmp.display(), "removed stale temp file");
    }

    let mut file = create_exclusive(&tmp)?;
    let guard = RemoveOnDrop::new(tmp.clone());

    file.write_all(bytes)?;
    copy_permissions(path, &file)?;
    file.sync_all()?;

    fs::rename(&tmp, path).map_err(|source| LockboxError::RenameFailed {
        from: tmp.clone(),
        to: path.to_path_buf(),
        source,
    })?;
    guard.disarm();
    sync_parent(path);

    Ok(())
}

/// Open a fresh file, failing if anything already sits at `path`.
fn create_exclusive(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    // On Unix, restrict new files to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(NEW_FILE_MODE);
    }

    options.open(path)
}

/// Give the replacement the same mode as the file it replaces.
#[cfg(unix)]
fn copy_permissions(target: &Path, replacement: &File) -> Result<()> {
    if let Ok(meta) = fs::metadata(target) {
        replacement.set_permissions(meta.permissions())?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn copy_permissions(_target: &Path, _replacement: &File) -> Result<()> {
    Ok(())
}

/// Persist the directory entry after a create or rename.
#[cfg(unix)]
fn sync_parent(path: &Path) {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}
