//! Definition file discovery and path preconditions.

use crate::error::{Error, PreconditionKind, Result};
use crate::parser::EXTENSION;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Require `path` to be a directory that is not a symbolic link.
pub fn require_dir(path: &Path) -> Result<()> {
    let meta = metadata(path)?;
    if !meta.is_dir() {
        return Err(precondition(path, PreconditionKind::NotADirectory));
    }
    Ok(())
}

/// Require `path` to be an existing regular file that is not a symbolic link.
pub fn require_file(path: &Path) -> Result<()> {
    let meta = metadata(path)?;
    if !meta.is_file() {
        return Err(precondition(path, PreconditionKind::NotAFile));
    }
    Ok(())
}

/// Recursively collect every `*.proto` file below `root`, in sorted order.
///
/// Symbolic links to definition files are rejected. Files reached through a
/// symbolic link to a directory are skipped, so linked or looping directories
/// never yield the same file twice.
pub fn find_definitions(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        EXTENSION
    );
    // The escaped root is always a valid pattern.
    let entries = glob::glob(&pattern).map_err(|e| Error::Io {
        path: root.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) if through_symlinked_dir(root, e.path())? => continue,
            Err(e) => {
                return Err(Error::Io {
                    path: e.path().to_path_buf(),
                    source: e.into(),
                })
            }
        };
        let parent = path.parent().unwrap_or(root);
        if through_symlinked_dir(root, parent)? {
            debug!(path = %path.display(), "skipping file below a symlinked directory");
            continue;
        }
        let meta = metadata(&path)?;
        if meta.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Whether `dir`, or any directory between `root` and it, is a symbolic link.
///
/// Components are checked from `root` downwards, so a link loop is caught at
/// its first hop.
fn through_symlinked_dir(root: &Path, dir: &Path) -> Result<bool> {
    let Ok(relative) = dir.strip_prefix(root) else {
        return Ok(false);
    };
    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        let meta = fs::symlink_metadata(&current).map_err(|source| Error::Io {
            path: current.clone(),
            source,
        })?;
        if meta.file_type().is_symlink() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn metadata(path: &Path) -> Result<fs::Metadata> {
    let meta = fs::symlink_metadata(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => precondition(path, PreconditionKind::Missing),
        _ => Error::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    if meta.file_type().is_symlink() {
        return Err(precondition(path, PreconditionKind::SymbolicLink));
    }
    Ok(meta)
}

fn precondition(path: &Path, reason: PreconditionKind) -> Error {
    Error::PreconditionViolation {
        path: path.to_path_buf(),
        reason,
    }
}
