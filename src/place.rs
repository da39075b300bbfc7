//! Directory creation and file placement

use crate::error::{Error, Result};
use crate::layout::DestinationPlan;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Make sure every folder of `plan` exists, shallowest first.
///
/// Each level is checked and created on its own, and a level that already
/// exists (or appears between the check and the create) counts as success.
pub fn ensure(plan: &DestinationPlan) -> Result<()> {
    for level in plan.levels() {
        create_dir_if_missing(&level)?;
    }
    Ok(())
}

fn create_dir_if_missing(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    match fs::create_dir(path) {
        Ok(()) => {
            debug!(?path, "Created directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
            trace!(?path, "Directory appeared concurrently");
            Ok(())
        }
        Err(source) => Err(Error::CreateDirectory {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Move `source` into the folder of `plan`, keeping its file name.
///
/// The folder is built first when missing. An existing file with the same
/// name at the destination is replaced. Returns the new path.
pub fn place(source: &Path, plan: &DestinationPlan) -> Result<PathBuf> {
    let filename = source.file_name().ok_or_else(|| Error::InvalidFilename {
        path: source.to_path_buf(),
    })?;

    let dest_dir = plan.path();
    if !dest_dir.is_dir() {
        ensure(plan)?;
    }

    let dest = dest_dir.join(filename);
    fs::rename(source, &dest).map_err(|e| Error::MoveFile {
        from: source.to_path_buf(),
        to: dest.clone(),
        source: e,
    })?;

    Ok(dest)
}
