//! Collision-safe file moves
//!
//! Every move goes through [`unique_destination`]: an occupied target
//! `name.pdf` becomes `name_1.pdf`, `name_2.pdf`, ... so no file is ever
//! overwritten. The exists-check and the rename are not atomic with respect
//! to other processes writing into the same tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// First free path among `target`, `<stem>_1<ext>`, `<stem>_2<ext>`, ...
pub fn unique_destination(target: &Path) -> PathBuf {
    if !target.exists() {
        return target.to_path_buf();
    }

    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = target
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1u32;
    loop {
        let candidate = target.with_file_name(format!("{}_{}{}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Rename `from` to `to`, falling back to copy + remove across filesystems
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if !from.is_file() {
                return Err(rename_err);
            }
            tracing::debug!(
                from = %from.display(),
                to = %to.display(),
                error = %rename_err,
                "Rename failed, copying instead"
            );
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

/// Move `from` to `target` (or the first free variant of it), creating parent directories
pub fn place(from: &Path, target: &Path) -> io::Result<PathBuf> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let destination = unique_destination(target);
    move_file(from, &destination)?;
    Ok(destination)
}

/// Move `from` into `quarantine_dir`, keeping its file name
pub fn quarantine(from: &Path, quarantine_dir: &Path) -> io::Result<PathBuf> {
    let file_name = from.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("No file name: {}", from.display()),
        )
    })?;
    place(from, &quarantine_dir.join(file_name))
}

/// Give `path` a `.pdf` extension in place unless it already has one (any case)
pub fn ensure_pdf_extension(path: &Path) -> io::Result<PathBuf> {
    let has_pdf_extension = path
        .extension()
        .map(|e| e.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if has_pdf_extension {
        return Ok(path.to_path_buf());
    }

    let renamed = unique_destination(&path.with_extension("pdf"));
    fs::rename(path, &renamed)?;
    Ok(renamed)
}
