use std::env;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod commands;

/// File name of the preloadable module produced by `xmark-preload`.
pub const LIBRARY_FILE: &str = "libxmark_preload.so";

/// Selects the GTK/GDK windowing backend of the target program.
pub const BACKEND_ENV: &str = "GDK_BACKEND";

/// Libraries the dynamic loader maps ahead of everything else.
pub const PRELOAD_ENV: &str = "LD_PRELOAD";

/// Make `path` absolute: canonicalize it if it exists, otherwise join it
/// onto the current working directory.
pub fn absolutize(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    match path.canonicalize() {
        Ok(p) => Ok(p),
        Err(_) if path.is_absolute() => Ok(path.to_path_buf()),
        Err(_) => {
            let cwd = env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(path))
        }
    }
}

/// Locate the preload module.
///
/// An explicit path wins. Otherwise the module is expected next to the
/// launcher executable, falling back to the current directory.
pub fn locate_library(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return absolutize(path);
    }
    let sibling = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LIBRARY_FILE)))
        .filter(|candidate| candidate.is_file());
    match sibling {
        Some(path) => Ok(path),
        None => absolutize(LIBRARY_FILE),
    }
}

/// Value for `LD_PRELOAD` with `library` ahead of any existing entries.
///
/// An existing entry equal to `library` is dropped so the module is not
/// loaded twice.
pub fn preload_value(library: &Path, existing: Option<&OsStr>) -> OsString {
    let mut value = library.as_os_str().to_os_string();
    let Some(existing) = existing else {
        return value;
    };
    let entries = existing.as_bytes().split(|&b| b == b':' || b == b' ');
    for entry in entries.filter(|e| !e.is_empty()).map(OsStr::from_bytes) {
        if Path::new(entry) == library {
            continue;
        }
        value.push(":");
        value.push(entry);
    }
    value
}
