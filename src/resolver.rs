//! Executable check for `-x`
//!
//! The operand is always checked in place, after the host has resolved it
//! against its working directory. PATH is never searched: `-x tool` asks
//! about a file named `tool`, not about the command `tool` would run.

use std::path::{Path, PathBuf};

use crate::mode::FileInfo;

/// The file `path` names, if it is a runnable file
pub fn look_path(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        return None;
    }
    is_executable_file(path).then(|| path.to_path_buf())
}

/// A non-directory with at least one execute bit
fn is_executable_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| {
            let mode = FileInfo::from_metadata(&meta).mode;
            !mode.is_dir() && mode.is_executable_by_anyone()
        })
        .unwrap_or(false)
}
