//! File mode classification
//!
//! Wraps the raw `st_mode` word and answers the questions the unary tests
//! ask, so call sites never touch the mask constants directly.

use nix::sys::stat::{Mode, SFlag};
use std::time::SystemTime;

/// The `st_mode` of a probed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(u32);

impl FileMode {
    pub fn from_raw(raw: u32) -> Self {
        FileMode(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    fn file_type(self) -> SFlag {
        SFlag::from_bits_truncate(self.0 as libc::mode_t) & SFlag::S_IFMT
    }

    fn permissions(self) -> Mode {
        Mode::from_bits_truncate(self.0 as libc::mode_t)
    }

    pub fn is_regular(self) -> bool {
        self.file_type() == SFlag::S_IFREG
    }

    pub fn is_dir(self) -> bool {
        self.file_type() == SFlag::S_IFDIR
    }

    pub fn is_symlink(self) -> bool {
        self.file_type() == SFlag::S_IFLNK
    }

    pub fn is_fifo(self) -> bool {
        self.file_type() == SFlag::S_IFIFO
    }

    pub fn is_socket(self) -> bool {
        self.file_type() == SFlag::S_IFSOCK
    }

    /// Any device node, block or character
    pub fn is_device(self) -> bool {
        let ft = self.file_type();
        ft == SFlag::S_IFBLK || ft == SFlag::S_IFCHR
    }

    pub fn is_char_device(self) -> bool {
        self.file_type() == SFlag::S_IFCHR
    }

    /// A device node that is not a character device
    pub fn is_block_device(self) -> bool {
        self.is_device() && !self.is_char_device()
    }

    pub fn is_sticky(self) -> bool {
        self.permissions().contains(Mode::S_ISVTX)
    }

    pub fn is_setuid(self) -> bool {
        self.permissions().contains(Mode::S_ISUID)
    }

    pub fn is_setgid(self) -> bool {
        self.permissions().contains(Mode::S_ISGID)
    }

    /// Any of the three execute bits is set
    pub fn is_executable_by_anyone(self) -> bool {
        self.permissions()
            .intersects(Mode::S_IXUSR | Mode::S_IXGRP | Mode::S_IXOTH)
    }
}

/// What a metadata probe reports about a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub mode: FileMode,
    pub len: u64,
    pub modified: SystemTime,
    pub dev: u64,
    pub ino: u64,
}

impl FileInfo {
    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        FileInfo {
            mode: FileMode::from_raw(meta.mode()),
            len: meta.len(),
            modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            dev: meta.dev(),
            ino: meta.ino(),
        }
    }

    /// Same device and inode
    pub fn same_file(&self, other: &FileInfo) -> bool {
        self.dev == other.dev && self.ino == other.ino
    }
}
