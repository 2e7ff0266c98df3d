//! Host backed by the real filesystem and process state

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, HostConfig};
use crate::eval::TestError;
use crate::host::{join_relative, Access, HostContext};
use crate::mode::FileInfo;
use crate::resolver;
use crate::vars::{Variable, Variables};

/// Production [`HostContext`]: a virtual working directory over the real
/// filesystem and an owned variable table.
pub struct OsHost {
    dir: PathBuf,
    vars: Variables,
    errexit: bool,
    exit_status: i32,
    fatal: Option<TestError>,
}

impl OsHost {
    /// Start from the current process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::from_config(HostConfig::from_env()?))
    }

    pub fn from_config(config: HostConfig) -> Self {
        OsHost {
            dir: config.dir,
            vars: config.variables.into_iter().collect(),
            errexit: config.errexit,
            exit_status: 0,
            fatal: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Change the working directory relative paths resolve against
    pub fn set_dir(&mut self, dir: impl Into<PathBuf>) {
        self.dir = dir.into();
    }

    pub fn vars(&self) -> &Variables {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut Variables {
        &mut self.vars
    }

    pub fn set_errexit(&mut self, on: bool) {
        self.errexit = on;
    }

    /// The last fatal error reported, if any
    pub fn fatal(&self) -> Option<&TestError> {
        self.fatal.as_ref()
    }

    pub fn take_fatal(&mut self) -> Option<TestError> {
        self.fatal.take()
    }
}

impl HostContext for OsHost {
    type Probe = File;

    fn resolve_path(&self, path: &str) -> PathBuf {
        join_relative(&self.dir, path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileInfo> {
        fs::metadata(path).map(|meta| FileInfo::from_metadata(&meta))
    }

    fn lstat(&self, path: &Path) -> io::Result<FileInfo> {
        fs::symlink_metadata(path).map(|meta| FileInfo::from_metadata(&meta))
    }

    fn open_probe(&mut self, path: &Path, access: Access) -> io::Result<File> {
        OpenOptions::new()
            .read(access == Access::ReadOnly)
            .write(access == Access::WriteOnly)
            .open(path)
    }

    fn look_path(&mut self, path: &Path) -> Option<PathBuf> {
        resolver::look_path(path)
    }

    fn is_terminal(&self, fd: i64) -> bool {
        match libc::c_int::try_from(fd) {
            Ok(fd) if fd >= 0 => unsafe { libc::isatty(fd) == 1 },
            _ => false,
        }
    }

    fn lookup_var(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    fn stop_on_error(&self) -> bool {
        self.errexit
    }

    fn exit_status(&self) -> i32 {
        self.exit_status
    }

    fn set_exit_status(&mut self, status: i32) {
        self.exit_status = status;
    }

    fn report_fatal(&mut self, err: &TestError) {
        tracing::error!(error = %err, "conditional expression aborted");
        self.exit_status = 1;
        self.fatal = Some(err.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_in(dir: &Path) -> OsHost {
        OsHost::from_config(HostConfig {
            dir: dir.to_path_buf(),
            ..HostConfig::default()
        })
    }

    #[test]
    fn test_relative_paths_resolve_against_dir() {
        let host = host_in(Path::new("/work"));
        assert_eq!(host.resolve_path("a.txt"), PathBuf::from("/work/a.txt"));
        assert_eq!(host.resolve_path("/abs"), PathBuf::from("/abs"));
    }

    #[test]
    fn test_stat_and_lstat() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "data").unwrap();
        let link = dir.path().join("l");
        std::os::unix::fs::symlink(&file, &link).unwrap();

        let host = host_in(dir.path());
        let info = host.stat(&link).unwrap();
        assert!(info.mode.is_regular());
        assert_eq!(info.len, 4);
        assert!(host.lstat(&link).unwrap().mode.is_symlink());
        assert!(host.stat(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_open_probe_modes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "").unwrap();

        let mut host = host_in(dir.path());
        assert!(host.open_probe(&file, Access::ReadOnly).is_ok());
        assert!(host.open_probe(&file, Access::WriteOnly).is_ok());
        assert!(host.open_probe(&dir.path().join("nope"), Access::WriteOnly).is_err());
        // Directories cannot be opened for writing
        assert!(host.open_probe(dir.path(), Access::WriteOnly).is_err());
    }

    #[test]
    fn test_out_of_range_descriptors_are_not_terminals() {
        let host = host_in(Path::new("/"));
        assert!(!host.is_terminal(-1));
        assert!(!host.is_terminal(i64::MAX));
        assert!(!host.is_terminal(9999));
    }

    #[test]
    fn test_fatal_is_recorded() {
        let mut host = host_in(Path::new("/"));
        let err = TestError::UnsupportedUnary(crate::ast::UnaryOperator::GroupOwner);
        host.report_fatal(&err);
        assert_eq!(host.exit_status(), 1);
        assert_eq!(host.take_fatal(), Some(err));
        assert!(host.fatal().is_none());
    }

    #[test]
    fn test_config_seeds_variables_and_options() {
        let mut config = HostConfig::default();
        config.variables.insert("EMPTY".into(), String::new());
        config.errexit = true;
        let host = OsHost::from_config(config);
        assert!(host.lookup_var("EMPTY").is_some());
        assert!(host.stop_on_error());
    }
}
