//! In-memory host for tests
//!
//! A deterministic [`HostContext`] with its own little filesystem, variable
//! table and terminal set. Nothing touches the real disk or process state,
//! so evaluator tests can build exactly the world they need:
//!
//! ```
//! use shcond::{evaluate, MemoryHost, TestExpr, UnaryOperator};
//!
//! let mut host = MemoryHost::new();
//! host.add_file("/tmp/x", "data");
//! let expr = TestExpr::unary(UnaryOperator::RegularFile, TestExpr::lit("/tmp/x"));
//! assert_eq!(evaluate(&mut host, &expr).unwrap(), "1");
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use nix::sys::stat::SFlag;

use crate::eval::TestError;
use crate::host::{join_relative, Access, HostContext};
use crate::mode::{FileInfo, FileMode};
use crate::vars::{Variable, Variables};

const MAX_SYMLINK_HOPS: usize = 8;

/// Kinds of node the fake filesystem can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
    Symlink(PathBuf),
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
}

impl NodeKind {
    fn type_bits(&self) -> u32 {
        let flag = match self {
            NodeKind::File => SFlag::S_IFREG,
            NodeKind::Dir => SFlag::S_IFDIR,
            NodeKind::Symlink(_) => SFlag::S_IFLNK,
            NodeKind::CharDevice => SFlag::S_IFCHR,
            NodeKind::BlockDevice => SFlag::S_IFBLK,
            NodeKind::Fifo => SFlag::S_IFIFO,
            NodeKind::Socket => SFlag::S_IFSOCK,
        };
        flag.bits() as u32
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    /// Permission and set-id bits
    perm: u32,
    len: u64,
    modified: SystemTime,
    ino: u64,
}

impl Node {
    fn info(&self) -> FileInfo {
        FileInfo {
            mode: FileMode::from_raw(self.kind.type_bits() | self.perm),
            len: self.len,
            modified: self.modified,
            dev: 1,
            ino: self.ino,
        }
    }
}

/// Open probe handle; dropping it releases the file
#[derive(Debug)]
pub struct MemoryProbe {
    open: Arc<AtomicUsize>,
}

impl Drop for MemoryProbe {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Deterministic [`HostContext`] for tests
#[derive(Debug)]
pub struct MemoryHost {
    dir: PathBuf,
    nodes: BTreeMap<PathBuf, Node>,
    vars: Variables,
    terminals: BTreeSet<i64>,
    errexit: bool,
    exit_status: i32,
    fatal: Vec<TestError>,
    open: Arc<AtomicUsize>,
    probes_opened: usize,
    /// Ticks once per created node, so later nodes are newer
    clock: u64,
    next_ino: u64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// An empty filesystem holding only `/`, with `/` as working directory
    pub fn new() -> Self {
        let mut host = MemoryHost {
            dir: PathBuf::from("/"),
            nodes: BTreeMap::new(),
            vars: Variables::new(),
            terminals: BTreeSet::new(),
            errexit: false,
            exit_status: 0,
            fatal: Vec::new(),
            open: Arc::new(AtomicUsize::new(0)),
            probes_opened: 0,
            clock: 0,
            next_ino: 1,
        };
        host.add_node("/", NodeKind::Dir, 0o755);
        host
    }

    pub fn set_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.dir = dir.into();
        self
    }

    /// Add any kind of node with the given permission bits
    pub fn add_node(&mut self, path: impl AsRef<Path>, kind: NodeKind, perm: u32) -> &mut Self {
        self.clock += 1;
        let node = Node {
            kind,
            perm,
            len: 0,
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(self.clock),
            ino: self.next_ino,
        };
        self.next_ino += 1;
        self.nodes.insert(normalize(path.as_ref()), node);
        self
    }

    /// Add a regular file, mode 0644
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> &mut Self {
        let len = contents.as_ref().len() as u64;
        self.add_node(path.as_ref(), NodeKind::File, 0o644);
        if let Some(node) = self.nodes.get_mut(&normalize(path.as_ref())) {
            node.len = len;
        }
        self
    }

    /// Add a directory, mode 0755
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.add_node(path, NodeKind::Dir, 0o755)
    }

    /// Add a symlink; a relative target resolves from the link's directory
    pub fn add_symlink(&mut self, path: impl AsRef<Path>, target: impl Into<PathBuf>) -> &mut Self {
        self.add_node(path, NodeKind::Symlink(target.into()), 0o777)
    }

    /// Make `link` another name for the node at `existing`
    pub fn add_hard_link(&mut self, existing: impl AsRef<Path>, link: impl AsRef<Path>) -> &mut Self {
        if let Some(node) = self.nodes.get(&normalize(existing.as_ref())).cloned() {
            self.nodes.insert(normalize(link.as_ref()), node);
        }
        self
    }

    /// Replace the permission bits of a node
    pub fn set_perm(&mut self, path: impl AsRef<Path>, perm: u32) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(&normalize(path.as_ref())) {
            node.perm = perm;
        }
        self
    }

    pub fn set_modified(&mut self, path: impl AsRef<Path>, modified: SystemTime) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(&normalize(path.as_ref())) {
            node.modified = modified;
        }
        self
    }

    pub fn remove(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.nodes.remove(&normalize(path.as_ref()));
        self
    }

    pub fn vars(&self) -> &Variables {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut Variables {
        &mut self.vars
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.set_scalar(name, value);
        self
    }

    /// Mark a descriptor as attached to a terminal
    pub fn add_terminal(&mut self, fd: i64) -> &mut Self {
        self.terminals.insert(fd);
        self
    }

    pub fn set_errexit(&mut self, on: bool) -> &mut Self {
        self.errexit = on;
        self
    }

    /// Probe handles currently open
    pub fn open_probes(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    /// Probe handles opened so far
    pub fn probes_opened(&self) -> usize {
        self.probes_opened
    }

    /// Fatal errors reported so far, oldest first
    pub fn fatal_errors(&self) -> &[TestError] {
        &self.fatal
    }

    /// Follow symlinks from `path` to the final node
    fn follow(&self, path: &Path) -> io::Result<(PathBuf, &Node)> {
        let mut current = normalize(path);
        for _ in 0..=MAX_SYMLINK_HOPS {
            let node = self.nodes.get(&current).ok_or_else(not_found)?;
            match &node.kind {
                NodeKind::Symlink(target) => {
                    let base = current.parent().unwrap_or(Path::new("/"));
                    current = normalize(&base.join(target));
                }
                _ => return Ok((current, node)),
            }
        }
        Err(io::Error::new(io::ErrorKind::Other, "too many levels of symbolic links"))
    }
}

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "no such file or directory")
}

fn permission_denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
}

/// Lexically drop `.` and resolve `..`
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl HostContext for MemoryHost {
    type Probe = MemoryProbe;

    fn resolve_path(&self, path: &str) -> PathBuf {
        join_relative(&self.dir, path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileInfo> {
        if path.as_os_str().is_empty() {
            return Err(not_found());
        }
        self.follow(path).map(|(_, node)| node.info())
    }

    fn lstat(&self, path: &Path) -> io::Result<FileInfo> {
        if path.as_os_str().is_empty() {
            return Err(not_found());
        }
        self.nodes
            .get(&normalize(path))
            .map(Node::info)
            .ok_or_else(not_found)
    }

    fn open_probe(&mut self, path: &Path, access: Access) -> io::Result<MemoryProbe> {
        if path.as_os_str().is_empty() {
            return Err(not_found());
        }
        let (_, node) = self.follow(path)?;
        let allowed = match access {
            Access::ReadOnly => node.perm & 0o400 != 0,
            Access::WriteOnly => node.perm & 0o200 != 0 && node.kind != NodeKind::Dir,
        };
        if !allowed {
            return Err(permission_denied());
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        self.probes_opened += 1;
        Ok(MemoryProbe {
            open: Arc::clone(&self.open),
        })
    }

    fn look_path(&mut self, path: &Path) -> Option<PathBuf> {
        let (resolved, node) = self.follow(path).ok()?;
        let runnable = node.kind != NodeKind::Dir && node.info().mode.is_executable_by_anyone();
        runnable.then_some(resolved)
    }

    fn is_terminal(&self, fd: i64) -> bool {
        self.terminals.contains(&fd)
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
        self.exit_status = 1;
        self.fatal.push(err.clone());
    }
}
