//! Filesystem access used by packages and the resource manager
//!
//! Everything that touches disk goes through [`FileSystem`], so packages and
//! loose overrides can be served from a native directory tree or from memory.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Path-addressable, read-only file access
pub trait FileSystem {
    type File: Read + Seek;

    /// Check whether a regular file exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Open the file at `path` for reading
    fn open(&self, path: &Path) -> io::Result<Self::File>;
}

/// Read a whole file, sized by seeking to its end
pub(crate) fn read_whole<R: Read + Seek>(file: &mut R) -> io::Result<Vec<u8>> {
    let size = file.seek(SeekFrom::End(0))?;
    file.seek(SeekFrom::Start(0))?;

    let mut data = Vec::with_capacity(size as usize);
    file.take(size).read_to_end(&mut data)?;
    if data.len() as u64 != size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("expected {} bytes, read {}", size, data.len()),
        ));
    }
    Ok(data)
}

/// Native filesystem with an ordered list of search roots
///
/// Relative paths are tried against each root in order; the first regular
/// file found wins. With no roots, paths resolve against the working
/// directory. Within a root an exact match is preferred, otherwise the
/// file name is matched ignoring ASCII case.
#[derive(Debug, Clone, Default)]
pub struct NativeFs {
    search_paths: Vec<PathBuf>,
}

impl NativeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a search root
    pub fn add_search_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.search_paths.push(path.into());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolve `path` to the first existing regular file
    pub fn resolve(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() || self.search_paths.is_empty() {
            return find_file(path.to_path_buf());
        }

        self.search_paths
            .iter()
            .find_map(|root| find_file(root.join(path)))
    }
}

fn find_file(candidate: PathBuf) -> Option<PathBuf> {
    if candidate.is_file() {
        return Some(candidate);
    }

    let name = candidate.file_name()?.to_str()?;
    let dir = match candidate.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|found| found.eq_ignore_ascii_case(name))
        })
        .map(|entry| entry.path())
        .find(|path| path.is_file())
}

impl FileSystem for NativeFs {
    type File = File;

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_some()
    }

    fn open(&self, path: &Path) -> io::Result<File> {
        let resolved = self.resolve(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found in search paths", path.display()),
            )
        })?;
        File::open(resolved)
    }
}

/// In-memory filesystem
///
/// Counts every successful [`FileSystem::open`], which makes the
/// reopen-per-extraction behaviour of packages observable.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, Arc<[u8]>>,
    opens: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), Arc::from(data.into()));
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        self.files.remove(path).is_some()
    }

    /// Number of successful opens so far
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }
}

impl FileSystem for MemoryFs {
    type File = Cursor<Arc<[u8]>>;

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn open(&self, path: &Path) -> io::Result<Self::File> {
        let data = self.files.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(Cursor::new(Arc::clone(data)))
    }
}
