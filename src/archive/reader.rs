use crate::archive::format::{read_table, PakEntry};
use crate::buffer::ResourceData;
use crate::error::{PakError, Result};
use crate::fs::FileSystem;
use crate::stream::ResourceStream;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reader for one pak container
///
/// Only the directory index is kept in memory. The container itself is
/// reopened for every extraction, so no handle stays open between reads.
#[derive(Debug, Clone)]
pub struct PakReader {
    path: PathBuf,
    entries: Vec<PakEntry>,
}

impl PakReader {
    /// Open a container through `fs` and index its directory table
    pub fn open<F: FileSystem, P: AsRef<Path>>(fs: &F, path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs.open(path).map_err(|e| PakError::open(path, e))?;
        Self::from_reader(file, path)
    }

    /// Index the directory table of an already open container
    ///
    /// `path` is remembered for later extractions; the reader is dropped
    /// once the table has been parsed.
    pub fn from_reader<R: Read + Seek, P: Into<PathBuf>>(reader: R, path: P) -> Result<Self> {
        let path = path.into();
        debug!(package = %path.display(), "indexing package");

        let entries = read_table(reader)?;
        Ok(Self { path, entries })
    }

    /// Path the container was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[PakEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Names of all files in table order
    pub fn list_files(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Find an entry by name, ignoring case; the first match wins
    pub fn lookup(&self, name: &str) -> Option<&PakEntry> {
        self.entries.iter().find(|entry| entry.matches(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Read an entry's bytes from the container
    ///
    /// Returns `Ok(None)` when the container has no such entry.
    pub fn extract<F: FileSystem>(&self, fs: &F, name: &str) -> Result<Option<ResourceData>> {
        debug!(package = %self.path.display(), name, "extract");

        let Some(entry) = self.lookup(name) else {
            return Ok(None);
        };

        let mut file = fs.open(&self.path).map_err(|e| PakError::open(&self.path, e))?;
        file.seek(SeekFrom::Start(entry.offset as u64))?;

        // Grown by the read rather than trusting the table's size up front
        let mut data = Vec::new();
        file.take(entry.size as u64).read_to_end(&mut data)?;
        if data.len() != entry.size as usize {
            return Err(PakError::ShortRead {
                name: entry.name.clone(),
                expected: entry.size,
                actual: data.len(),
            });
        }

        Ok(Some(ResourceData::package(data)))
    }

    /// Extract an entry into a stream that owns the bytes
    pub fn create_read_stream<F: FileSystem>(
        &self,
        fs: &F,
        name: &str,
    ) -> Result<Option<ResourceStream>> {
        Ok(self
            .extract(fs, name)?
            .map(|data| ResourceStream::new(name, data)))
    }
}
