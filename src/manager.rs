//! Resource lookup across loose files and packages
//!
//! A name is resolved in this order:
//!
//! 1. a loose file of that name on the filesystem (never cached),
//! 2. the resource cache,
//! 3. each open package, in the order the packages were opened.
//!
//! The first package hit is cached under the requested name.

use crate::archive::PakReader;
use crate::buffer::ResourceData;
use crate::cache::ResourceCache;
use crate::config::ResourceConfig;
use crate::error::{PakError, Result};
use crate::fs::{read_whole, FileSystem, NativeFs};
use crate::stream::ResourceStream;
use std::path::Path;
use tracing::{debug, warn};

/// Resolves resource names to bytes
pub struct ResourceManager<F: FileSystem = NativeFs> {
    fs: F,
    config: ResourceConfig,
    packages: Vec<PakReader>,
    cache: ResourceCache,
    /// Loose-file buffers handed out by `get_file_data`, freed together
    allocated: Vec<ResourceData>,
}

impl ResourceManager<NativeFs> {
    /// Create a manager over the native filesystem, rooted at the
    /// configured search paths
    pub fn new(config: ResourceConfig) -> Self {
        let fs = NativeFs::with_search_paths(config.search_paths.iter().cloned());
        Self::with_filesystem(fs, config)
    }

    /// Create a manager and open every configured package
    pub fn from_config(config: ResourceConfig) -> Result<Self> {
        let mut manager = Self::new(config);
        manager.open_configured_packages()?;
        Ok(manager)
    }
}

impl<F: FileSystem> ResourceManager<F> {
    pub fn with_filesystem(fs: F, config: ResourceConfig) -> Self {
        let cache = ResourceCache::new(config.max_cache_size);
        Self {
            fs,
            config,
            packages: Vec::new(),
            cache,
            allocated: Vec::new(),
        }
    }

    /// Open the packages listed in the configuration, stopping at the first
    /// one that fails
    pub fn open_configured_packages(&mut self) -> Result<()> {
        let packages = self.config.packages.clone();
        for package in &packages {
            self.open_package(package)?;
        }
        Ok(())
    }

    /// Index a package and append it to the search order
    pub fn open_package<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!(package = %path.display(), "open package");

        let file = self.fs.open(path).map_err(|e| {
            warn!(package = %path.display(), error = %e, "cannot open package");
            PakError::open(path, e)
        })?;
        let reader = PakReader::from_reader(file, path).map_err(|e| {
            warn!(package = %path.display(), error = %e, "cannot index package");
            e
        })?;

        self.packages.push(reader);
        Ok(())
    }

    /// Remove the first open package with this path
    ///
    /// Entries already cached from it stay cached.
    pub fn close_package<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        debug!(package = %path.display(), "close package");

        self.cache.remove_package(path);
        if let Some(index) = self.packages.iter().position(|p| p.path() == path) {
            self.packages.remove(index);
        }
    }

    /// Fetch the whole contents of a resource
    ///
    /// Loose files are re-read on every call and kept until
    /// [`purge_file_data`](Self::purge_file_data) or drop. Package contents
    /// are served from the cache, so the returned bytes borrow the manager.
    pub fn get_file_data(&mut self, name: &str) -> Result<Option<&[u8]>> {
        debug!(name, "get file data");

        let path = Path::new(name);
        if self.fs.exists(path) {
            let data = self.read_loose(path)?;
            self.allocated.push(data);
            return Ok(self.allocated.last().map(ResourceData::as_slice));
        }

        if let Some(index) = self.cache.lookup(name) {
            return Ok(self.cache.slot_data(index));
        }

        for package in &self.packages {
            match package.extract(&self.fs, name) {
                Ok(Some(data)) => {
                    let index = self.cache.insert(package.path(), name, data);
                    return Ok(self.cache.slot_data(index));
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        package = %package.path().display(),
                        name,
                        error = %e,
                        "extraction failed"
                    );
                }
            }
        }

        Ok(None)
    }

    /// Open a resource as a stream that owns its bytes
    ///
    /// Follows the same precedence as [`get_file_data`](Self::get_file_data)
    /// but neither reads from nor fills the cache.
    pub fn open_file_stream(&self, name: &str) -> Result<Option<ResourceStream>> {
        debug!(name, "open file stream");

        let path = Path::new(name);
        if self.fs.exists(path) {
            let data = self.read_loose(path)?;
            return Ok(Some(ResourceStream::new(name, data)));
        }

        for package in &self.packages {
            match package.create_read_stream(&self.fs, name) {
                Ok(Some(stream)) => return Ok(Some(stream)),
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        package = %package.path().display(),
                        name,
                        error = %e,
                        "extraction failed"
                    );
                }
            }
        }

        Ok(None)
    }

    /// Free every loose-file buffer returned by `get_file_data`
    pub fn purge_file_data(&mut self) {
        debug!(count = self.allocated.len(), "purge file data");
        self.allocated.clear();
    }

    fn read_loose(&self, path: &Path) -> Result<ResourceData> {
        let mut file = self.fs.open(path).map_err(|e| PakError::open(path, e))?;
        let data = read_whole(&mut file)?;
        Ok(ResourceData::loose(data))
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    /// Open packages in search order
    pub fn packages(&self) -> &[PakReader] {
        &self.packages
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn package<P: AsRef<Path>>(&self, path: P) -> Option<&PakReader> {
        let path = path.as_ref();
        self.packages.iter().find(|p| p.path() == path)
    }

    /// Number of loose-file buffers waiting for purge
    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    pub fn filesystem(&self) -> &F {
        &self.fs
    }
}

impl<F: FileSystem> Drop for ResourceManager<F> {
    fn drop(&mut self) {
        debug!(
            slots = self.cache.slot_count(),
            packages = self.packages.len(),
            allocated = self.allocated.len(),
            "resource manager teardown"
        );
    }
}
