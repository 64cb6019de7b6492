//! Pakfile-rs: read-only pak archives with loose-file overrides and a bounded cache
//!
//! This library resolves resource names for a game runtime:
//! - Flat, read-only pak containers with a packed directory table
//! - Loose files on disk that override package contents
//! - A size-bounded cache of package contents with age/size eviction
//! - Streams that own their bytes
//!
//! # Example
//!
//! ```no_run
//! use pakfile_rs::{ResourceConfig, ResourceManager};
//!
//! let config = ResourceConfig::new().with_search_path("game");
//! let mut resources = ResourceManager::new(config);
//! resources.open_package("local.pak")?;
//! resources.open_package("act1.pak")?;
//!
//! if let Some(data) = resources.get_file_data("act1mrkt.cps")? {
//!     println!("{} bytes", data.len());
//! }
//! # Ok::<(), pakfile_rs::error::PakError>(())
//! ```

// Core modules
pub mod archive;
pub mod buffer;
pub mod cache;
pub mod config;
pub mod error;
pub mod fs;
pub mod manager;
pub mod stream;

// Re-export commonly used types
pub use archive::{PakEntry, PakReader, MAX_NAME_LENGTH, RECORD_FRAME_SIZE};
pub use buffer::{Origin, ResourceData};
pub use cache::{CacheSlot, CacheStats, ResourceCache, DEFAULT_MAX_CACHE_SIZE};
pub use config::ResourceConfig;
pub use error::{PakError, Result};
pub use fs::{FileSystem, MemoryFs, NativeFs};
pub use manager::ResourceManager;
pub use stream::ResourceStream;
