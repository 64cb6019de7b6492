//! Bounded cache of package file contents
//!
//! The cache is a flat list of slots keyed by file name. Every insertion
//! ages the occupied slots by one; a hit resets a slot's age to zero. When
//! the running total exceeds the byte budget, the oldest slot is released,
//! the larger one winning ties and the earlier one winning ties after that.
//! Released slots stay in the list and are refilled before new slots are
//! appended, so the list never shrinks.

use crate::buffer::ResourceData;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default cache budget in bytes
pub const DEFAULT_MAX_CACHE_SIZE: usize = 4 * 1024 * 1024;

/// A reusable cache record
#[derive(Debug)]
pub struct CacheSlot {
    package: PathBuf,
    file_name: String,
    age: u32,
    size: usize,
    data: Option<ResourceData>,
}

impl CacheSlot {
    /// Package the cached bytes came from
    pub fn package(&self) -> &Path {
        &self.package
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `true` once the slot's buffer has been released
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    fn fill(&mut self, package: &Path, file_name: &str, data: ResourceData) {
        self.package = package.to_path_buf();
        self.file_name = file_name.to_string();
        self.age = 0;
        self.size = data.len();
        self.data = Some(data);
    }

    /// Whether this slot should be evicted ahead of `other`
    fn outranks(&self, other: &CacheSlot) -> bool {
        self.age > other.age || (self.age == other.age && self.size > other.size)
    }
}

/// Cache activity counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub evicted_bytes: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Size-bounded resource cache
#[derive(Debug)]
pub struct ResourceCache {
    slots: Vec<CacheSlot>,
    total_size: usize,
    max_size: usize,
    stats: CacheStats,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CACHE_SIZE)
    }
}

impl ResourceCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            slots: Vec::new(),
            total_size: 0,
            max_size,
            stats: CacheStats::default(),
        }
    }

    /// Find an occupied slot by name, ignoring case, and mark it as fresh
    ///
    /// Returns the slot index; the first match in slot order wins.
    pub fn lookup(&mut self, name: &str) -> Option<usize> {
        let found = self
            .slots
            .iter()
            .position(|slot| slot.data.is_some() && slot.file_name.eq_ignore_ascii_case(name));

        match found {
            Some(index) => {
                let slot = &mut self.slots[index];
                debug!(
                    name,
                    size = slot.size,
                    package = %slot.package.display(),
                    "cache hit"
                );
                slot.age = 0;
                self.stats.hits += 1;
            }
            None => self.stats.misses += 1,
        }
        found
    }

    /// Get cached bytes by name, resetting the slot's age on a hit
    pub fn try_get(&mut self, name: &str) -> Option<&[u8]> {
        let index = self.lookup(name)?;
        self.slot_data(index)
    }

    /// Take ownership of `data` and cache it under `name`
    ///
    /// Older slots are released until the total fits the budget again. A
    /// single buffer larger than the whole budget is still accepted. Returns
    /// the index of the slot now holding `data`.
    pub fn insert(&mut self, package: &Path, name: &str, data: ResourceData) -> usize {
        let size = data.len();
        debug!(
            package = %package.display(),
            name,
            size,
            total = self.total_size + size,
            "cache insert"
        );

        for slot in self.slots.iter_mut().filter(|slot| slot.data.is_some()) {
            slot.age = slot.age.saturating_add(1);
        }
        self.total_size += size;
        self.stats.insertions += 1;

        while self.total_size > self.max_size {
            if !self.evict_one() {
                break;
            }
        }

        match self.slots.iter().position(CacheSlot::is_empty) {
            Some(index) => {
                self.slots[index].fill(package, name, data);
                index
            }
            None => {
                self.slots.push(CacheSlot {
                    package: package.to_path_buf(),
                    file_name: name.to_string(),
                    age: 0,
                    size,
                    data: Some(data),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Release the best eviction candidate, if any slot is occupied
    fn evict_one(&mut self) -> bool {
        let mut candidate: Option<usize> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.data.is_none() {
                continue;
            }
            match candidate {
                Some(best) if !slot.outranks(&self.slots[best]) => {}
                _ => candidate = Some(index),
            }
        }

        let Some(index) = candidate else {
            return false;
        };

        let slot = &mut self.slots[index];
        slot.data = None;
        self.total_size -= slot.size;
        self.stats.evictions += 1;
        self.stats.evicted_bytes += slot.size as u64;
        debug!(
            name = %slot.file_name,
            package = %slot.package.display(),
            size = slot.size,
            "cache evict"
        );
        true
    }

    /// Drop cached entries belonging to a package that is being closed
    ///
    /// Does nothing. Cached entries outlive the package they were read from
    /// and keep serving hits for their name after it is closed.
    pub fn remove_package(&mut self, _package: &Path) {}

    /// Bytes of an occupied slot
    pub fn slot_data(&self, index: usize) -> Option<&[u8]> {
        self.slots.get(index).and_then(CacheSlot::data)
    }

    pub fn slots(&self) -> &[CacheSlot] {
        &self.slots
    }

    /// Number of slots ever allocated, occupied or not
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.data.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Release every buffer, keeping the slots for reuse
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.data = None;
        }
        self.total_size = 0;
    }
}
