//! Owned resource buffers
//!
//! Resource bytes come from two places: loose override files read whole
//! from the filesystem, and byte ranges extracted from a package. Each kind
//! is released by its own `Drop`, so whoever holds a [`ResourceData`]
//! never has to remember where it came from.

use std::ops::Deref;

/// Where a resource buffer was loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A loose file on the filesystem that overrides package contents
    Loose,
    /// A byte range extracted from a pak container
    Package,
}

/// An owned resource buffer tagged with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceData {
    /// Whole-file contents of a loose override, sized once at read time
    Loose(Box<[u8]>),
    /// Contents extracted from a package entry
    Package(Vec<u8>),
}

impl ResourceData {
    pub fn loose(data: Vec<u8>) -> Self {
        ResourceData::Loose(data.into_boxed_slice())
    }

    pub fn package(data: Vec<u8>) -> Self {
        ResourceData::Package(data)
    }

    pub fn origin(&self) -> Origin {
        match self {
            ResourceData::Loose(_) => Origin::Loose,
            ResourceData::Package(_) => Origin::Package,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            ResourceData::Loose(data) => data,
            ResourceData::Package(data) => data,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Consume the buffer, returning its bytes
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            ResourceData::Loose(data) => data.into_vec(),
            ResourceData::Package(data) => data,
        }
    }
}

impl Deref for ResourceData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for ResourceData {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
