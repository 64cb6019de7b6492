//! Shared helpers for building pak containers on disk

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Lay out a pak container: packed directory table, sentinel, then data
pub fn pak_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let table_len: usize = files.iter().map(|(name, _)| 4 + name.len() + 1).sum::<usize>() + 5;

    let mut out = Vec::new();
    let mut offset = table_len;
    for (name, data) in files {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.push(0);
        offset += data.len();
    }
    // Sentinel: end-of-data offset and an empty name
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.push(0);

    for (_, data) in files {
        out.extend_from_slice(data);
    }
    out
}

/// Write a pak container into `dir` and return its path
pub fn write_pak(dir: &Path, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pak_bytes(files)).unwrap();
    path
}
