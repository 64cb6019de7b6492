//! Integration tests for pakfile-rs against real files on disk

mod common;

use common::write_pak;
use pakfile_rs::{NativeFs, Origin, PakReader, ResourceConfig, ResourceManager};
use std::io::Read;
use tempfile::TempDir;

#[test]
fn test_extract_roundtrip() {
    let dir = TempDir::new().unwrap();
    let files: Vec<(String, Vec<u8>)> = (0..20)
        .map(|i| (format!("file{:02}.bin", i), vec![i as u8; i * 37]))
        .collect();
    let borrowed: Vec<(&str, &[u8])> = files
        .iter()
        .map(|(name, data)| (name.as_str(), data.as_slice()))
        .collect();
    let path = write_pak(dir.path(), "many.pak", &borrowed);

    let fs = NativeFs::new();
    let pak = PakReader::open(&fs, &path).unwrap();
    assert_eq!(pak.entry_count(), files.len());

    for (name, data) in &files {
        let extracted = pak.extract(&fs, name).unwrap().unwrap();
        assert_eq!(extracted.as_slice(), data.as_slice(), "mismatch for {}", name);
    }
}

#[test]
fn test_manager_serves_package_files() {
    let dir = TempDir::new().unwrap();
    write_pak(
        dir.path(),
        "act1.pak",
        &[("MARKET.CPS", b"market"), ("barn.smk", b"barn video")],
    );

    let config = ResourceConfig::new().with_search_path(dir.path());
    let mut manager = ResourceManager::new(config);
    manager.open_package("act1.pak").unwrap();

    assert_eq!(manager.get_file_data("market.cps").unwrap(), Some(&b"market"[..]));
    assert_eq!(manager.get_file_data("BARN.SMK").unwrap(), Some(&b"barn video"[..]));
    assert!(manager.get_file_data("nothing.wav").unwrap().is_none());
    assert_eq!(manager.cache().len(), 2);
}

#[test]
fn test_loose_file_overrides_package() {
    let dir = TempDir::new().unwrap();
    write_pak(dir.path(), "act1.pak", &[("patched.dat", b"original")]);
    std::fs::write(dir.path().join("patched.dat"), b"patched").unwrap();

    let config = ResourceConfig::new().with_search_path(dir.path());
    let mut manager = ResourceManager::new(config);
    manager.open_package("act1.pak").unwrap();

    assert_eq!(manager.get_file_data("patched.dat").unwrap(), Some(&b"patched"[..]));
    assert_eq!(manager.allocated_count(), 1);
    assert_eq!(manager.cache().slot_count(), 0);

    // Overrides are re-read from disk on every request
    std::fs::write(dir.path().join("patched.dat"), b"patched again").unwrap();
    assert_eq!(
        manager.get_file_data("patched.dat").unwrap(),
        Some(&b"patched again"[..])
    );
    assert_eq!(manager.allocated_count(), 2);

    let stream = manager.open_file_stream("patched.dat").unwrap().unwrap();
    assert_eq!(stream.origin(), Origin::Loose);
    assert_eq!(manager.allocated_count(), 2);
}

#[test]
fn test_override_name_ignores_case() {
    let dir = TempDir::new().unwrap();
    write_pak(dir.path(), "act1.pak", &[("PATCHED.DAT", b"packed")]);
    std::fs::write(dir.path().join("patched.dat"), b"patched").unwrap();

    let config = ResourceConfig::new().with_search_path(dir.path());
    let mut manager = ResourceManager::new(config);
    manager.open_package("ACT1.PAK").unwrap();

    assert_eq!(manager.get_file_data("PATCHED.DAT").unwrap(), Some(&b"patched"[..]));
    assert_eq!(manager.cache().slot_count(), 0);

    let stream = manager.open_file_stream("Patched.Dat").unwrap().unwrap();
    assert_eq!(stream.origin(), Origin::Loose);
    assert_eq!(stream.into_inner().as_slice(), b"patched");
}

#[test]
fn test_override_in_later_search_path() {
    let base = TempDir::new().unwrap();
    let patch = TempDir::new().unwrap();
    write_pak(base.path(), "act1.pak", &[("menu.txt", b"packed menu")]);
    std::fs::write(patch.path().join("menu.txt"), b"patched menu").unwrap();

    let config = ResourceConfig::new()
        .with_search_path(base.path())
        .with_search_path(patch.path());
    let mut manager = ResourceManager::new(config);
    manager.open_package("act1.pak").unwrap();

    assert_eq!(manager.get_file_data("menu.txt").unwrap(), Some(&b"patched menu"[..]));
}

#[test]
fn test_from_config_file() {
    let dir = TempDir::new().unwrap();
    write_pak(dir.path(), "local.pak", &[("a.txt", b"local a")]);
    write_pak(dir.path(), "act1.pak", &[("a.txt", b"act1 a"), ("b.txt", b"act1 b")]);

    let config_path = dir.path().join("resources.toml");
    let toml = format!(
        "max_cache_size = 1024\nsearch_paths = [{:?}]\npackages = [\"local.pak\", \"act1.pak\"]\n",
        dir.path().display().to_string()
    );
    std::fs::write(&config_path, toml).unwrap();

    let config = ResourceConfig::load(&config_path).unwrap();
    let mut manager = ResourceManager::from_config(config).unwrap();

    assert_eq!(manager.package_count(), 2);
    assert_eq!(manager.cache().max_size(), 1024);
    assert_eq!(manager.get_file_data("a.txt").unwrap(), Some(&b"local a"[..]));
    assert_eq!(manager.get_file_data("b.txt").unwrap(), Some(&b"act1 b"[..]));
}

#[test]
fn test_from_config_missing_package() {
    let dir = TempDir::new().unwrap();
    let config = ResourceConfig::new()
        .with_search_path(dir.path())
        .with_package("absent.pak");

    assert!(ResourceManager::from_config(config).is_err());
}

#[test]
fn test_stream_from_package() {
    let dir = TempDir::new().unwrap();
    write_pak(dir.path(), "voices.pak", &[("line001.wav", b"RIFF....WAVE")]);

    let config = ResourceConfig::new().with_search_path(dir.path());
    let mut manager = ResourceManager::new(config);
    manager.open_package("voices.pak").unwrap();

    let mut stream = manager.open_file_stream("LINE001.WAV").unwrap().unwrap();
    let mut magic = [0u8; 4];
    stream.read_exact(&mut magic).unwrap();
    assert_eq!(&magic, b"RIFF");
    assert_eq!(stream.len(), 12);
    assert_eq!(manager.cache().slot_count(), 0);
}

#[test]
fn test_package_replaced_between_extractions() {
    let dir = TempDir::new().unwrap();
    write_pak(dir.path(), "swap.pak", &[("a.txt", b"aaaa"), ("b.txt", b"bbbb")]);

    let fs = NativeFs::with_search_paths([dir.path()]);
    let pak = PakReader::open(&fs, "swap.pak").unwrap();

    // The index stays; the bytes come from whatever is on disk now
    write_pak(dir.path(), "swap.pak", &[("a.txt", b"AAAA"), ("b.txt", b"BBBB")]);
    assert_eq!(pak.extract(&fs, "b.txt").unwrap().unwrap().as_slice(), b"BBBB");
}
