/// Basic example: resolve resources from packages and loose overrides
///
/// Run with: RUST_LOG=debug cargo run --example basic
use pakfile_rs::{ResourceConfig, ResourceManager};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dir = tempfile::tempdir()?;
    write_pak(
        &dir.path().join("act1.pak"),
        &[("market.cps", b"market pixels"), ("intro.txt", b"It was a dark night.")],
    )?;
    std::fs::write(dir.path().join("intro.txt"), b"Patched intro text.")?;

    let config = ResourceConfig::new()
        .with_search_path(dir.path())
        .with_package("act1.pak")
        .with_max_cache_size(64 * 1024);
    let mut resources = ResourceManager::from_config(config)?;

    println!("Files in act1.pak:");
    for package in resources.packages() {
        for name in package.list_files() {
            println!("  - {}", name);
        }
    }

    if let Some(data) = resources.get_file_data("MARKET.CPS")? {
        println!("market.cps: {} bytes from the package", data.len());
    }
    if let Some(data) = resources.get_file_data("intro.txt")? {
        println!("intro.txt: {:?} (loose override)", String::from_utf8_lossy(data));
    }

    let stats = resources.cache().stats();
    println!(
        "cache: {} slot(s), {} bytes, {} hit(s), {} miss(es)",
        resources.cache().slot_count(),
        resources.cache().total_size(),
        stats.hits,
        stats.misses
    );

    Ok(())
}

/// Write a pak container: packed table, empty-name sentinel, then data
fn write_pak(path: &Path, files: &[(&str, &[u8])]) -> std::io::Result<()> {
    let table_len: usize = files.iter().map(|(name, _)| 4 + name.len() + 1).sum::<usize>() + 5;

    let mut out = Vec::new();
    let mut offset = table_len;
    for (name, data) in files {
        out.extend_from_slice(&(offset as u32).to_le_bytes());
        out.extend_from_slice(name.as_bytes());
        out.push(0);
        offset += data.len();
    }
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.push(0);
    for (_, data) in files {
        out.extend_from_slice(data);
    }

    std::fs::write(path, out)
}
