#![no_main]

use libfuzzer_sys::fuzz_target;
use pakfile_rs::{MemoryFs, PakReader, ResourceConfig, ResourceManager};

fuzz_target!(|data: &[u8]| {
    let mut fs = MemoryFs::new();
    fs.insert("fuzz.pak", data.to_vec());

    // Try to index the table - should never panic
    let reader = match PakReader::open(&fs, "fuzz.pak") {
        Ok(r) => r,
        Err(_) => return, // Expected for invalid data
    };

    // Every indexed entry either extracts or reports an error
    let names: Vec<String> = reader.list_files().map(str::to_string).collect();
    for name in &names {
        let _ = reader.extract(&fs, name);
    }

    let _ = reader.lookup("");
    let _ = reader.contains("missing.bin");

    // Same bytes through the manager, with a budget small enough to evict
    let config = ResourceConfig::new().with_max_cache_size(256);
    let mut manager = ResourceManager::with_filesystem(fs, config);
    if manager.open_package("fuzz.pak").is_err() {
        return;
    }
    for name in &names {
        let _ = manager.get_file_data(name);
        let _ = manager.open_file_stream(name);
    }
});
