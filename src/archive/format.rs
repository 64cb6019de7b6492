use crate::error::{PakError, Result};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::{trace, warn};

/// Bytes read per directory record; a record must fit inside one frame
pub const RECORD_FRAME_SIZE: usize = 64;

/// Storage for an entry name, terminator included
pub const MAX_NAME_LENGTH: usize = 32;

/// Little-endian offset field width
pub const OFFSET_SIZE: usize = 4;

/// One file inside a pak container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PakEntry {
    pub name: String,
    pub offset: u32,
    pub size: u32,
}

impl PakEntry {
    /// Case-insensitive name comparison
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Absolute offset one past the entry's last byte
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }
}

/// A parsed directory record
#[derive(Debug)]
enum Record {
    Entry { entry: PakEntry, consumed: usize },
    Sentinel,
}

/// Read the directory table from the start of a pak container
///
/// Records are packed back to back: a LE u32 offset, a NUL-terminated name,
/// then the next record's offset, which also sizes this one. The first
/// record with an empty name ends the table and is not indexed.
pub fn read_table<R: Read + Seek>(mut reader: R) -> Result<Vec<PakEntry>> {
    let mut entries = Vec::new();
    let mut frame = [0u8; RECORD_FRAME_SIZE];
    let mut position = 0u64;

    loop {
        reader.seek(SeekFrom::Start(position))?;
        let available = read_frame(&mut reader, &mut frame)?;

        match parse_record(&frame[..available], position)? {
            Record::Sentinel => break,
            Record::Entry { entry, consumed } => {
                trace!(
                    name = %entry.name,
                    offset = entry.offset,
                    size = entry.size,
                    "pak record"
                );
                entries.push(entry);
                position += consumed as u64;
            }
        }
    }

    Ok(entries)
}

/// Fill as much of `frame` as the reader has left
fn read_frame<R: Read>(reader: &mut R, frame: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < frame.len() {
        match reader.read(&mut frame[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

fn parse_record(frame: &[u8], position: u64) -> Result<Record> {
    if frame.len() < OFFSET_SIZE {
        return Err(PakError::InvalidFormat(format!(
            "truncated record at byte {}",
            position
        )));
    }
    let offset = read_u32(&frame[..OFFSET_SIZE]);

    let name_area = &frame[OFFSET_SIZE..];
    let name_len = name_area.iter().position(|&b| b == 0).ok_or_else(|| {
        PakError::InvalidFormat(format!("unterminated name in record at byte {}", position))
    })?;

    if name_len == 0 {
        return Ok(Record::Sentinel);
    }

    let next_start = OFFSET_SIZE + name_len + 1;
    let next_bytes = frame.get(next_start..next_start + OFFSET_SIZE).ok_or_else(|| {
        PakError::InvalidFormat(format!(
            "record at byte {} is not followed by another offset",
            position
        ))
    })?;
    let next_offset = read_u32(next_bytes);

    // A next offset below this one wraps; extracting the entry short-reads
    let size = next_offset.wrapping_sub(offset);

    let stored = &name_area[..name_len.min(MAX_NAME_LENGTH - 1)];
    let name = String::from_utf8_lossy(stored).into_owned();
    if next_offset < offset {
        warn!(name = %name, offset, next_offset, "pak record size wraps");
    }

    Ok(Record::Entry {
        entry: PakEntry { name, offset, size },
        consumed: next_start,
    })
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Lay out a pak container in memory
#[cfg(test)]
pub(crate) fn build_pak(files: &[(&str, &[u8])]) -> Vec<u8> {
    let table_len: usize = files
        .iter()
        .map(|(name, _)| OFFSET_SIZE + name.len() + 1)
        .sum::<usize>()
        + OFFSET_SIZE
        + 1;

    let mut table = Vec::with_capacity(table_len);
    let mut data = Vec::new();
    for (name, bytes) in files {
        table.extend_from_slice(&((table_len + data.len()) as u32).to_le_bytes());
        table.extend_from_slice(name.as_bytes());
        table.push(0);
        data.extend_from_slice(bytes);
    }
    table.extend_from_slice(&((table_len + data.len()) as u32).to_le_bytes());
    table.push(0);

    table.extend_from_slice(&data);
    table
}
