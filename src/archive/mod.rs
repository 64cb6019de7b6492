mod format;
mod reader;

pub use format::{read_table, PakEntry, MAX_NAME_LENGTH, OFFSET_SIZE, RECORD_FRAME_SIZE};
pub use reader::PakReader;

#[cfg(test)]
pub(crate) use format::build_pak;
