//! Readable stream over an owned resource buffer

use crate::buffer::{Origin, ResourceData};
use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};

/// Seekable read stream that owns its buffer
///
/// Dropping the stream releases the buffer.
#[derive(Debug)]
pub struct ResourceStream {
    name: String,
    cursor: Cursor<ResourceData>,
}

impl ResourceStream {
    pub fn new(name: impl Into<String>, data: ResourceData) -> Self {
        Self {
            name: name.into(),
            cursor: Cursor::new(data),
        }
    }

    /// Name the stream was opened under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total size of the underlying buffer
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    pub fn origin(&self) -> Origin {
        self.cursor.get_ref().origin()
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Take back the buffer, discarding the read position
    pub fn into_inner(self) -> ResourceData {
        self.cursor.into_inner()
    }
}

impl Read for ResourceStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for ResourceStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl Seek for ResourceStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_read_and_seek() {
        let data = ResourceData::package(b"0123456789".to_vec());
        let mut stream = ResourceStream::new("intro.smk", data);
        assert_eq!(stream.len(), 10);
        assert_eq!(stream.origin(), Origin::Package);

        let mut head = [0u8; 4];
        stream.read_exact(&mut head).unwrap();
        assert_eq!(&head, b"0123");

        stream.seek(SeekFrom::End(-2)).unwrap();
        let mut tail = Vec::new();
        stream.read_to_end(&mut tail).unwrap();
        assert_eq!(tail, b"89");
        assert_eq!(stream.position(), 10);

        let data = stream.into_inner();
        assert_eq!(data.origin(), Origin::Package);
        assert_eq!(data.as_slice(), b"0123456789");
    }

    #[test]
    fn test_stream_lines() {
        let stream = ResourceStream::new("notes.txt", ResourceData::loose(b"a\nb\n".to_vec()));
        let lines: Vec<String> = stream.lines().collect::<io::Result<_>>().unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
