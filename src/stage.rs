//! Staging the payload into a seekable temporary store.
//!
//! Not every platform can expose an in-memory byte range as a generic
//! readable, seekable stream, so the payload is copied into an anonymous
//! temporary file before the archive library gets to read it. The file is
//! unlinked the moment it is created and reclaimed by the operating system
//! when the process exits, on every exit path.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::error::Error;

/// Exclusive handle over a temporary copy of the payload.
///
/// The readable byte sequence is bit-identical to the staged payload and the
/// stream is positioned at offset 0 when handed out.
pub struct StagedStream {
    file: File,
    size: u64,
}

impl StagedStream {
    /// Total number of bytes readable from the stream.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Read for StagedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for StagedStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

/// Copy `payload` into a fresh temporary store and rewind it.
///
/// Short writes are retried with an advanced offset until the whole payload
/// is on disk; a zero-byte write means the store cannot make progress and is
/// fatal. The store is flushed and repositioned to offset 0 before the
/// handle is returned, so the next reader starts at the beginning.
pub fn stage(payload: &[u8]) -> Result<StagedStream, Error> {
    let mut file = tempfile::tempfile().map_err(Error::StageCreate)?;

    let mut remaining = payload;
    while !remaining.is_empty() {
        match file.write(remaining) {
            Ok(0) => {
                return Err(Error::StageWrite(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "write returned zero bytes",
                )));
            }
            Ok(n) => remaining = &remaining[n..],
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::StageWrite(e)),
        }
    }

    file.flush().map_err(Error::StageWrite)?;
    file.seek(SeekFrom::Start(0)).map_err(Error::StageWrite)?;

    Ok(StagedStream {
        file,
        size: payload.len() as u64,
    })
}
