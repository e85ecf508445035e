//! Locating the archive payload inside the executable image.
//!
//! A self-extracting executable is the compiled stub with the archive bytes
//! appended, followed by a fixed-size trailer recording how many payload
//! bytes precede it:
//!
//! ```text
//! [stub executable][archive payload][8-byte magic][u64 LE payload length]
//! ```
//!
//! The stub memory-maps its own image and hands out the payload as a
//! borrowed byte range of that mapping. The recorded length is trusted as
//! written by the build tooling; anything that does not pass the bounds
//! check is treated as "no payload".

use std::env;
use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use memmap2::Mmap;

/// Payload trailer at the end of the executable image - 16 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trailer {
    pub payload_len: u64,
}

impl Trailer {
    pub const MAGIC: &'static [u8; 8] = b"\x89RSFX\r\n\x1a";
    pub const SIZE: usize = 16;

    /// Parse a trailer from the last [`Trailer::SIZE`] bytes of an image.
    ///
    /// Returns `None` if the bytes are too short or do not start with the
    /// magic; an absent trailer means the image carries no payload.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE || &data[0..8] != Self::MAGIC {
            return None;
        }

        let mut cursor = Cursor::new(&data[8..]);
        let payload_len = cursor.read_u64::<LittleEndian>().ok()?;

        Some(Self { payload_len })
    }

    /// Encode the trailer as it is appended to an image.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[..8].copy_from_slice(Self::MAGIC);
        LittleEndian::write_u64(&mut buf[8..], self.payload_len);
        buf
    }
}

/// The embedded archive payload, borrowed from the mapped executable image.
///
/// Owns the mapping for as long as the payload is in use; the bytes are
/// never copied to the heap. The payload contents are not validated here.
pub struct Payload {
    map: Mmap,
    offset: usize,
    len: usize,
}

impl Payload {
    /// Locate the payload embedded in the executable image at `path`.
    ///
    /// Returns `Ok(None)` when the image carries no payload: it is shorter
    /// than the trailer, the trailer magic is missing, the recorded length
    /// is zero, or the recorded length exceeds the bytes preceding the
    /// trailer. I/O failures opening or mapping the image are returned as
    /// errors.
    pub fn from_image(path: &Path) -> io::Result<Option<Self>> {
        let file = File::open(path)?;

        let image_len = file.metadata()?.len();
        if image_len < Trailer::SIZE as u64 {
            return Ok(None);
        }

        // SAFETY: the mapping is read-only and lives inside `Payload`,
        // outliving every borrow handed out by `bytes`. The image is the
        // running executable (or a test fixture) and is not truncated while
        // mapped.
        let map = unsafe { Mmap::map(&file)? };

        let trailer_offset = map.len() - Trailer::SIZE;
        let Some(trailer) = Trailer::from_bytes(&map[trailer_offset..]) else {
            return Ok(None);
        };

        if trailer.payload_len == 0 || trailer.payload_len > trailer_offset as u64 {
            return Ok(None);
        }

        let len = trailer.payload_len as usize;
        Ok(Some(Self {
            map,
            offset: trailer_offset - len,
            len,
        }))
    }

    /// Locate the payload in the currently running executable.
    pub fn from_current_exe() -> io::Result<Option<Self>> {
        Self::from_image(&env::current_exe()?)
    }

    /// The payload bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.map[self.offset..self.offset + self.len]
    }

    /// Payload length in bytes. Always nonzero.
    pub fn size(&self) -> u64 {
        self.len as u64
    }
}
