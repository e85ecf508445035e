//! Archive library seam.
//!
//! The stub never parses the container format itself. It hands the archive
//! library a readable, seekable stream of known length plus a destination
//! directory, and receives back one notification per entry and a final
//! result. This module defines that contract; [`zip`](self::zip) provides
//! the ZIP-backed implementation.

pub mod zip;

use std::io;
use std::path::Path;

use thiserror::Error;

/// Severity attached to a per-entry notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// One entry was written successfully.
    None,
    /// A non-fatal anomaly on one entry.
    Warning,
    /// One entry could not be processed.
    Error,
}

/// Fallback description for notifications that carry no message.
pub fn generic_message(level: Level) -> &'static str {
    match level {
        Level::None => "entry extracted",
        Level::Warning => "unspecified problem while extracting entry",
        Level::Error => "entry could not be extracted",
    }
}

/// Per-entry notification sink.
///
/// Invoked synchronously, once per entry (or per warning or error
/// condition), in archive order. The return value decides whether the
/// extraction continues; `false` aborts it.
pub trait ExtractObserver {
    fn on_entry(&mut self, level: Level, fs_name: &Path, message: Option<&str>) -> bool;
}

/// Failures reported by the archive library.
///
/// System failures and container-format failures carry different causes and
/// are kept apart so the final diagnostic names the right one. The
/// `Display` text is the library's human-readable description.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{0}")]
    Io(io::Error),
    #[error("{0}")]
    Format(String),
    /// The observer asked to stop.
    #[error("extraction aborted")]
    Aborted,
}

/// An opened archive ready for extraction.
///
/// Values of implementing types are only obtainable from a successful open;
/// dropping one releases the handle.
pub trait Archive {
    /// Extract every entry into `dest`, reporting each through `observer`.
    fn extract(
        &mut self,
        dest: &Path,
        observer: &mut dyn ExtractObserver,
    ) -> Result<(), ArchiveError>;
}
