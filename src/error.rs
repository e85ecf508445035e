use std::io;

use thiserror::Error;

use crate::archive::ArchiveError;

/// Fatal conditions for a self-extraction run.
///
/// Every failure the pipeline can hit is classified here and propagated up
/// to the binary's single top-level handler, which prints the message with
/// the program-name prefix and selects the exit code. The `Display` text of
/// each variant carries the underlying cause, so no variant needs further
/// unwrapping before being reported.
#[derive(Debug, Error)]
pub enum Error {
    /// The executable image carries no payload, or a zero-length one.
    #[error("no archive data found; this archive may be corrupted")]
    MissingPayload,

    /// The executable image itself could not be opened or mapped.
    #[error("failed to read executable image: {0}")]
    ReadImage(io::Error),

    #[error("failed to create temporary file: {0}")]
    StageCreate(io::Error),

    #[error("failed to write to temporary file: {0}")]
    StageWrite(io::Error),

    #[error("failed to create directory '{path}': {source}")]
    CreateDestination { path: String, source: io::Error },

    #[error("failed to change directory to '{path}': {source}")]
    EnterDestination { path: String, source: io::Error },

    #[error("failed to get current working directory: {0}")]
    WorkingDir(io::Error),

    /// The archive library rejected the staged stream.
    #[error("failed to open archive: {0}")]
    Open(ArchiveError),

    /// Extraction started but did not run to completion.
    #[error("failed to extract archive: {0}")]
    Extract(ArchiveError),
}
