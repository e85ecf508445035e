//! # runsfx
//!
//! Runtime stub for self-extracting archive executables.
//!
//! At build time an archive payload is appended to the compiled stub,
//! followed by a small trailer recording the payload length:
//!
//! ```text
//! [stub executable][archive payload][8-byte magic][u64 LE payload length]
//! ```
//!
//! At run time the stub locates the payload inside its own image, copies it
//! into a seekable temporary store, changes into the destination directory
//! and extracts the archive there, reporting a per-entry outcome as each
//! entry is processed. The container format itself is handled by the
//! archive library behind [`archive::Archive`]; this crate only supplies it
//! with a readable, seekable stream of known length and a destination.
//!
//! ## Example
//!
//! ```no_run
//! use runsfx::{Console, Error, ExtractOptions, run};
//!
//! fn main() -> Result<(), Error> {
//!     let console = Console::new("archive.run");
//!     let image = std::env::current_exe().map_err(Error::ReadImage)?;
//!     run(&image, "output", &ExtractOptions::default(), &console)
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod dest;
pub mod error;
pub mod extract;
pub mod payload;
pub mod report;
pub mod stage;

pub use cli::Cli;
pub use error::Error;
pub use extract::{Classifier, ErrorPolicy, ExtractOptions, run};
pub use payload::{Payload, Trailer};
pub use report::Console;
pub use stage::{StagedStream, stage};
