//! Extraction driver and per-entry notification handling.

use std::env;
use std::path::Path;

use crate::archive::zip::ZipExtractor;
use crate::archive::{self, Archive, ExtractObserver, Level};
use crate::dest;
use crate::error::Error;
use crate::payload::Payload;
use crate::report::Console;
use crate::stage;

/// What to do when an entry reports an unrecoverable error.
///
/// `Continue` keeps going past failed entries, recovering as much of the
/// archive as possible; `Abort` stops at the first one. The shipped binary
/// uses `Continue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    #[default]
    Continue,
    Abort,
}

/// Options for one extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Create the destination directory if it does not exist.
    pub create_destination: bool,
    /// Print each successfully extracted entry.
    pub verbose: bool,
    /// Per-entry error calibration.
    pub on_error: ErrorPolicy,
}

/// Observer that classifies per-entry notifications.
///
/// Successful entries are printed only in verbose mode. Warnings and errors
/// are always printed, prefixed apart from informational output, with the
/// library's generic description standing in when a notification carries no
/// message. Warnings never stop the run; errors stop it only under
/// [`ErrorPolicy::Abort`].
pub struct Classifier<'a> {
    console: &'a Console,
    verbose: bool,
    on_error: ErrorPolicy,
    warnings: u32,
    errors: u32,
}

impl<'a> Classifier<'a> {
    pub fn new(console: &'a Console, verbose: bool, on_error: ErrorPolicy) -> Self {
        Self {
            console,
            verbose,
            on_error,
            warnings: 0,
            errors: 0,
        }
    }

    /// Warnings seen so far.
    pub fn warnings(&self) -> u32 {
        self.warnings
    }

    /// Errors seen so far.
    pub fn errors(&self) -> u32 {
        self.errors
    }
}

impl ExtractObserver for Classifier<'_> {
    fn on_entry(&mut self, level: Level, fs_name: &Path, message: Option<&str>) -> bool {
        match level {
            Level::None => {
                if self.verbose {
                    println!("  extracting: {}", fs_name.display());
                }
                true
            }
            Level::Warning => {
                self.warnings += 1;
                self.console.error(format_args!(
                    "warning: {}: {}",
                    fs_name.display(),
                    message.unwrap_or_else(|| archive::generic_message(level))
                ));
                true
            }
            Level::Error => {
                self.errors += 1;
                self.console.error(format_args!(
                    "error: {}: {}",
                    fs_name.display(),
                    message.unwrap_or_else(|| archive::generic_message(level))
                ));
                self.on_error == ErrorPolicy::Continue
            }
        }
    }
}

/// Drive one complete self-extraction.
///
/// Resolves the destination, locates the payload in `image`, stages it,
/// opens the archive and extracts it into the working directory established
/// by the resolution step. Exactly one extraction request is made; any
/// failure is terminal for the run.
///
/// # Arguments
///
/// * `image` - Path of the executable image carrying the payload
/// * `destination` - Directory to extract into
/// * `options` - Destination, verbosity and error-policy settings
/// * `console` - Diagnostic context for per-entry and status output
///
/// # Returns
///
/// Returns `Ok(())` when the archive was extracted, or the first fatal
/// condition encountered.
pub fn run(
    image: &Path,
    destination: &str,
    options: &ExtractOptions,
    console: &Console,
) -> Result<(), Error> {
    dest::resolve(destination, options.create_destination)?;

    let payload = Payload::from_image(image)
        .map_err(Error::ReadImage)?
        .ok_or(Error::MissingPayload)?;

    let staged = stage::stage(payload.bytes())?;
    let declared = payload.size();

    // Extraction is relative to the working directory established above;
    // ask the process for it rather than reusing the destination argument.
    let cwd = env::current_dir().map_err(Error::WorkingDir)?;

    let mut archive = ZipExtractor::open(staged, declared).map_err(Error::Open)?;
    let mut classifier = Classifier::new(console, options.verbose, options.on_error);
    archive
        .extract(&cwd, &mut classifier)
        .map_err(Error::Extract)?;

    console.info("Extraction completed successfully.");
    if classifier.warnings() > 0 || classifier.errors() > 0 {
        console.error(format_args!(
            "{} warning(s), {} error(s) reported during extraction",
            classifier.warnings(),
            classifier.errors()
        ));
    }

    Ok(())
}
