//! ZIP-backed implementation of the archive contract.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use ::zip::ZipArchive;
use ::zip::result::ZipError;

use super::{Archive, ArchiveError, ExtractObserver, Level};

/// Archive handle over a readable, seekable stream.
#[derive(Debug)]
pub struct ZipExtractor<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> ZipExtractor<R> {
    /// Open an archive from a stream declared to hold exactly
    /// `declared_len` bytes.
    ///
    /// The declared length must match the number of bytes readable from the
    /// stream; a mismatch is a format failure. Stream I/O failures and
    /// malformed containers are reported apart, each with its own cause.
    pub fn open(mut reader: R, declared_len: u64) -> Result<Self, ArchiveError> {
        let available = reader.seek(SeekFrom::End(0)).map_err(ArchiveError::Io)?;
        if available != declared_len {
            return Err(ArchiveError::Format(format!(
                "declared archive size is {declared_len} bytes but the stream holds {available}"
            )));
        }
        reader.seek(SeekFrom::Start(0)).map_err(ArchiveError::Io)?;

        let archive = ZipArchive::new(reader).map_err(map_zip_error)?;
        Ok(Self { archive })
    }

    /// Number of entries in the archive.
    pub fn entries(&self) -> usize {
        self.archive.len()
    }

    fn extract_entry(&mut self, index: usize, dest: &Path) -> Result<EntryOutcome, EntryError> {
        let mut file = self.archive.by_index(index).map_err(|e| EntryError {
            name: format!("entry #{index}"),
            message: map_zip_error(e).to_string(),
        })?;

        let raw_name = file.name().to_string();

        // Entry-name validation is the library's: anything that would land
        // outside the destination is skipped.
        let Some(relative) = file.enclosed_name() else {
            return Ok(EntryOutcome::Skipped {
                name: raw_name,
                reason: "entry name escapes the destination, skipped".to_string(),
            });
        };
        let out_path = dest.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| EntryError {
                name: raw_name,
                message: e.to_string(),
            })?;
            return Ok(EntryOutcome::Written {
                path: out_path,
                warning: None,
            });
        }

        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| EntryError {
                    name: raw_name.clone(),
                    message: e.to_string(),
                })?;
            }
        }

        #[cfg(unix)]
        if file
            .unix_mode()
            .is_some_and(|mode| mode & 0o170000 == 0o120000)
        {
            use std::ffi::OsString;
            use std::os::unix::ffi::OsStringExt;

            let mut target = Vec::new();
            file.read_to_end(&mut target).map_err(|e| EntryError {
                name: raw_name.clone(),
                message: e.to_string(),
            })?;
            let target = OsString::from_vec(target);

            if fs::symlink_metadata(&out_path).is_ok() {
                fs::remove_file(&out_path).map_err(|e| EntryError {
                    name: raw_name.clone(),
                    message: e.to_string(),
                })?;
            }
            std::os::unix::fs::symlink(&target, &out_path).map_err(|e| EntryError {
                name: raw_name,
                message: e.to_string(),
            })?;

            return Ok(EntryOutcome::Written {
                path: out_path,
                warning: None,
            });
        }

        let mut output = File::create(&out_path).map_err(|e| EntryError {
            name: raw_name.clone(),
            message: e.to_string(),
        })?;
        io::copy(&mut file, &mut output).map_err(|e| EntryError {
            name: raw_name.clone(),
            message: e.to_string(),
        })?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;

            if let Err(e) = fs::set_permissions(&out_path, fs::Permissions::from_mode(mode)) {
                return Ok(EntryOutcome::Written {
                    path: out_path,
                    warning: Some(format!("failed to restore permissions: {e}")),
                });
            }
        }

        Ok(EntryOutcome::Written {
            path: out_path,
            warning: None,
        })
    }
}

impl<R: Read + Seek> Archive for ZipExtractor<R> {
    fn extract(
        &mut self,
        dest: &Path,
        observer: &mut dyn ExtractObserver,
    ) -> Result<(), ArchiveError> {
        for index in 0..self.archive.len() {
            let keep_going = match self.extract_entry(index, dest) {
                Ok(EntryOutcome::Written {
                    path,
                    warning: None,
                }) => observer.on_entry(Level::None, &path, None),
                Ok(EntryOutcome::Written {
                    path,
                    warning: Some(warning),
                }) => observer.on_entry(Level::Warning, &path, Some(&warning)),
                Ok(EntryOutcome::Skipped { name, reason }) => {
                    observer.on_entry(Level::Warning, Path::new(&name), Some(&reason))
                }
                Err(EntryError { name, message }) => {
                    observer.on_entry(Level::Error, Path::new(&name), Some(&message))
                }
            };

            if !keep_going {
                return Err(ArchiveError::Aborted);
            }
        }

        Ok(())
    }
}

enum EntryOutcome {
    Written {
        path: PathBuf,
        warning: Option<String>,
    },
    Skipped {
        name: String,
        reason: String,
    },
}

struct EntryError {
    name: String,
    message: String,
}

fn map_zip_error(err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(e) => ArchiveError::Io(e),
        other => ArchiveError::Format(other.to_string()),
    }
}
