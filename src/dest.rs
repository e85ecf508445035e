//! Destination directory resolution.

use std::io::ErrorKind;
use std::{env, fs};

use crate::error::Error;

/// Make `path` the working directory for the rest of the run.
///
/// With `create` set, the directory is created first; an already existing
/// directory is fine, any other creation failure aborts before the working
/// directory is touched. Extraction writes relative to the working
/// directory, so nothing may be extracted before both steps have succeeded.
pub fn resolve(path: &str, create: bool) -> Result<(), Error> {
    if create {
        create_destination(path)?;
    }

    env::set_current_dir(path).map_err(|source| Error::EnterDestination {
        path: path.to_string(),
        source,
    })
}

fn create_destination(path: &str) -> Result<(), Error> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(Error::CreateDestination {
            path: path.to_string(),
            source,
        }),
    }
}
