use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to create the parent directory of the requested output files")]
    CreateParentDirectory(#[source] std::io::Error),

    #[error("'{path}' already exists. Use '--overwrite' to force its deletion")]
    OverwriteDisallowed { path: PathBuf },
}
