use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to serialize command line arguments")]
    SerializeArgs(#[source] serde_yaml::Error),

    #[error("Unable to serialize arguments into '{path}'")]
    WriteArgs { path: PathBuf, #[source] source: std::io::Error },

    #[error("Unable to deserialize arguments from the '{path}' file")]
    DeserializeArgs { path: PathBuf, #[source] source: serde_yaml::Error },
}
