use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KinshipReaderError {
    #[error("Kinship table is empty: not even a header line was found")]
    EmptyTable,

    #[error("Failed to read a line from the kinship table")]
    ReadLine(#[source] std::io::Error),

    #[error("Kinship table header is missing the required '{0}' column")]
    MissingColumn(&'static str),

    #[error("Kinship table row {line_no} is missing its '{name}' field")]
    MissingField { line_no: usize, name: &'static str },

    #[error("Kinship table row {line_no} carries an unparseable '{name}' value")]
    ParseFloat { line_no: usize, name: &'static str, #[source] source: ParseFloatError },
}
