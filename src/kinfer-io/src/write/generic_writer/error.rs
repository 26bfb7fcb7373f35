use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to create the output file")]
    CreateFile(#[source] std::io::Error),

    #[error("Failed to write a line into the output file")]
    WriteLine(#[source] std::io::Error),

    #[error("Failed to flush the output buffer")]
    Flush(#[source] std::io::Error),
}
