use thiserror::Error;

#[derive(Error, Debug)]
pub enum SexPanelReaderError {
    #[error("Failed to read a line from the sex panel")]
    ReadLine(#[source] std::io::Error),

    #[error("Sex panel line {line_no} is missing its '{name}' field")]
    MissingField { line_no: usize, name: &'static str },
}
