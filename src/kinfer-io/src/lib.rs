pub mod parse;
pub mod read;
pub mod write;
