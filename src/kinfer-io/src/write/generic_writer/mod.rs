use std::{fs::File, io::{BufWriter, Write}, path::Path};

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;

mod error;
pub use error::WriterError;

/// THE field separator used for every output table.
pub const WRITER_SEPARATOR: &str = "\t";

/// A buffered line writer targeting either a file or stdout.
///
/// Result structs pretty-print their fields padded and joined with ` - `
/// for console display; `write_iter` collapses that padding back to a single
/// tab per field, so files stay machine-parseable.
pub struct GenericWriter<'a> {
    source: BufWriter<Box<dyn Write + 'a>>,
}

impl<'a> GenericWriter<'a> {
    /// Instantiate a writer. `None` targets stdout.
    ///
    /// # Errors
    /// if `path` cannot be created (invalid location, missing permissions).
    pub fn new(path: Option<impl AsRef<Path>>) -> Result<GenericWriter<'a>> {
        let source: Box<dyn Write> = match path {
            Some(path) => {
                let file = File::create(&path)
                    .map_err(WriterError::CreateFile)
                    .with_context(|| format!("While creating '{}'", path.as_ref().display()))?;
                Box::new(file)
            },
            None => Box::new(std::io::stdout()),
        };
        Ok(GenericWriter { source: BufWriter::new(source) })
    }

    /// Write the contents of a generic iterator, one item per line, with
    /// pretty-print padding collapsed to tabs.
    ///
    /// # Errors
    /// - If any item fails to get written into the underlying source.
    pub fn write_iter<T, I>(&mut self, iter: T) -> Result<()>
    where   T: IntoIterator<Item = I>,
            I: std::fmt::Display,
    {
        lazy_static! {
            static ref PRETTY_PAD: Regex = Regex::new(r"[ ]+-[ ]+").expect("Failed to parse regex");
        }
        for item in iter {
            let formatted = format!("{item}\n");
            let line = PRETTY_PAD.replace_all(&formatted, WRITER_SEPARATOR);
            self.source.write_all(line.as_bytes()).map_err(WriterError::WriteLine)?;
        }
        self.source.flush().map_err(WriterError::Flush)?;
        Ok(())
    }
}
