use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use anyhow::{Context, Result};
use log::{info, warn};

use kinship::{Sex, SexPanel};

mod error;
pub use error::SexPanelReaderError;

/// Reader for two-column, tab-separated sex panels: `sample_id<TAB>sex`.
///
/// Lines starting with '#' are treated as comments. Sex values are parsed
/// leniently ("male"/"m"/"1", "female"/"f"/"2", anything else degrades to
/// unknown) and samples absent from the panel altogether resolve to unknown
/// downstream, so a sparse panel is legal input.
pub struct SexPanelReader;

impl SexPanelReader {
    /// Read the sex panel at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<SexPanel> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open sex panel '{}'", path.display()))?;
        let panel = Self::read_from(BufReader::new(file))
            .with_context(|| format!("While parsing sex panel '{}'", path.display()))?;
        info!("Parsed sex annotations for {} sample(s) from '{}'", panel.len(), path.display());
        Ok(panel)
    }

    /// Read panel entries from any buffered source.
    pub fn read_from(reader: impl BufRead) -> Result<SexPanel> {
        let mut panel = SexPanel::new();
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(SexPanelReaderError::ReadLine)?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue
            }
            let mut fields = line.split('\t').map(str::trim);
            let sample = fields.next()
                .filter(|sample| !sample.is_empty())
                .ok_or(SexPanelReaderError::MissingField { line_no, name: "sample_id" })?;
            let sex = fields.next()
                .ok_or(SexPanelReaderError::MissingField { line_no, name: "sex" })?;
            let sex = sex.parse::<Sex>().unwrap_or(Sex::Unknown);

            if panel.insert(sample, sex).is_some() {
                warn!("Sample '{sample}' annotated more than once within the sex panel. Keeping the last entry");
            }
        }
        Ok(panel)
    }
}
