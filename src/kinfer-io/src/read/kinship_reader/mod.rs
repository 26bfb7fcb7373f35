use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use anyhow::{Context, Result};
use log::info;

use kinship::{PairStat, SamplePair};

mod error;
pub use error::KinshipReaderError;

/// Required columns of a kinship table, in no particular order.
const REQUIRED_COLUMNS: [&str; 6] = ["i", "j", "ibd0", "ibd1", "ibd2", "pi_hat"];

/// Reader for headered, tab-separated kinship tables.
///
/// The header must at least provide the `i`, `j`, `ibd0`, `ibd1`, `ibd2` and
/// `pi_hat` columns; column order is free and additional columns (an exported
/// table typically carries more fields) are ignored. One row per unordered
/// sample pair.
///
/// Any structurally invalid row (missing field, unparseable or out-of-range
/// value, self-pair) is fatal and aborts the read.
pub struct KinshipReader;

impl KinshipReader {
    /// Read and validate every row of the kinship table at `path`.
    pub fn read(path: impl AsRef<Path>) -> Result<Vec<PairStat>> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open kinship table '{}'", path.display()))?;
        let stats = Self::read_from(BufReader::new(file))
            .with_context(|| format!("While parsing kinship table '{}'", path.display()))?;
        info!("Parsed {} pairwise statistics row(s) from '{}'", stats.len(), path.display());
        Ok(stats)
    }

    /// Read rows from any buffered source. Empty lines are skipped.
    pub fn read_from(reader: impl BufRead) -> Result<Vec<PairStat>> {
        let mut lines = reader.lines().enumerate();

        // ---- Map required column names to their field indices.
        let (_, header) = lines.next().ok_or(KinshipReaderError::EmptyTable)?;
        let header = header.map_err(KinshipReaderError::ReadLine)?;
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
        let mut indices = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = columns.iter().position(|col| *col == name)
                .ok_or(KinshipReaderError::MissingColumn(name))?;
        }
        let [i_col, j_col, ibd0_col, ibd1_col, ibd2_col, pi_hat_col] = indices;

        // ---- Parse and validate every remaining row.
        let mut stats = Vec::new();
        for (index, line) in lines {
            let line_no = index + 1; // 1-based, header included.
            let line = line.map_err(KinshipReaderError::ReadLine)?;
            if line.trim().is_empty() {
                continue
            }
            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            let field = |col: usize, name: &'static str| {
                fields.get(col).copied().ok_or(KinshipReaderError::MissingField { line_no, name })
            };
            let float = |col: usize, name: &'static str| -> Result<f64, KinshipReaderError> {
                field(col, name)?.parse().map_err(|source| KinshipReaderError::ParseFloat { line_no, name, source })
            };

            let pair = SamplePair::new(field(i_col, "i")?, field(j_col, "j")?)
                .with_context(|| format!("While parsing kinship table row {line_no}"))?;
            let stat = PairStat::new(
                pair,
                float(ibd0_col, "ibd0")?,
                float(ibd1_col, "ibd1")?,
                float(ibd2_col, "ibd2")?,
                float(pi_hat_col, "pi_hat")?,
            ).with_context(|| format!("While parsing kinship table row {line_no}"))?;
            stats.push(stat);
        }
        Ok(stats)
    }
}
