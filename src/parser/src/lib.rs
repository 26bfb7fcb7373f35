use std::{ffi::OsStr, fs::File, path::PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::debug;
use serde::{Deserialize, Serialize};

mod error;
pub use error::ParserError;

/// kinfer-rs: infer trios, duos and duplicate-sample clusters from pairwise
/// IBD/kinship estimates and per-sample sex annotations.
#[derive(Parser, Debug, Serialize, Deserialize)]
#[clap(name="kinfer-rs", author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// Set the verbosity level (-v -vv -vvv)
    ///
    /// Set the verbosity level of this program. Multiple levels allowed {n}
    ///
    /// -v: Info  |  -vv: Debug  | -vvv: Trace {n}
    ///
    /// Note that the program will still output warnings by default, even when this flag is off.
    /// Use the --quiet/-q flag to disable them.
    #[clap(short='v', long, parse(from_occurrences), global=true)]
    pub verbose: u8,

    /// Disable warnings.
    ///
    /// By default, warnings are emitted and redirected to the console, even when verbose mode
    /// is off. Use this argument to disable this. Only errors will be displayed.
    #[clap(short='q', long, global=true)]
    pub quiet: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

impl Cli {
    /// Serialize command line arguments within a `.yaml` file.
    ///
    /// # Behavior
    /// - File naming follows the convention '{current time}-infer.yaml', with the current time
    ///   formatted as `YYYY`-`MM`-`DD`T`hhmmss`.
    /// - The file is written at the root of the user-provided `--output-dir` folder.
    /// - `from-yaml` invocations are not re-serialized.
    ///
    /// # Errors
    /// Returns an unrecoverable error if `serde_yaml` fails to parse `Self` to a string, or if
    /// the output file cannot be written.
    pub fn serialize(&self) -> Result<()> {
        let serialized = serde_yaml::to_string(&self).map_err(ParserError::SerializeArgs)?;
        debug!("\n---- Command line args ----\n{serialized}\n---");

        let Commands::Infer { common, .. } = &self.commands else {
            return Ok(())
        };
        let current_time = chrono::offset::Local::now().format("%Y-%m-%dT%H%M%S");
        let output_file = common.output_dir.join(format!("{current_time}-infer.yaml"));
        std::fs::write(&output_file, serialized)
            .map_err(|source| ParserError::WriteArgs { path: output_file, source })?;
        Ok(())
    }

    /// Deserialize a `.yaml` file into command line arguments.
    ///
    /// # Errors
    /// - Returns `FileNotFound` or `PermissionDenied` if the provided `.yaml` is invalid, or
    ///   does not carry read permissions.
    /// - Returns an unrecoverable error if `serde_yaml` fails to parse the provided file.
    pub fn deserialize(yaml: &PathBuf) -> Result<Self> {
        let cli = serde_yaml::from_reader(File::open(yaml)?)
            .map_err(|source| ParserError::DeserializeArgs { path: yaml.clone(), source })?;
        Ok(cli)
    }
}

#[derive(Subcommand, Debug, Serialize, Deserialize)]
pub enum Commands {
    /// Run pedigree inference on a kinship table.
    Infer {
        #[clap(flatten)]
        common: Common,
        #[clap(flatten)]
        thresholds: Thresholds,
    },

    /// Run kinfer-rs using a previously generated .yaml configuration file.
    ///
    /// This allows users to easily re-apply a kinfer-rs command using the exact same
    /// parameters and arguments.
    FromYaml {
        yaml: PathBuf,
    },
}

#[derive(Args, Debug, Default, Serialize, Deserialize)]
pub struct Common {
    /// Input kinship table.
    ///
    /// Tab-separated, headered. Must at least provide the columns 'i', 'j', 'ibd0', 'ibd1',
    /// 'ibd2' and 'pi_hat', in any order; one row per unordered sample pair. Additional
    /// columns are ignored.
    #[clap(short, long, required(true))]
    pub kinship: PathBuf,

    /// Input sex panel.
    ///
    /// Tab-separated, two columns: 'sample_id' and 'sex'. Accepted sex encodings:{n}
    ///   male   : 'male', 'M', '1'{n}
    ///   female : 'female', 'F', '2'{n}
    /// Anything else is treated as unknown. Samples absent from the panel are treated as
    /// unknown as well, and can thus never be assigned as a parent. When this argument is
    /// omitted entirely, every sample is considered of unknown sex and only duos, duplicate
    /// clusters and decisions can be produced.
    #[clap(short, long, required(false))]
    pub sex_panel: Option<PathBuf>,

    /// Output directory where results will be written.
    ///
    /// Note that kinfer-rs will create the specified leaf directory if it is not present, but
    /// does not allow itself from creating parent directories.
    #[clap(short, long, default_value("kinfer-output"), parse(try_from_os_str=valid_output_dir))]
    pub output_dir: PathBuf,

    /// Filename stem of the output files.
    ///
    /// Four files are emitted within --output-dir:{n}
    ///   '{stem}.trios'     : child / father / mother / family-id{n}
    ///   '{stem}.duos'      : sorted child / single-parent pairs{n}
    ///   '{stem}.decisions' : per-sample resolution outcome{n}
    ///   '{stem}.dups'      : one duplicate cluster per line{n}
    #[clap(short='F', long, default_value("pedigree"))]
    pub file_stem: String,

    /// Overwrite existing output files.
    ///
    /// By default, kinfer-rs does not allow itself from overwriting existing results files.
    /// Use this flag to force this behaviour.
    #[clap(short='w', long)]
    pub overwrite: bool,
}

/// Threshold configuration of the inference pipeline.
///
/// All bounds are expressed on the [0, 1] probability scale.
#[derive(Args, Debug, Serialize, Deserialize)]
pub struct Thresholds {
    /// Lower bound of the first-degree pi_hat band (inclusive).
    #[clap(long, default_value_t = 0.40)]
    pub first_degree_min: f64,

    /// Upper bound of the first-degree pi_hat band (inclusive).
    #[clap(long, default_value_t = 0.75)]
    pub first_degree_max: f64,

    /// Lower bound of the second-degree pi_hat band (inclusive).
    #[clap(long, default_value_t = 0.195)]
    pub second_degree_min: f64,

    /// Upper bound of the second-degree pi_hat band (exclusive).
    #[clap(long, default_value_t = 0.30)]
    pub second_degree_max: f64,

    /// ibd1 floor a pair must reach to qualify as second-degree relatives.
    #[clap(long, default_value_t = 0.40)]
    pub ibd1_second_degree: f64,

    /// pi_hat threshold above which two samples are considered duplicates (strict).
    #[clap(short='d', long, default_value_t = 0.90)]
    pub duplicate_threshold: f64,

    /// ibd0 ceiling of the parent-offspring signature.
    #[clap(long, default_value_t = 0.15)]
    pub ibd0_parent_offspring: f64,

    /// ibd1 floor of the parent-offspring signature.
    #[clap(long, default_value_t = 0.70)]
    pub ibd1_parent_offspring: f64,

    /// ibd2 ceiling of the parent-offspring signature.
    #[clap(long, default_value_t = 0.30)]
    pub ibd2_parent_offspring: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            first_degree_min     : 0.40,
            first_degree_max     : 0.75,
            second_degree_min    : 0.195,
            second_degree_max    : 0.30,
            ibd1_second_degree   : 0.40,
            duplicate_threshold  : 0.90,
            ibd0_parent_offspring: 0.15,
            ibd1_parent_offspring: 0.70,
            ibd2_parent_offspring: 0.30,
        }
    }
}

/// Create the requested leaf output directory if it does not exist yet.
/// Parent directories are never created on the user's behalf.
fn valid_output_dir(os_str: &OsStr) -> Result<PathBuf, String> {
    let path = PathBuf::from(os_str);
    if !path.exists() {
        std::fs::create_dir(&path)
            .map_err(|err| format!("Unable to create output directory '{}': {err}", path.display()))?;
    }
    Ok(path)
}
