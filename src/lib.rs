use parser::{Cli, Commands, Thresholds};

#[macro_use]
extern crate log;

use anyhow::{Context, Result};

use kinfer_io::{
    parse::get_output_files,
    read::{KinshipReader, SexPanelReader},
    write::GenericWriter,
};
use kinship::{KinshipThresholds, SexPanel};
use pedigree_infer::Pedigree;

const TRIOS_HEADER    : &str = "child - father - mother - family_id";
const DUOS_HEADER     : &str = "sample_a - sample_b";
const DECISIONS_HEADER: &str = "sample - decision";

/// Map command line threshold arguments onto the core configuration struct.
fn to_kinship_thresholds(args: &Thresholds) -> KinshipThresholds {
    KinshipThresholds {
        first_degree         : (args.first_degree_min, args.first_degree_max),
        second_degree        : (args.second_degree_min, args.second_degree_max),
        ibd1_second_degree   : args.ibd1_second_degree,
        duplicate            : args.duplicate_threshold,
        ibd0_parent_offspring: args.ibd0_parent_offspring,
        ibd1_parent_offspring: args.ibd1_parent_offspring,
        ibd2_parent_offspring: args.ibd2_parent_offspring,
    }
}

/// Unpack the parsed Cli and run the appropriate modules.
pub fn run(cli: Cli) -> Result<()> {
    match cli.commands {
        Commands::Infer { common, thresholds } => {
            let thresholds = to_kinship_thresholds(&thresholds);

            // ----------------------------- Parse input files.
            info!("Parsing kinship table...");
            let stats = KinshipReader::read(&common.kinship)?;

            let sex = match &common.sex_panel {
                Some(path) => SexPanelReader::read(path)?,
                None => {
                    warn!("No sex panel provided. Every sample is considered of unknown sex: \
                           only duos, duplicate clusters and decisions can be emitted");
                    SexPanel::new()
                },
            };

            // ----------------------------- Run pedigree inference.
            let pedigree = Pedigree::infer(&stats, &sex, &thresholds)
                .context("While running pedigree inference")?;

            // ----------------------------- Write results.
            let prefix = common.output_dir.join(&common.file_stem);
            let outputs = get_output_files(&prefix, common.overwrite, &["trios", "duos", "decisions", "dups"])?;

            GenericWriter::new(Some(&outputs["trios"]))?.write_iter(
                std::iter::once(TRIOS_HEADER.to_string())
                    .chain(pedigree.trios.iter().map(ToString::to_string))
            )?;
            GenericWriter::new(Some(&outputs["duos"]))?.write_iter(
                std::iter::once(DUOS_HEADER.to_string())
                    .chain(pedigree.duos.iter().map(ToString::to_string))
            )?;
            GenericWriter::new(Some(&outputs["decisions"]))?.write_iter(
                std::iter::once(DECISIONS_HEADER.to_string())
                    .chain(pedigree.decision_lines())
            )?;
            GenericWriter::new(Some(&outputs["dups"]))?.write_iter(pedigree.duplicate_lines())?;
            info!("Results written within '{}'", common.output_dir.display());
        },

        Commands::FromYaml { yaml } => {
            let cli = Cli::deserialize(&yaml)?;
            self::run(cli)?;
        },
    };
    Ok(())
}
