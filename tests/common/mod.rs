use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Build and run a full `kinfer-rs infer` invocation against fixture files
/// written within a temporary directory.
pub struct InferRunner {
    tmpdir    : tempfile::TempDir,
    kinship   : String,
    sex_panel : Option<String>,
    extra_args: Vec<String>,
    overwrite : bool,
}

impl InferRunner {
    pub fn new(kinship: &str) -> Self {
        Self {
            tmpdir    : tempfile::tempdir().expect("Failed to create tempdir"),
            kinship   : kinship.to_string(),
            sex_panel : None,
            extra_args: Vec::new(),
            overwrite : false,
        }
    }

    pub fn sex_panel(mut self, sex_panel: &str) -> Self {
        self.sex_panel = Some(sex_panel.to_string());
        self
    }

    pub fn arg(mut self, key: &str, value: &str) -> Self {
        self.extra_args.push(key.to_string());
        self.extra_args.push(value.to_string());
        self
    }

    pub fn overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    pub fn run(&self) -> Result<()> {
        let kinship_path = self.tmpdir.path().join("kinship.tsv");
        std::fs::write(&kinship_path, &self.kinship)?;

        let mut args = vec![
            "kinfer-rs".to_string(), "infer".to_string(),
            "--kinship".to_string(), kinship_path.display().to_string(),
            "--output-dir".to_string(), self.output_dir().display().to_string(),
        ];
        if let Some(sex_panel) = &self.sex_panel {
            let sex_path = self.tmpdir.path().join("sex.tsv");
            std::fs::write(&sex_path, sex_panel)?;
            args.extend(["--sex-panel".to_string(), sex_path.display().to_string()]);
        }
        if self.overwrite {
            args.push("--overwrite".to_string());
        }
        args.extend(self.extra_args.iter().cloned());

        let cli = parser::Cli::try_parse_from(args)?;
        kinfer_rs::run(cli)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.tmpdir.path().join("kinfer-output")
    }

    /// Contents of the output file with the given extension, split in lines.
    pub fn output(&self, extension: &str) -> Vec<String> {
        let path = self.output_dir().join("pedigree").with_extension(extension);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("Failed to read '{}': {err}", path.display()))
            .lines()
            .map(ToString::to_string)
            .collect()
    }
}
