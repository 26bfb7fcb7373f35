use std::{collections::HashMap, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use log::trace;

mod error;
pub use error::ParseError;

/// Attempt to create the parent directories of a path (if needed).
pub fn create_parent_directory(path: &Path) -> Result<()> {
    let parent_dir = path.parent().unwrap_or(path);
    fs::create_dir_all(parent_dir)
        .map_err(ParseError::CreateParentDirectory)
        .with_context(|| format!("While attempting to create output directory '{}'", path.display()))?;
    Ok(())
}

/// Check whether a file may be written at `path`; refuse to clobber an
/// existing file unless the user explicitly allowed overwriting.
///
/// # Errors
/// - `ParseError::OverwriteDisallowed` if `path` exists and `overwrite` is
///   false.
pub fn can_write_file(overwrite: bool, path: &Path) -> Result<bool> {
    if !overwrite && path.exists() {
        return Err(ParseError::OverwriteDisallowed { path: path.to_path_buf() })
            .context("While ensuring that output files may be written")
    }
    Ok(true)
}

/// Derive one output path per requested extension from a common file prefix,
/// creating the parent directory beforehand and enforcing overwrite
/// protection on each file. Returns a `HashMap` keyed by extension.
pub fn get_output_files(
    file_prefix    : &Path,
    allow_overwrite: bool,
    extensions     : &[&str],
) -> Result<HashMap<String, PathBuf>> {
    create_parent_directory(file_prefix)?;
    let mut outfiles = HashMap::with_capacity(extensions.len());
    for ext in extensions {
        let file = file_prefix.with_extension(ext);
        can_write_file(allow_overwrite, &file)?;
        outfiles.insert((*ext).to_string(), file);
    }
    trace!("Output file(s): {:#?}", outfiles.values());
    Ok(outfiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_can_write_file() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("pedigree.trios");

        assert!(can_write_file(false, &path).is_ok_and(|x| x)); // No overwrite, no file
        assert!(can_write_file(true, &path).is_ok_and(|x| x));  // Overwrite, no file

        let _ = File::create(&path)?;
        assert!(can_write_file(true, &path).is_ok_and(|x| x));  // Overwrite, file
        assert!(can_write_file(false, &path).is_err_and(|e| {   // No overwrite, file
            matches!(e.downcast_ref::<ParseError>(), Some(ParseError::OverwriteDisallowed { path: _ }))
        }));
        Ok(())
    }

    #[test]
    fn output_files_are_keyed_by_extension() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let prefix = tmpdir.path().join("nested").join("pedigree");

        let outfiles = get_output_files(&prefix, false, &["trios", "duos"])?;
        assert_eq!(outfiles.len(), 2);
        assert_eq!(outfiles["trios"], prefix.with_extension("trios"));
        assert_eq!(outfiles["duos"], prefix.with_extension("duos"));
        assert!(prefix.parent().expect("Missing parent").exists());
        Ok(())
    }

    #[test]
    fn overwrite_protection_covers_every_extension() -> Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let prefix = tmpdir.path().join("pedigree");

        let _ = File::create(prefix.with_extension("duos"))?;
        assert!(get_output_files(&prefix, false, &["trios", "duos"]).is_err());
        assert!(get_output_files(&prefix, true, &["trios", "duos"]).is_ok());
        Ok(())
    }
}
