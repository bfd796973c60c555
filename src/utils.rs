use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{DataprepError, Result};

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .progress_chars("#>-"),
    );
    pb
}

/// Create a directory (and parents) if missing. Existing contents are kept.
pub fn ensure_directory(path: &Path) -> Result<PathBuf> {
    fs::create_dir_all(path).map_err(|e| DataprepError::io(path, e))?;
    Ok(path.to_path_buf())
}

fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(DataprepError::io(
            dir,
            io::Error::new(io::ErrorKind::NotFound, "directory not found"),
        ))
    }
}

fn glob_names(dir: &Path, pattern: &str) -> Result<Vec<(String, PathBuf)>> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let paths = glob(&full).map_err(|source| DataprepError::Pattern {
        pattern: full.clone(),
        source,
    })?;

    // glob yields paths in alphabetical order
    Ok(paths
        .filter_map(|entry| entry.ok())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some((name, path))
        })
        .collect())
}

/// File names in `dir` ending in `.{extension}`, sorted.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<String>> {
    require_dir(dir)?;
    Ok(glob_names(dir, &format!("*.{}", extension))?
        .into_iter()
        .filter(|(_, path)| path.is_file())
        .map(|(name, _)| name)
        .collect())
}

/// Names of the subdirectories of `dir`, sorted.
pub fn list_subdirectories(dir: &Path) -> Result<Vec<String>> {
    require_dir(dir)?;
    Ok(glob_names(dir, "*")?
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .map(|(name, _)| name)
        .collect())
}

fn copy_one(name: &str, from: &Path, to: &Path, pb: Option<&ProgressBar>) -> Result<()> {
    let src = from.join(name);
    fs::copy(&src, to.join(name)).map_err(|e| DataprepError::io(&src, e))?;
    if let Some(pb) = pb {
        pb.inc(1);
    }
    Ok(())
}

/// Copy the named files from `from` into `to` in order, overwriting
/// existing files.
///
/// Stops at the first failure. Files before it stay copied, files after it
/// are never touched.
pub fn copy_files(
    names: &[String],
    from: &Path,
    to: &Path,
    pb: Option<&ProgressBar>,
) -> Result<usize> {
    for name in names {
        copy_one(name, from, to, pb)?;
    }
    Ok(names.len())
}

/// Same as [`copy_files`] but spread over the rayon pool. Which files were
/// copied before a failure is unspecified.
pub fn copy_files_parallel(
    names: &[String],
    from: &Path,
    to: &Path,
    pb: Option<&ProgressBar>,
) -> Result<usize> {
    names
        .par_iter()
        .try_for_each(|name| copy_one(name, from, to, pb))?;
    Ok(names.len())
}
