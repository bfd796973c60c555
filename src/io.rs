use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{DataprepError, Result};

/// Parse a JSON file straight from a buffered file stream.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| DataprepError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| DataprepError::json(path, e))
}

/// Write `value` as compact JSON.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| DataprepError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value).map_err(|e| DataprepError::json(path, e))?;
    writer.flush().map_err(|e| DataprepError::io(path, e))
}

/// Write `value` as JSON indented by two spaces.
pub fn write_json_file_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| DataprepError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| DataprepError::json(path, e))?;
    writer.flush().map_err(|e| DataprepError::io(path, e))
}

/// Read a list of ids, one per line. Lines are trimmed and blank lines dropped.
pub fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| DataprepError::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
