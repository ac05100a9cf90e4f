//! # Reading and writing of linear programs
//!
//! This module provides read and write functionality for the LP file format.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::data::linear_program::model::Model;
use crate::io::error::Import;
use crate::io::lp::Parsed;

pub mod error;
pub mod lp;

/// Import a problem from a file.
///
/// Currently only supports the LP filetype.
///
/// The `import` function takes a file path and returns, if successful, the model that was read
/// together with the diagnostics for any lines or terms that were skipped.
///
/// # Errors
///
/// When a file extension is unknown or a file cannot be found or read.
pub fn import(file_path: &Path) -> Result<Parsed, Import> {
    // Open and read the file
    let mut program = String::new();
    File::open(file_path)?.read_to_string(&mut program)?;

    // Choose the right parser
    match file_path.extension() {
        Some(extension) => match extension.to_str() {
            Some("lp" | "LP") => Ok(lp::parse(&program)),
            Some(extension_string) => Err(Import::FileExtension(format!(
                "Could not recognise file extension \"{}\" of file: {:?}",
                extension_string, file_path
            ))),
            None => Err(Import::FileExtension(format!(
                "Could not convert OsStr to &str, probably invalid unicode: {:?}",
                extension
            ))),
        },
        None => Err(Import::FileExtension(format!(
            "Could not read extension from file path: {:?}",
            file_path
        ))),
    }
}

/// Import a problem from a file, failing if any line or term of it had to be skipped.
///
/// # Errors
///
/// As for `import`, and an `Import::Parse` error pointing at the first line that couldn't be read
/// completely.
pub fn import_strict(file_path: &Path) -> Result<Model, Import> {
    let parsed = import(file_path)?;
    let model = parsed.strict()
        .map_err(|error| error.wrap(format!("Skipped input in {}", file_path.display())))?;

    Ok(model)
}
