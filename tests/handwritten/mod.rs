//! # Small models written by hand
//!
//! Each file exercises a different part of the LP format: binaries, bounds with equality and `>=`
//! constraints, and sloppy formatting with lines that have to be skipped.
use std::path::{Path, PathBuf};

/// # Reading, canonicalization and export
#[allow(missing_docs)]
mod test;

/// Relative path of the folder where the lp files are stored.
///
/// The path is relative to the project root folder.
fn problem_file_directory() -> PathBuf {
    Path::new(file!()).parent().unwrap().to_path_buf()
}

/// Compute the path of the problem file, based on the problem name.
///
/// # Arguments
///
/// * `name`: Problem name without extension.
///
/// # Return value
///
/// File path relative to the project root folder.
fn get_test_file_path(name: &str) -> PathBuf {
    problem_file_directory().join(name).with_extension("lp")
}
