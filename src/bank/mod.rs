//! Question-bank loading.

mod parser;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Question;

pub use parser::parse;

/// Error loading the question bank file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The bank file could not be read.
    #[error("cannot read question bank {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a bank file fully and parse it into questions.
///
/// A missing or unreadable file is fatal to the tool; a readable file
/// containing no question blocks yields an empty bank, which is not an
/// error here (the menu refuses to start a session over it).
pub fn load_question_bank<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parser::parse(&raw))
}
