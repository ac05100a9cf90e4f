//! # Error reporting for reading of linear program files
//!
//! Reading an LP file is best-effort: lines and terms that can't be understood are skipped and
//! reported as diagnostics. The errors in this module are for the cases in which no model can be
//! produced at all, or in which the caller asked for diagnostics to be treated as errors.
use std::error::Error;
use std::fmt;
use std::io;

/// An `Import` error is created when an error was encountered during IO or parsing.
///
/// It is the highest error in the io error hierarchy.
#[derive(Debug)]
pub enum Import {
    /// The file extension of the provided file path is not known or supported.
    ///
    /// The contained `String` is a message for the end user.
    FileExtension(String),
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    IO(io::Error),
    /// Contents of the file could not be parsed into a linear program.
    Parse(Parse),
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Import::FileExtension(message) => message.fmt(f),
            Import::IO(error) => error.fmt(f),
            Import::Parse(error) => error.fmt(f),
        }
    }
}

impl Error for Import {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Import::FileExtension(_) => None,
            Import::IO(error) => Some(error),
            Import::Parse(error) => Some(error),
        }
    }
}

impl From<Parse> for Import {
    fn from(error: Parse) -> Self {
        Import::Parse(error)
    }
}

impl From<io::Error> for Import {
    fn from(error: io::Error) -> Self {
        Import::IO(error)
    }
}

/// A `Parse` error represents a problem with the contents of a file.
///
/// It may recursively hold more `Parse` errors to provide more detail. At the end of this chain,
/// there may be a file location containing a line number and line, at which the error was caused.
#[derive(Debug)]
pub struct Parse {
    description: String,
    source: Option<Source>,
}

/// Cause of a `Parse` error.
#[derive(Debug)]
enum Source {
    FileLocation(usize, String),
    Nested(Box<Parse>),
}

/// Result type for functions that can fail with a `Parse` error.
pub type ParseResult<T> = Result<T, Parse>;

/// A `FileLocation` references a line in the file by the line number of the file as originally
/// read from the disk (counting from 1). It contains a reference to the line itself.
pub type FileLocation<'a> = (usize, &'a str);

impl Parse {
    /// Create a new `Parse` error with only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), source: None }
    }

    /// Create a new `Parse` error pointing at a line in the file.
    pub fn with_location(description: impl Into<String>, (line_number, line): FileLocation) -> Self {
        Self {
            description: description.into(),
            source: Some(Source::FileLocation(line_number, line.to_string())),
        }
    }

    /// Wrap a new `Parse` error around this one.
    #[must_use]
    pub fn wrap(self, description: impl Into<String>) -> Self {
        Self { description: description.into(), source: Some(Source::Nested(Box::new(self))) }
    }

    /// The line number at the end of the chain, if any.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match &self.source {
            None => None,
            Some(Source::FileLocation(line_number, _)) => Some(*line_number),
            Some(Source::Nested(error)) => error.line_number(),
        }
    }

    /// Get all descriptions in the chain, leading up to this one.
    fn chain_description(&self) -> Vec<String> {
        let mut descriptions = vec![self.description.clone()];

        match &self.source {
            None => {},
            Some(Source::FileLocation(line_number, line)) => {
                descriptions.push(format!("\tCaused at line\t{}:\t{}", line_number, line));
            },
            Some(Source::Nested(error)) => descriptions.extend(error.chain_description()),
        }

        descriptions
    }
}

impl fmt::Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.chain_description().join("\n"))
    }
}

impl Error for Parse {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            Some(Source::Nested(error)) => Some(error.as_ref()),
            _ => None,
        }
    }
}
