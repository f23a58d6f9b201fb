use thiserror::Error;

/// Errors that abort a run.
///
/// Every variant is terminal: the tool either processes the whole file or
/// stops at the first problem, reporting the 1-based input line where known.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Missing field at line {line}: {message}")]
    MissingField { line: usize, message: String },
}

impl FilterError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Record-level errors, raised before the line number is known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("{0}")]
    Malformed(String),

    #[error("{0}")]
    MissingField(String),
}

impl RecordError {
    /// Attach the input line number, producing the run-level error
    #[must_use]
    pub fn at_line(self, line: usize) -> FilterError {
        match self {
            Self::Malformed(message) => FilterError::MalformedRecord { line, message },
            Self::MissingField(message) => FilterError::MissingField { line, message },
        }
    }
}
