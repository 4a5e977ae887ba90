//! Error types for CoNLL writing.

use thiserror::Error;

/// Errors that abort writing a document.
///
/// Output already written to the sink when one of these is raised is not
/// rewound.
#[derive(Debug, Error)]
pub enum ConllError {
    /// A token is the dependent of more than one basic dependency.
    #[error("Illegal basic dependency structure - token [{token}] is dependent of more than one dependency.")]
    IllegalDependencyStructure { token: String },

    /// A dependency or argument points at a token that is not part of the
    /// sentence being written.
    #[error("{role} token [{token}] is not part of the sentence being written")]
    TokenOutsideSentence { role: &'static str, token: String },

    /// Only UTF-8 output is supported.
    #[error("unsupported output encoding `{encoding}`")]
    UnsupportedEncoding { encoding: String },

    /// The configuration file could not be read or parsed.
    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for CoNLL operations.
pub type ConllResult<T> = Result<T, ConllError>;
