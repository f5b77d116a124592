use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all koha-perldeps operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PerldepsError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network request to a package lookup service failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The Koha release version could not be determined.
    #[error("Release version error: {message}")]
    #[diagnostic(help("point the command at an unpacked Koha release tree"))]
    Release { message: String },

    /// Running or reading the Perl dependency extraction failed.
    #[error("Dependency extraction failed: {message}")]
    Extraction { message: String },

    /// A package name could not be mapped back to a Perl module name.
    #[error("Strange package name: {message}")]
    Name { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

impl PerldepsError {
    /// Process exit code for this failure class.
    ///
    /// 3 = release version missing, 4 = extraction produced nothing,
    /// 1 = everything else. Code 2 is clap's usage-error exit.
    pub fn exit_code(&self) -> u8 {
        match self {
            PerldepsError::Release { .. } => 3,
            PerldepsError::Extraction { .. } => 4,
            _ => 1,
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type PerldepsResult<T> = miette::Result<T>;
