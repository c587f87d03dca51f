//! Error types for model construction and resource loading

use std::fmt;
use std::path::PathBuf;

/// Main error type for construction, parsing and export failures
///
/// Contradictions and step-limit exhaustion are run outcomes, not errors.
#[derive(Debug)]
pub enum WfcError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// XML document could not be tokenized
    Xml {
        /// Underlying reader error
        source: quick_xml::Error,
    },

    /// A description document is well-formed but carries an unusable value
    InvalidDescriptor {
        /// Element the value was read from
        element: &'static str,
        /// Explanation of the problem
        reason: String,
    },

    /// Sample or tileset data doesn't meet extraction requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A propagator entry references a symbol outside the alphabet
    InvalidSymbolIndex {
        /// The offending symbol index
        index: usize,
        /// Number of symbols in the alphabet
        symbols: usize,
    },

    /// The tracing subscriber could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Xml { source } => write!(f, "Malformed XML: {source}"),
            Self::InvalidDescriptor { element, reason } => {
                write!(f, "Invalid <{element}> element: {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSymbolIndex { index, symbols } => {
                write!(f, "Symbol index {index} is out of bounds ({symbols} symbols)")
            }
            Self::Logging { reason } => write!(f, "Failed to initialize logging: {reason}"),
        }
    }
}

impl std::error::Error for WfcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Xml { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for fallible operations
pub type Result<T> = std::result::Result<T, WfcError>;

impl From<image::ImageError> for WfcError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for WfcError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<quick_xml::Error> for WfcError {
    fn from(source: quick_xml::Error) -> Self {
        Self::Xml { source }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WfcError {
    WfcError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid source data error
pub fn invalid_source(reason: &impl ToString) -> WfcError {
    WfcError::InvalidSourceData {
        reason: reason.to_string(),
    }
}

/// Create an invalid descriptor error for the named element
pub fn invalid_descriptor(element: &'static str, reason: &impl ToString) -> WfcError {
    WfcError::InvalidDescriptor {
        element,
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn io_error(path: impl Into<PathBuf>, operation: &'static str, source: std::io::Error) -> WfcError {
    WfcError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
