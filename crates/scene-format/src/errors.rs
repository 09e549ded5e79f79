use std::path::PathBuf;

use bezier_kernel::KernelError;

/// Why a single line of a scene file produced no shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("unrecognized shape type: {keyword:?}")]
    UnrecognizedShape { keyword: String },

    #[error("malformed line: {reason}")]
    MalformedLine { reason: String },

    #[error(transparent)]
    Eval(#[from] KernelError),
}

impl ShapeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedLine {
            reason: reason.into(),
        }
    }
}

/// Errors that prevent a scene file from being read at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
