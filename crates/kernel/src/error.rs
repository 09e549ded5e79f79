use std::fmt;

use thiserror::Error;

/// Parametric axis of a control grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    U,
    V,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::U => write!(f, "u"),
            Axis::V => write!(f, "v"),
        }
    }
}

/// Structured failure information for grid construction and evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("empty input: control grid has no points along the {axis} axis")]
    EmptyInput { axis: Axis },

    /// Not returned as an `Err`; reported alongside a clamped value.
    #[error("dimension {requested} along the {axis} axis exceeds the maximum of {max}; clamped")]
    DimensionOverflow {
        axis: Axis,
        requested: usize,
        max: usize,
    },
}

impl KernelError {
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}
