//! Error taxonomy.
//!
//! [`ErrorKind`] is the closed set of error sentinels a function can return
//! as its *value*. The other enums here are host-level failures raised while
//! building operands, never while evaluating them.

use serde::{Deserialize, Serialize};

/// Error sentinels carried by [`crate::Eval::Error`].
///
/// Sentinels compare by kind only; there is no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorKind {
    /// Type or shape mismatch (`#VALUE!`).
    #[error("#VALUE!")]
    ValueInvalid,
    /// Domain error or non-finite numeric result (`#NUM!`).
    #[error("#NUM!")]
    NumError,
    /// Division by zero (`#DIV/0!`).
    #[error("#DIV/0!")]
    DivZero,
    /// Bad or failed reference resolution (`#REF!`).
    #[error("#REF!")]
    RefInvalid,
    /// No match found (`#N/A`).
    #[error("#N/A")]
    Na,
    /// Unknown name (`#NAME?`).
    #[error("#NAME?")]
    NameInvalid,
    /// Empty range intersection (`#NULL!`).
    #[error("#NULL!")]
    NullIntersection,
    /// An area operand contains the evaluating cell.
    #[error("~CIRCULAR~REF~")]
    CircularRef,
    /// Malformed invocation not otherwise classified.
    #[error("~non~std~err~")]
    UnknownError,
    /// Deliberately unimplemented feature.
    #[error("~FUNCTION~NOT~IMPLEMENTED~")]
    FunctionNotImplemented,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 10] = [
        ErrorKind::NullIntersection,
        ErrorKind::DivZero,
        ErrorKind::ValueInvalid,
        ErrorKind::RefInvalid,
        ErrorKind::NameInvalid,
        ErrorKind::NumError,
        ErrorKind::Na,
        ErrorKind::UnknownError,
        ErrorKind::FunctionNotImplemented,
        ErrorKind::CircularRef,
    ];

    /// Spreadsheet-style error label
    pub fn label(&self) -> &'static str {
        match self {
            Self::ValueInvalid => "#VALUE!",
            Self::NumError => "#NUM!",
            Self::DivZero => "#DIV/0!",
            Self::RefInvalid => "#REF!",
            Self::Na => "#N/A",
            Self::NameInvalid => "#NAME?",
            Self::NullIntersection => "#NULL!",
            Self::CircularRef => "~CIRCULAR~REF~",
            Self::UnknownError => "~non~std~err~",
            Self::FunctionNotImplemented => "~FUNCTION~NOT~IMPLEMENTED~",
        }
    }

    /// Error code as stored by the file format. Engine-only kinds use
    /// negative codes that never appear in a file.
    pub fn code(&self) -> i32 {
        match self {
            Self::NullIntersection => 0x00,
            Self::DivZero => 0x07,
            Self::ValueInvalid => 0x0F,
            Self::RefInvalid => 0x17,
            Self::NameInvalid => 0x1D,
            Self::NumError => 0x24,
            Self::Na => 0x2A,
            Self::UnknownError => -20,
            Self::FunctionNotImplemented => -30,
            Self::CircularRef => -60,
        }
    }

    /// Inverse of [`ErrorKind::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Raised when an [`crate::AreaEval`] is built with the wrong number of cells.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("Area {range} needs {expected} cells, got {actual}")]
    CellCount {
        range: String,
        expected: usize,
        actual: usize,
    },
    #[error("Area bounds out of range: {0}")]
    Bounds(String),
}

/// Errors that can occur when parsing addresses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid column: {0}")]
    InvalidColumn(String),
    #[error("Invalid row: {0}")]
    InvalidRow(String),
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}
