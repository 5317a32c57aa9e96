//! # Cellcalc Primitives
//!
//! Core primitives for formula evaluation: the polymorphic operand/result
//! type ([`Eval`]), resolved references ([`RefEval`], [`AreaEval`]), the
//! fixed error taxonomy ([`ErrorKind`]) and cell coordinates.

pub mod address;
pub mod error;
pub mod eval;

pub use address::CellAddress;
pub use error::{AddressError, ErrorKind, ShapeError};
pub use eval::{AreaEval, Eval, RefEval};
