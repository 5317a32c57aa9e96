//! # Cellcalc Formulas
//!
//! Evaluation of already-parsed spreadsheet function invocations.
//!
//! The host supplies a function name, the operands it has already
//! evaluated (values, single-cell references or rectangular areas) and the
//! coordinates of the cell holding the formula. This crate applies the
//! spreadsheet's coercion, range-resolution and error-propagation rules and
//! returns the resulting [`Eval`].
//!
//! ```
//! use cellcalc_formulas::FunctionRegistry;
//! use cellcalc_primitives::Eval;
//!
//! let registry = FunctionRegistry::new();
//! let args = [Eval::text("aXbXcX"), Eval::text("X"), Eval::text("-"), Eval::Number(2.0)];
//! let result = registry.evaluate("SUBSTITUTE", &args, 0, 0).unwrap();
//! assert_eq!(result, Eval::text("aXb-cX"));
//! ```

use cellcalc_primitives::Eval;

pub mod coercion;
pub mod functions;
pub mod operand;
pub mod registry;

pub use coercion::CoercionPolicy;
pub use operand::{NumberCollector, MAX_OPERANDS};
pub use registry::{EngineOptions, FunctionDefinition, FunctionFamily, FunctionRegistry};

/// Entry point of every function: `(operands, src_row, src_col) -> result`.
pub type FunctionImpl = fn(&[Eval], i32, i16) -> Eval;

/// Formula errors
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
}
