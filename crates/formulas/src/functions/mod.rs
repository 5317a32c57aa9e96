//! Standard spreadsheet functions, grouped by family.
//!
//! Every function has the [`crate::FunctionImpl`] signature: it receives
//! the evaluated operands plus the coordinates of the cell holding the
//! formula, checks its own arity, and always returns a value. Failures are
//! reported as [`Eval::Error`], never as a Rust error.

use cellcalc_primitives::{ErrorKind, Eval};

pub mod date;
pub mod finance;
pub mod logical;
pub mod lookup;
pub mod math;
pub mod stats;
pub mod text;

/// Fold an internal result into the returned value.
pub(crate) fn finish(result: Result<Eval, ErrorKind>) -> Eval {
    result.unwrap_or_else(Eval::Error)
}

/// Numeric result, with NaN and infinities reported as `#NUM!`.
pub(crate) fn checked_number(n: f64) -> Result<Eval, ErrorKind> {
    if n.is_finite() {
        Ok(Eval::Number(n))
    } else {
        Err(ErrorKind::NumError)
    }
}
