//! Time-value-of-money functions.

use cellcalc_primitives::{ErrorKind, Eval};
use cellcalc_utils::finance;

use super::{checked_number, finish};
use crate::coercion::CoercionPolicy;
use crate::operand::{number_operand, FUNCTION_COLLECTOR};

type Annuity = fn(f64, f64, f64, f64, bool) -> f64;

/// Shared body of FV, PV, PMT and NPER: three required numbers, an
/// optional fourth defaulting to zero and an optional payment-type flag.
fn annuity(args: &[Eval], src_row: i32, src_col: i16, f: Annuity) -> Result<Eval, ErrorKind> {
    if !(3..=5).contains(&args.len()) {
        return Err(ErrorKind::ValueInvalid);
    }
    let mut values = [0.0; 5];
    for (slot, arg) in values.iter_mut().zip(args) {
        *slot = number_operand(arg, src_row, src_col, CoercionPolicy::NUMERIC)?;
    }
    let [a, b, c, d, payment_type] = values;
    let result = f(a, b, c, d, payment_type != 0.0);
    if result.is_nan() {
        return Err(ErrorKind::ValueInvalid);
    }
    checked_number(result)
}

/// FV(rate, nper, pmt, [pv], [type])
pub fn fv(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(annuity(args, src_row, src_col, finance::fv))
}

/// PV(rate, nper, pmt, [fv], [type])
pub fn pv(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(annuity(args, src_row, src_col, finance::pv))
}

/// PMT(rate, nper, pv, [fv], [type])
pub fn pmt(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(annuity(args, src_row, src_col, finance::pmt))
}

/// NPER(rate, pmt, pv, [fv], [type])
pub fn nper(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(annuity(args, src_row, src_col, finance::nper))
}

/// NPV(rate, value1, ...): cash flows are gathered like an aggregate's
/// operands, so text and booleans inside ranges are skipped.
pub fn npv(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(npv_impl(args, src_row, src_col))
}

fn npv_impl(args: &[Eval], src_row: i32, src_col: i16) -> Result<Eval, ErrorKind> {
    let [rate, flows @ ..] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    if flows.is_empty() {
        return Err(ErrorKind::ValueInvalid);
    }
    let rate = number_operand(rate, src_row, src_col, CoercionPolicy::NUMERIC)?;
    let flows = FUNCTION_COLLECTOR.collect(flows)?;
    checked_number(finance::npv(rate, &flows))
}
