//! Aggregates and statistical functions.
//!
//! Operands are gathered with [`NumberCollector`](crate::NumberCollector) under the multi-operand
//! policy: literal text that is not a number aborts with `#VALUE!`, text and
//! booleans stored in cells are skipped, and the first error cell is
//! returned as the result.

use cellcalc_primitives::{ErrorKind, Eval};
use cellcalc_utils::{math, stats};

use super::{checked_number, finish};
use crate::coercion::CoercionPolicy;
use crate::operand::{number_operand, FUNCTION_COLLECTOR};

/// Collect every operand and apply `f`. A NaN result is reported as
/// `undefined`.
fn aggregate(args: &[Eval], f: fn(&[f64]) -> f64, undefined: ErrorKind) -> Eval {
    finish(FUNCTION_COLLECTOR.collect(args).and_then(|values| {
        let result = f(&values);
        if result.is_nan() {
            Err(undefined)
        } else {
            checked_number(result)
        }
    }))
}

pub fn sum(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, math::sum, ErrorKind::NumError)
}

pub fn sumsq(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, math::sumsq, ErrorKind::NumError)
}

pub fn product(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, math::product, ErrorKind::NumError)
}

pub fn min(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, math::min, ErrorKind::NumError)
}

pub fn max(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, math::max, ErrorKind::NumError)
}

pub fn average(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, math::average, ErrorKind::DivZero)
}

pub fn median(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, stats::median, ErrorKind::NumError)
}

/// MODE(number1, ...): `#NUM!` when no value repeats.
pub fn mode(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, stats::mode, ErrorKind::NumError)
}

pub fn stdev(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, stats::stdev, ErrorKind::DivZero)
}

pub fn var(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, stats::var, ErrorKind::DivZero)
}

pub fn avedev(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, stats::avedev, ErrorKind::NumError)
}

pub fn devsq(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    aggregate(args, stats::devsq, ErrorKind::NumError)
}

/// Shared body of LARGE and SMALL. `k` is rounded up to a whole rank.
fn kth(args: &[Eval], src_row: i32, src_col: i16, pick: fn(&[f64], usize) -> f64) -> Eval {
    finish(kth_impl(args, src_row, src_col, pick))
}

fn kth_impl(
    args: &[Eval],
    src_row: i32,
    src_col: i16,
    pick: fn(&[f64], usize) -> f64,
) -> Result<Eval, ErrorKind> {
    let [array, k] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    let values = FUNCTION_COLLECTOR.collect(std::slice::from_ref(array))?;
    let k = number_operand(k, src_row, src_col, CoercionPolicy::NUMERIC)?.ceil();
    if k < 1.0 || k > values.len() as f64 {
        return Err(ErrorKind::NumError);
    }
    checked_number(pick(&values, k as usize))
}

/// LARGE(array, k): duplicates occupy distinct ranks.
pub fn large(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    kth(args, src_row, src_col, stats::kth_largest)
}

pub fn small(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    kth(args, src_row, src_col, stats::kth_smallest)
}

/// Every value an operand contributes to COUNT/COUNTA, references resolved.
fn counted_values(args: &[Eval]) -> impl Iterator<Item = &Eval> {
    args.iter().flat_map(|arg| match arg {
        Eval::Area(area) => area.values().iter(),
        Eval::Ref(r) => std::slice::from_ref(r.inner()).iter(),
        value => std::slice::from_ref(value).iter(),
    })
}

/// COUNT(value1, ...): numbers only.
pub fn count(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    let n = counted_values(args)
        .filter(|v| matches!(v, Eval::Number(_)))
        .count();
    Eval::Number(n as f64)
}

/// COUNTA(value1, ...): every non-blank value, errors included.
pub fn counta(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    let n = counted_values(args)
        .filter(|v| !matches!(v, Eval::Blank))
        .count();
    Eval::Number(n as f64)
}

/// Sum of `f(x, y)` over paired cells of two equally sized operands.
/// Pairs where either side is not a number are ignored.
fn sum_xy(args: &[Eval], f: fn(f64, f64) -> f64) -> Eval {
    let [xs, ys] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    let xs: Vec<&Eval> = counted_values(std::slice::from_ref(xs)).collect();
    let ys: Vec<&Eval> = counted_values(std::slice::from_ref(ys)).collect();
    if xs.len() != ys.len() {
        return Eval::Error(ErrorKind::Na);
    }
    let mut total = 0.0;
    for (x, y) in xs.into_iter().zip(ys) {
        match (x, y) {
            (Eval::Error(kind), _) | (_, Eval::Error(kind)) => return Eval::Error(*kind),
            (Eval::Number(x), Eval::Number(y)) => total += f(*x, *y),
            _ => {}
        }
    }
    finish(checked_number(total))
}

pub fn sumx2my2(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    sum_xy(args, |x, y| x * x - y * y)
}

pub fn sumx2py2(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    sum_xy(args, |x, y| x * x + y * y)
}

pub fn sumxmy2(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    sum_xy(args, |x, y| (x - y) * (x - y))
}
