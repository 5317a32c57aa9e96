//! Single-operand and binary math functions.

use std::f64::consts::PI;

use cellcalc_primitives::{ErrorKind, Eval};
use cellcalc_utils::math;

use super::{checked_number, finish};
use crate::coercion::CoercionPolicy;
use crate::operand::number_operand;

fn unary(args: &[Eval], src_row: i32, src_col: i16, f: fn(f64) -> f64) -> Eval {
    let [arg] = args else {
        return Eval::Error(ErrorKind::ValueInvalid);
    };
    let n = number_operand(arg, src_row, src_col, CoercionPolicy::NUMERIC);
    finish(n.and_then(|n| checked_number(f(n))))
}

fn binary_operands(args: &[Eval], src_row: i32, src_col: i16) -> Result<(f64, f64), ErrorKind> {
    let [a, b] = args else {
        return Err(ErrorKind::ValueInvalid);
    };
    let a = number_operand(a, src_row, src_col, CoercionPolicy::NUMERIC)?;
    let b = number_operand(b, src_row, src_col, CoercionPolicy::NUMERIC)?;
    Ok((a, b))
}

fn binary(args: &[Eval], src_row: i32, src_col: i16, f: fn(f64, f64) -> f64) -> Eval {
    finish(binary_operands(args, src_row, src_col).and_then(|(a, b)| checked_number(f(a, b))))
}

pub fn abs(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, f64::abs)
}

/// EVEN(number): round away from zero to the next even integer.
pub fn even(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, math::even)
}

/// ODD(number): round away from zero to the next odd integer.
pub fn odd(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, math::odd)
}

/// INT(number): round down toward negative infinity.
pub fn int(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, f64::floor)
}

pub fn sign(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, math::sign)
}

pub fn sqrt(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, f64::sqrt)
}

pub fn exp(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, f64::exp)
}

pub fn ln(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, f64::ln)
}

pub fn log10(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, f64::log10)
}

pub fn fact(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    unary(args, src_row, src_col, math::factorial)
}

pub fn pi(args: &[Eval], _src_row: i32, _src_col: i16) -> Eval {
    if args.is_empty() {
        Eval::Number(PI)
    } else {
        Eval::Error(ErrorKind::ValueInvalid)
    }
}

/// Decimal places argument, truncated toward zero.
fn places(p: f64) -> i32 {
    p.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

pub fn round(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    binary(args, src_row, src_col, |n, p| math::round(n, places(p)))
}

pub fn roundup(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    binary(args, src_row, src_col, |n, p| math::round_up(n, places(p)))
}

pub fn rounddown(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    binary(args, src_row, src_col, |n, p| math::round_down(n, places(p)))
}

/// MOD(number, divisor): the result takes the sign of the divisor.
pub fn mod_(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    finish(binary_operands(args, src_row, src_col).and_then(|(n, d)| {
        if d == 0.0 {
            return Err(ErrorKind::DivZero);
        }
        checked_number(math::modulo(n, d))
    }))
}

pub fn power(args: &[Eval], src_row: i32, src_col: i16) -> Eval {
    binary(args, src_row, src_col, f64::powf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcalc_primitives::RefEval;

    fn n(value: f64) -> Eval {
        Eval::Number(value)
    }

    #[test]
    fn test_unary_functions() {
        assert_eq!(abs(&[n(-2.5)], 0, 0), n(2.5));
        assert_eq!(int(&[n(-2.5)], 0, 0), n(-3.0));
        assert_eq!(sign(&[n(-7.0)], 0, 0), n(-1.0));
        assert_eq!(sqrt(&[n(16.0)], 0, 0), n(4.0));
        assert_eq!(exp(&[n(0.0)], 0, 0), n(1.0));
        assert_eq!(ln(&[n(1.0)], 0, 0), n(0.0));
        assert_eq!(log10(&[n(100.0)], 0, 0), n(2.0));
        assert_eq!(fact(&[n(5.0)], 0, 0), n(120.0));
        assert_eq!(pi(&[], 0, 0), n(PI));
    }

    #[test]
    fn test_even_odd() {
        assert_eq!(even(&[n(1.5)], 0, 0), n(2.0));
        assert_eq!(even(&[n(-1.0)], 0, 0), n(-2.0));
        assert_eq!(odd(&[n(2.0)], 0, 0), n(3.0));
        assert_eq!(odd(&[n(0.0)], 0, 0), n(1.0));
    }

    #[test]
    fn test_domain_errors() {
        let num = Eval::Error(ErrorKind::NumError);
        assert_eq!(sqrt(&[n(-1.0)], 0, 0), num);
        assert_eq!(ln(&[n(0.0)], 0, 0), num);
        assert_eq!(ln(&[n(-1.0)], 0, 0), num);
        assert_eq!(fact(&[n(-1.0)], 0, 0), num);
        assert_eq!(fact(&[n(171.0)], 0, 0), num);
        assert_eq!(exp(&[n(1000.0)], 0, 0), num);
        assert_eq!(power(&[n(-8.0), n(0.5)], 0, 0), num);
    }

    #[test]
    fn test_operand_coercion() {
        assert_eq!(abs(&[Eval::text("-3")], 0, 0), n(3.0));
        assert_eq!(abs(&[Eval::TRUE], 0, 0), n(1.0));
        assert_eq!(abs(&[Eval::BLANK], 0, 0), n(0.0));
        let cell = Eval::Ref(RefEval::evaluated(1, 1, Eval::text("4")));
        assert_eq!(sqrt(&[cell], 0, 0), n(2.0));
        assert_eq!(
            abs(&[Eval::text("abc")], 0, 0),
            Eval::Error(ErrorKind::ValueInvalid)
        );
        assert_eq!(
            abs(&[Eval::Error(ErrorKind::Na)], 0, 0),
            Eval::Error(ErrorKind::Na)
        );
        assert_eq!(abs(&[], 0, 0), Eval::Error(ErrorKind::ValueInvalid));
        assert_eq!(pi(&[n(1.0)], 0, 0), Eval::Error(ErrorKind::ValueInvalid));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round(&[n(2.5), n(0.0)], 0, 0), n(3.0));
        assert_eq!(round(&[n(1234.5678), n(-2.0)], 0, 0), n(1200.0));
        assert_eq!(round(&[n(1.2345), n(2.9)], 0, 0), n(1.23));
        assert_eq!(roundup(&[n(3.2), n(0.0)], 0, 0), n(4.0));
        assert_eq!(rounddown(&[n(-3.9), n(0.0)], 0, 0), n(-3.0));
    }

    #[test]
    fn test_mod_and_power() {
        assert_eq!(mod_(&[n(-3.0), n(2.0)], 0, 0), n(1.0));
        assert_eq!(mod_(&[n(3.0), n(-2.0)], 0, 0), n(-1.0));
        assert_eq!(
            mod_(&[n(3.0), n(0.0)], 0, 0),
            Eval::Error(ErrorKind::DivZero)
        );
        assert_eq!(
            mod_(&[n(3.0), Eval::BLANK], 0, 0),
            Eval::Error(ErrorKind::DivZero)
        );
        assert_eq!(power(&[n(2.0), n(10.0)], 0, 0), n(1024.0));
    }
}
