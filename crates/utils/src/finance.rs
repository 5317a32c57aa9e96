//! Time-value-of-money identities.
//!
//! Sign convention: money paid out is negative, money received is positive.
//! `at_start` selects payments due at the beginning of each period, which
//! shifts every payment by one compounding factor.

/// Future value of an investment.
pub fn fv(rate: f64, nper: f64, pmt: f64, pv: f64, at_start: bool) -> f64 {
    if rate == 0.0 {
        return -(pv + nper * pmt);
    }
    let r1 = rate + 1.0;
    let growth = r1.powf(nper);
    let due = if at_start { r1 } else { 1.0 };
    (1.0 - growth) * due * pmt / rate - pv * growth
}

/// Present value of an investment.
pub fn pv(rate: f64, nper: f64, pmt: f64, fv: f64, at_start: bool) -> f64 {
    if rate == 0.0 {
        return -(nper * pmt + fv);
    }
    let r1 = rate + 1.0;
    let growth = r1.powf(nper);
    let due = if at_start { r1 } else { 1.0 };
    ((1.0 - growth) / rate * due * pmt - fv) / growth
}

/// Periodic payment for a loan or annuity.
pub fn pmt(rate: f64, nper: f64, pv: f64, fv: f64, at_start: bool) -> f64 {
    if rate == 0.0 {
        return -(fv + pv) / nper;
    }
    let r1 = rate + 1.0;
    let growth = r1.powf(nper);
    let due = if at_start { r1 } else { 1.0 };
    (fv + pv * growth) * rate / (due * (1.0 - growth))
}

/// Number of periods needed to reach `fv`.
pub fn nper(rate: f64, pmt: f64, pv: f64, fv: f64, at_start: bool) -> f64 {
    if rate == 0.0 {
        return -(fv + pv) / pmt;
    }
    let r1 = rate + 1.0;
    let due = if at_start { r1 } else { 1.0 };
    let ryr = due * pmt / rate;
    let (a1, a2) = if ryr - fv < 0.0 {
        ((fv - ryr).ln(), (-pv - ryr).ln())
    } else {
        ((ryr - fv).ln(), (pv + ryr).ln())
    };
    (a1 - a2) / r1.ln()
}

/// Net present value of cash flows arriving at the end of periods 1..=n.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    let r1 = rate + 1.0;
    let mut discount = r1;
    let mut total = 0.0;
    for cf in cash_flows {
        total += cf / discount;
        discount *= r1;
    }
    total
}
