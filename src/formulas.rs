//! Spreadsheet-style loan payment formulas.
//!
//! Sign convention follows the usual financial-calculator functions: a positive
//! present value (money received) yields negative payments (money paid out).

/// Total payment per period for a fixed-payment loan.
///
/// `PMT = rate / ((1 + rate)^n - 1) * -(pv * (1 + rate)^n)`
///
/// With a rate of exactly zero the loan is repaid in equal parts, `-pv / n`.
pub fn payment(rate: f64, remaining_periods: u32, present_value: f64) -> f64 {
    if rate == 0.0 {
        return -present_value / f64::from(remaining_periods);
    }

    let pvif = (1.0 + rate).powf(f64::from(remaining_periods));
    (rate / (pvif - 1.0)) * -(present_value * pvif)
}

/// Interest portion of `payment` at `period` (1-based) of the schedule.
pub fn interest_payment(present_value: f64, payment: f64, rate: f64, period: u32) -> f64 {
    let growth = (1.0 + rate).powf(f64::from(period) - 1.0);
    -(present_value * growth * rate + payment * (growth - 1.0))
}

/// Principal portion of the payment at `period` (1-based) of the schedule.
pub fn principal_payment(rate: f64, period: u32, remaining_periods: u32, present_value: f64) -> f64 {
    let pmt = payment(rate, remaining_periods, present_value);
    pmt - interest_payment(present_value, pmt, rate, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rstest::rstest;

    #[test]
    fn test_payment_thirty_year_loan() {
        let pmt = payment(0.04 / 12.0, 360, 300_000.0);
        assert_abs_diff_eq!(pmt, -1432.25, epsilon = 0.01);
    }

    #[rstest]
    #[case(360, 300_000.0)]
    #[case(120, 12_000.0)]
    #[case(1, 500.0)]
    fn test_payment_zero_rate_is_straight_line(#[case] periods: u32, #[case] pv: f64) {
        assert_eq!(payment(0.0, periods, pv), -pv / f64::from(periods));
    }

    #[test]
    fn test_first_period_interest_is_balance_times_rate() {
        let rate = 0.05 / 12.0;
        let pmt = payment(rate, 240, 200_000.0);
        assert_relative_eq!(
            interest_payment(200_000.0, pmt, rate, 1),
            -200_000.0 * rate,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_interest_declines_over_schedule() {
        let rate = 0.04 / 12.0;
        let pmt = payment(rate, 360, 300_000.0);
        let first = -interest_payment(300_000.0, pmt, rate, 1);
        let later = -interest_payment(300_000.0, pmt, rate, 120);
        assert!(later < first);
        assert!(later > 0.0);
    }

    #[test]
    fn test_principal_plus_interest_is_payment() {
        let rate = 0.03 / 12.0;
        let pmt = payment(rate, 300, 150_000.0);
        for period in [1, 50, 300] {
            let ppmt = principal_payment(rate, period, 300, 150_000.0);
            let ipmt = interest_payment(150_000.0, pmt, rate, period);
            assert_relative_eq!(ppmt + ipmt, pmt, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_huge_period_counts_are_not_finite() {
        let pmt = payment(0.01, u32::MAX, 1_000.0);
        assert!(!pmt.is_finite());
        assert!(!interest_payment(1_000.0, -10.0, 0.01, u32::MAX).is_finite());
        assert!(!principal_payment(0.01, 1, u32::MAX, 1_000.0).is_finite());
    }

    #[test]
    fn test_zero_balance_pays_nothing() {
        let rate = 0.04 / 12.0;
        assert_eq!(payment(rate, 100, 0.0), 0.0);
        assert_eq!(principal_payment(rate, 1, 100, 0.0), 0.0);
    }
}
