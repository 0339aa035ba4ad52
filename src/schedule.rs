//! Annuity and linear repayment schedules over a fixed 30-year horizon.

use serde::{Deserialize, Serialize};

use crate::formulas::{interest_payment, payment, principal_payment};

/// Number of monthly periods in every schedule.
pub const TOTAL_MONTHS: u32 = 360;

/// Input parameters for the annuity schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityInput {
    /// Annual loan interest rate as a percentage (e.g., 4 for 4%).
    pub loan_interest: f64,
    /// Share of the interest that is tax deductible, as a percentage.
    pub tax_deduction: f64,
    /// Savings available to the buyer.
    pub savings: f64,
    /// The principal amount of the loan.
    pub loan: f64,
    /// Extra repayment made once a year.
    pub annual_repayment: f64,
    /// Purchase price of the house.
    pub house_price: f64,
    /// Annual increase of the house value as a percentage.
    pub house_value_inflation: f64,
    /// Savings already spent on the purchase.
    pub used_savings: f64,
    /// Extra repayment made every month during the first `payoff_months` months.
    #[serde(default)]
    pub monthly_payoff: f64,
    #[serde(default)]
    pub payoff_months: u32,
}

/// Input parameters for the linear schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearInput {
    /// Annual loan interest rate as a percentage (e.g., 4 for 4%).
    pub loan_interest: f64,
    /// Share of the interest that is tax deductible, as a percentage.
    pub tax_deduction: f64,
    /// Savings available to the buyer. Also the starting point of the running investment.
    pub savings: f64,
    /// The principal amount of the loan.
    pub loan: f64,
    /// Purchase price of the house.
    pub house_price: f64,
    /// Annual increase of the house value as a percentage.
    pub house_value_inflation: f64,
}

/// Figures for a single month of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Month number, starting at 1.
    pub month: u32,
    /// Outstanding loan at the start of the month.
    pub balance: f64,
    pub gross_paid: f64,
    pub capital_paid: f64,
    pub interest: f64,
    /// Tax refund on the interest paid this month.
    pub deduction: f64,
    pub net_paid: f64,
    /// Running investment including this month's net payment.
    pub total_investment: f64,
    /// House value at the start of the month minus the outstanding loan.
    pub accumulated_equity: f64,
    /// Accumulated equity minus the investment made before this month.
    pub net_equity: f64,
    /// House value after this month's appreciation.
    pub house_market_value: f64,
}

/// Aggregates over the full 360-month computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_paid_gross: f64,
    pub total_paid_net: f64,
    pub total_interest_gross: f64,
    pub total_interest_net: f64,
    pub total_invested_gross: f64,
    pub total_invested_net: f64,
}

impl Totals {
    fn new(total_paid_gross: f64, total_paid_net: f64, loan: f64, savings: f64) -> Self {
        Self {
            total_paid_gross,
            total_paid_net,
            total_interest_gross: total_paid_gross - loan,
            total_interest_net: total_paid_net - loan,
            total_invested_gross: total_paid_gross + savings,
            total_invested_net: total_paid_net + savings,
        }
    }
}

/// A monthly schedule together with its totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub monthly: Vec<MonthRecord>,
    pub totals: Totals,
}

/// Converts an annual percentage into a monthly decimal rate.
pub fn monthly_rate(annual_percentage: f64) -> f64 {
    annual_percentage / (12.0 * 100.0)
}

/// Running state shared by both schedules: totals, investment and house value.
struct Ledger {
    tax_deduction: f64,
    house_growth: f64,
    house_market_value: f64,
    total_paid_gross: f64,
    total_paid_net: f64,
    total_investment: f64,
}

impl Ledger {
    fn new(tax_deduction: f64, house_price: f64, house_value_inflation: f64, investment: f64) -> Self {
        Self {
            tax_deduction,
            house_growth: monthly_rate(house_value_inflation),
            house_market_value: house_price,
            total_paid_gross: 0.0,
            total_paid_net: 0.0,
            total_investment: investment,
        }
    }

    /// Books one month and advances the house value.
    fn record(&mut self, index: u32, balance: f64, capital_paid: f64, interest: f64) -> MonthRecord {
        let gross_paid = capital_paid + interest;
        let deduction = interest * self.tax_deduction / 100.0;
        let net_paid = gross_paid - deduction;
        let accumulated_equity = self.house_market_value - balance;
        let net_equity = accumulated_equity - self.total_investment;

        self.total_paid_gross += gross_paid;
        self.total_paid_net += net_paid;
        self.total_investment += net_paid;
        self.house_market_value *= 1.0 + self.house_growth;

        MonthRecord {
            month: index + 1,
            balance,
            gross_paid,
            capital_paid,
            interest,
            deduction,
            net_paid,
            total_investment: self.total_investment,
            accumulated_equity,
            net_equity,
            house_market_value: self.house_market_value,
        }
    }

    fn totals(&self, loan: f64, savings: f64) -> Totals {
        Totals::new(self.total_paid_gross, self.total_paid_net, loan, savings)
    }
}

/// The yearly extra repayment lands on indices 12, 24, ... (months 13, 25, ...).
fn is_extra_repayment_month(index: u32) -> bool {
    index > 1 && index % 12 == 0
}

/// Calculates the schedule of an annuity mortgage.
///
/// The payment is re-derived every month from the outstanding balance and the
/// remaining term, so extra repayments lower later payments without a separate
/// re-amortization. All 360 months are computed and summed into the totals;
/// months that open with no outstanding balance are then dropped from the
/// returned rows.
pub fn calculate_annuity_schedule(input: &AnnuityInput) -> ScheduleResult {
    let rate = monthly_rate(input.loan_interest);
    let mut ledger = Ledger::new(
        input.tax_deduction,
        input.house_price,
        input.house_value_inflation,
        input.used_savings,
    );
    let mut principal_repaid = 0.0;

    let mut monthly = Vec::new();

    for i in 0..TOTAL_MONTHS {
        let balance = (input.loan - principal_repaid).max(0.0);
        let remaining = TOTAL_MONTHS - i;

        let pmt = payment(rate, remaining, balance);
        let principal = -principal_payment(rate, 1, remaining, balance);
        let interest = -interest_payment(balance, pmt, rate, 1);

        let mut capital_paid = principal;
        if i < input.payoff_months && balance > 0.0 {
            capital_paid += input.monthly_payoff;
        }
        if is_extra_repayment_month(i) {
            capital_paid += input.annual_repayment.min(balance);
        }

        principal_repaid += capital_paid;
        monthly.push(ledger.record(i, balance, capital_paid, interest));
    }

    let totals = ledger.totals(input.loan, input.savings);
    monthly.retain(|m| m.balance > 0.0);

    ScheduleResult { monthly, totals }
}

/// Calculates the schedule of a linear mortgage: an equal share of the loan is
/// repaid every month and all 360 rows are returned.
pub fn calculate_linear_schedule(input: &LinearInput) -> ScheduleResult {
    let rate = monthly_rate(input.loan_interest);
    let capital_paid = input.loan / f64::from(TOTAL_MONTHS);
    let mut ledger = Ledger::new(
        input.tax_deduction,
        input.house_price,
        input.house_value_inflation,
        input.savings,
    );

    let mut monthly = Vec::new();

    for i in 0..TOTAL_MONTHS {
        let balance = input.loan - capital_paid * f64::from(i);
        let interest = balance * rate;
        monthly.push(ledger.record(i, balance, capital_paid, interest));
    }

    ScheduleResult {
        monthly,
        totals: ledger.totals(input.loan, input.savings),
    }
}
