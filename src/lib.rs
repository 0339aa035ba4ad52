//! `nl_mortgage` is a Rust library for comparing Dutch home financing scenarios.
//!
//! It models the two common repayment regimes over a 30-year (360-month) term:
//! - **Annuity mortgage**: a fixed total monthly payment whose mix shifts from
//!   interest to principal over time. Supports a yearly extra repayment.
//! - **Linear mortgage**: a fixed principal repayment each month, so the total
//!   payment declines with the interest.
//!
//! Each schedule tracks the tax deduction on interest, the running investment,
//! and the home equity as the house value appreciates. A loan sizing helper
//! derives the loan from the purchase price and one-off costs, applying the
//! national mortgage guarantee (NHG) below its price cap.
//!
//! ## Usage
//!
//! ```rust
//! use nl_mortgage::{calculate_mortgage_scenario, MortgageScenario, NhgConfig, PurchaseCosts};
//!
//! let scenario = MortgageScenario {
//!     costs: PurchaseCosts {
//!         price: 300_000.0,
//!         notary: 1_500.0,
//!         valuation: 700.0,
//!         financial_advisor: 2_500.0,
//!         real_estate_agent: 0.0,
//!         structural_survey: 500.0,
//!         savings: 30_000.0,
//!     },
//!     loan_interest: 4.0,
//!     tax_deduction: 37.0,
//!     annual_repayment: 0.0,
//!     house_value_inflation: 2.0,
//! };
//!
//! match calculate_mortgage_scenario(&scenario, &NhgConfig::default()) {
//!     Ok(result) => {
//!         println!("Loan:                {:.2}", result.loan_figures.loan);
//!         println!("Annuity first month: {}", result.annuity_summary.first_gross_payment);
//!         println!("Linear first month:  {}", result.linear_summary.first_gross_payment);
//!     }
//!     Err(e) => eprintln!("Error calculating mortgage scenario: {}", e),
//! }
//! ```

pub mod formulas;
pub mod loan;
pub mod schedule;

use anyhow::{anyhow, ensure};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use formulas::{interest_payment, payment, principal_payment};
pub use loan::{calculate_loan_figures, LoanFigures, NhgConfig, PurchaseCosts};
pub use schedule::{
    calculate_annuity_schedule, calculate_linear_schedule, AnnuityInput, LinearInput, MonthRecord,
    ScheduleResult, Totals, TOTAL_MONTHS,
};

/// A purchase together with the financing assumptions used for both schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageScenario {
    pub costs: PurchaseCosts,
    /// Annual loan interest rate as a percentage.
    pub loan_interest: f64,
    /// Share of the interest that is tax deductible, as a percentage.
    pub tax_deduction: f64,
    /// Extra repayment made once a year on the annuity mortgage.
    pub annual_repayment: f64,
    /// Annual increase of the house value as a percentage.
    pub house_value_inflation: f64,
}

impl MortgageScenario {
    /// Parses a scenario from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).map_err(|e| anyhow!("Invalid mortgage scenario: {}", e))
    }
}

/// Currency-rounded overview of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub first_gross_payment: Decimal,
    pub last_gross_payment: Decimal,
    /// Number of months shown in the schedule.
    pub months: usize,
    pub total_paid_gross: Decimal,
    pub total_paid_net: Decimal,
    pub total_interest_gross: Decimal,
    pub total_interest_net: Decimal,
    pub total_invested_gross: Decimal,
    pub total_invested_net: Decimal,
}

impl ScheduleSummary {
    /// Rounds the headline figures of a schedule to cents.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the figures is not a finite number.
    pub fn from_schedule(schedule: &ScheduleResult) -> Result<Self, anyhow::Error> {
        let first = schedule.monthly.first().map_or(0.0, |m| m.gross_paid);
        let last = schedule.monthly.last().map_or(0.0, |m| m.gross_paid);
        let totals = &schedule.totals;

        Ok(ScheduleSummary {
            first_gross_payment: to_money(first, "first_gross_payment")?,
            last_gross_payment: to_money(last, "last_gross_payment")?,
            months: schedule.monthly.len(),
            total_paid_gross: to_money(totals.total_paid_gross, "total_paid_gross")?,
            total_paid_net: to_money(totals.total_paid_net, "total_paid_net")?,
            total_interest_gross: to_money(totals.total_interest_gross, "total_interest_gross")?,
            total_interest_net: to_money(totals.total_interest_net, "total_interest_net")?,
            total_invested_gross: to_money(totals.total_invested_gross, "total_invested_gross")?,
            total_invested_net: to_money(totals.total_invested_net, "total_invested_net")?,
        })
    }
}

/// Loan figures and both schedules for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub loan_figures: LoanFigures,
    pub annuity: ScheduleResult,
    pub linear: ScheduleResult,
    pub annuity_summary: ScheduleSummary,
    pub linear_summary: ScheduleSummary,
}

/// Converts a computed amount into a decimal rounded to cents.
pub fn to_money(value: f64, field: &str) -> Result<Decimal, anyhow::Error> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|_| anyhow!("{} is not a representable amount: {}", field, value))
}

/// Sizes the loan for a purchase and calculates both the annuity and the linear schedule.
///
/// This is the validated entry point of the library; the functions in
/// [`formulas`], [`schedule`] and [`loan`] accept any input.
///
/// # Errors
///
/// Returns an error if an input is not finite, if the price is not positive,
/// if costs, savings or rates are negative, or if the NHG fee rate is outside `[0, 1)`.
pub fn calculate_mortgage_scenario(
    scenario: &MortgageScenario,
    nhg: &NhgConfig,
) -> Result<ScenarioResult, anyhow::Error> {
    validate(scenario, nhg)?;

    let costs = &scenario.costs;
    let loan_figures = calculate_loan_figures(costs, nhg);

    let annuity = calculate_annuity_schedule(&AnnuityInput {
        loan_interest: scenario.loan_interest,
        tax_deduction: scenario.tax_deduction,
        savings: costs.savings,
        loan: loan_figures.loan,
        annual_repayment: scenario.annual_repayment,
        house_price: costs.price,
        house_value_inflation: scenario.house_value_inflation,
        used_savings: costs.savings,
        monthly_payoff: 0.0,
        payoff_months: 0,
    });

    let linear = calculate_linear_schedule(&LinearInput {
        loan_interest: scenario.loan_interest,
        tax_deduction: scenario.tax_deduction,
        savings: costs.savings,
        loan: loan_figures.loan,
        house_price: costs.price,
        house_value_inflation: scenario.house_value_inflation,
    });

    Ok(ScenarioResult {
        annuity_summary: ScheduleSummary::from_schedule(&annuity)?,
        linear_summary: ScheduleSummary::from_schedule(&linear)?,
        loan_figures,
        annuity,
        linear,
    })
}

fn validate(scenario: &MortgageScenario, nhg: &NhgConfig) -> Result<(), anyhow::Error> {
    let costs = &scenario.costs;
    let non_negative = [
        ("notary", costs.notary),
        ("valuation", costs.valuation),
        ("financial_advisor", costs.financial_advisor),
        ("real_estate_agent", costs.real_estate_agent),
        ("structural_survey", costs.structural_survey),
        ("savings", costs.savings),
        ("loan_interest", scenario.loan_interest),
        ("tax_deduction", scenario.tax_deduction),
        ("annual_repayment", scenario.annual_repayment),
    ];

    ensure!(costs.price.is_finite() && costs.price > 0.0, "Price must be a positive amount.");
    for (field, value) in non_negative {
        ensure!(value.is_finite() && value >= 0.0, "{} cannot be negative or non-finite.", field);
    }
    ensure!(
        scenario.house_value_inflation.is_finite(),
        "house_value_inflation must be a finite number."
    );
    ensure!(scenario.tax_deduction <= 100.0, "tax_deduction cannot exceed 100%.");
    ensure!(
        (0.0..1.0).contains(&nhg.fee_rate) && nhg.max_price.is_finite(),
        "NHG fee rate must be in [0, 1) and the price cap finite."
    );

    Ok(())
}
