//! Loan sizing for a Dutch home purchase, including the NHG mortgage guarantee.

use serde::{Deserialize, Serialize};

/// Bank guarantee as a share of the purchase price.
pub const BANK_GUARANTEE_RATE: f64 = 0.001;
/// Transfer tax as a share of the purchase price.
pub const TRANSFER_TAX_RATE: f64 = 0.02;

/// Settings of the national mortgage guarantee (NHG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NhgConfig {
    /// One-off guarantee fee as a share of the loan (e.g., 0.006 for 0.6%).
    pub fee_rate: f64,
    /// Highest purchase price for which the guarantee is available.
    pub max_price: f64,
}

impl Default for NhgConfig {
    fn default() -> Self {
        Self {
            fee_rate: 0.006,
            max_price: 325_000.0,
        }
    }
}

impl NhgConfig {
    /// Parses the guarantee settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).map_err(|e| anyhow::anyhow!("Invalid NHG configuration: {}", e))
    }

    pub fn is_available(&self, price: f64) -> bool {
        price <= self.max_price
    }
}

/// Purchase price, one-off costs and the buyer's own money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseCosts {
    pub price: f64,
    pub notary: f64,
    pub valuation: f64,
    pub financial_advisor: f64,
    pub real_estate_agent: f64,
    pub structural_survey: f64,
    /// Savings put towards the purchase.
    pub savings: f64,
}

/// The loan needed for a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanFigures {
    pub loan: f64,
    /// Total one-off costs on top of the price, including the NHG fee when it applies.
    pub cost: f64,
    /// Loan-to-value ratio (`loan / price`), 1.0 meaning 100%.
    pub percentage: f64,
}

/// Derives the loan amount, total cost and loan-to-value ratio of a purchase.
///
/// When the price is within the NHG limit the guarantee fee is financed as well,
/// so the loan is grossed up by `1 / (1 - fee_rate)` and the fee is added to the
/// cost. A zero price gives a non-finite percentage.
pub fn calculate_loan_figures(costs: &PurchaseCosts, nhg: &NhgConfig) -> LoanFigures {
    let bank_guarantee = BANK_GUARANTEE_RATE * costs.price;
    let transfer_tax = TRANSFER_TAX_RATE * costs.price;
    let nhg_available = nhg.is_available(costs.price);

    let mut cost = bank_guarantee
        + transfer_tax
        + costs.notary
        + costs.valuation
        + costs.financial_advisor
        + costs.real_estate_agent
        + costs.structural_survey;

    let divisor = if nhg_available { 1.0 - nhg.fee_rate } else { 1.0 };
    let loan = (costs.price - costs.savings + cost) / divisor;

    if nhg_available {
        cost += nhg.fee_rate * loan;
    }

    LoanFigures {
        loan,
        cost,
        percentage: loan / costs.price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn purchase(price: f64, savings: f64) -> PurchaseCosts {
        PurchaseCosts {
            price,
            notary: 0.0,
            valuation: 0.0,
            financial_advisor: 0.0,
            real_estate_agent: 0.0,
            structural_survey: 0.0,
            savings,
        }
    }

    #[test]
    fn test_loan_within_nhg_limit() {
        let nhg = NhgConfig::default();
        let figures = calculate_loan_figures(&purchase(300_000.0, 0.0), &nhg);

        // bank guarantee and transfer tax are always due
        let base_cost = 300_000.0 * 0.021;
        let expected_loan = (300_000.0 + base_cost) / (1.0 - 0.006);

        assert_relative_eq!(figures.loan, expected_loan, max_relative = 1e-12);
        assert_relative_eq!(figures.cost, base_cost + 0.006 * expected_loan, max_relative = 1e-12);
        assert_relative_eq!(figures.percentage, figures.loan / 300_000.0);
        assert!(figures.percentage > 1.0);
    }

    #[test]
    fn test_loan_above_nhg_limit() {
        let figures = calculate_loan_figures(&purchase(400_000.0, 50_000.0), &NhgConfig::default());

        assert_relative_eq!(figures.cost, 400_000.0 * 0.021, max_relative = 1e-12);
        assert_relative_eq!(figures.loan, 350_000.0 + 400_000.0 * 0.021, max_relative = 1e-12);
        assert!(figures.percentage < 1.0);
    }

    #[rstest]
    #[case(325_000.0, true)]
    #[case(325_000.01, false)]
    #[case(100_000.0, true)]
    fn test_nhg_limit_is_inclusive(#[case] price: f64, #[case] available: bool) {
        assert_eq!(NhgConfig::default().is_available(price), available);
    }

    #[test]
    fn test_fees_are_financed() {
        let costs = PurchaseCosts {
            notary: 1_500.0,
            valuation: 700.0,
            financial_advisor: 2_500.0,
            real_estate_agent: 3_000.0,
            structural_survey: 500.0,
            ..purchase(500_000.0, 40_000.0)
        };
        let figures = calculate_loan_figures(&costs, &NhgConfig::default());

        let cost = 500_000.0 * 0.021 + 8_200.0;
        assert_relative_eq!(figures.cost, cost, max_relative = 1e-12);
        assert_relative_eq!(figures.loan, 460_000.0 + cost, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_price_is_not_finite() {
        let figures = calculate_loan_figures(&purchase(0.0, 0.0), &NhgConfig::default());
        assert!(!figures.percentage.is_finite());
    }

    #[test]
    fn test_nhg_config_from_json() {
        let nhg = NhgConfig::from_json(r#"{ "fee_rate": 0.007, "max_price": 405000 }"#).unwrap();
        assert_eq!(nhg, NhgConfig { fee_rate: 0.007, max_price: 405_000.0 });

        assert!(NhgConfig::from_json(r#"{ "fee_rate": 0.007 }"#).is_err());
    }
}
