//! Annual business tax declaration.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross profit = (goods sales - goods COGS) + (service sales - service COGS), minimum 0 |
//! | 2    | Net profit = gross profit - administrative expenses, minimum 0 |
//! | 3    | Article 101 exemption = smaller of net profit and the yearly ceiling |
//! | 4    | Taxable income = net profit - exemption - other deductions, minimum 0 |
//! | 5    | Three scenarios computed from taxable income (see [`ScenarioKind`]) |
//!
//! # Example
//!
//! ```
//! use tax_core::{DeclarationCalculator, ProfitLossStatement, TaxYearConfig};
//!
//! let mut calculator = DeclarationCalculator::new(TaxYearConfig::year_1404());
//! calculator.set_profit_loss(ProfitLossStatement {
//!     goods_sales: 3_000_000_000,
//!     goods_cogs: 500_000_000,
//!     admin_expenses: 200_000_000,
//!     ..Default::default()
//! });
//!
//! let report = calculator.generate_report().unwrap();
//!
//! assert_eq!(report.deductions_and_exemptions.taxable_income, 300_000_000);
//! assert_eq!(report.tax_scenarios.intack_based.final_tax, 67_500_000);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{apply_rate, checked_add, checked_sub, rate_percent};
use crate::calculations::progressive::ProgressiveTax;
use crate::models::{
    Activity, DeclarationReport, DeclarationRequest, DeductionsAndExemptions, ProfitLossStatement,
    ProfitLossSummary, ScenarioKind, TaxScenario, TaxScenarios, TaxYearConfig,
};

/// Income uplift the auditor applies, in percent.
const AUDITOR_ADJUSTMENT_PERCENT: u32 = 10;
const AUDITOR_ADJUSTMENT_FACTOR: Decimal = dec!(1.1);

const SMALL_BUSINESS_REDUCTION: Decimal = dec!(0.05);
const GROWTH_REDUCTION: Decimal = dec!(0.02);
/// Year-over-year growth above which the growth reduction applies.
const GROWTH_THRESHOLD: Decimal = dec!(0.10);
const MAX_REDUCTION_RATE: Decimal = dec!(0.05);

/// Errors that can occur while calculating a declaration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The tax year configuration has no brackets.
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    /// An intermediate amount left the representable range.
    #[error("amount overflow while computing {0}")]
    Overflow(&'static str),
}

/// Calculator for a single taxpayer's declaration.
#[derive(Debug, Clone, Default)]
pub struct DeclarationCalculator {
    config: TaxYearConfig,
    activities: Vec<Activity>,
    profit_loss: ProfitLossStatement,
    other_deductions: i64,
    previous_year_income: i64,
}

impl DeclarationCalculator {
    pub fn new(config: TaxYearConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Builds a calculator loaded with everything in `request`.
    pub fn from_request(
        config: TaxYearConfig,
        request: &DeclarationRequest,
    ) -> Self {
        let mut calculator = Self::new(config);
        for activity in &request.activities {
            calculator.add_activity(activity.clone());
        }
        calculator.set_profit_loss(request.profit_loss.clone());
        calculator.set_other_deductions(request.other_deductions);
        calculator.set_previous_year_income(request.previous_year_income);
        calculator
    }

    pub fn add_activity(
        &mut self,
        activity: Activity,
    ) {
        self.activities.push(activity);
    }

    pub fn set_profit_loss(
        &mut self,
        profit_loss: ProfitLossStatement,
    ) {
        self.profit_loss = profit_loss;
    }

    pub fn set_other_deductions(
        &mut self,
        amount: i64,
    ) {
        self.other_deductions = amount;
    }

    pub fn set_previous_year_income(
        &mut self,
        amount: i64,
    ) {
        self.previous_year_income = amount;
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    /// Gross profit from goods and services, never below zero.
    pub fn gross_profit(&self) -> Result<i64, CalculationError> {
        let pl = &self.profit_loss;
        let goods_profit = checked_sub(pl.goods_sales, pl.goods_cogs, "goods profit")?;
        let service_profit = checked_sub(pl.service_sales, pl.service_cogs, "service profit")?;
        let gross = checked_add(goods_profit, service_profit, "gross profit")?;

        Ok(gross.max(0))
    }

    /// Gross profit less administrative expenses, never below zero.
    pub fn net_profit(&self) -> Result<i64, CalculationError> {
        let net = checked_sub(
            self.gross_profit()?,
            self.profit_loss.admin_expenses,
            "net profit",
        )?;

        Ok(net.max(0))
    }

    /// Applies the Article 101 exemption and other deductions to net profit.
    pub fn deductions_and_exemptions(&self) -> Result<DeductionsAndExemptions, CalculationError> {
        let net_profit = self.net_profit()?;
        let article_101_deduction = net_profit.min(self.config.article_101_ceiling);

        let after_exemption = checked_sub(net_profit, article_101_deduction, "taxable income")?;
        let taxable_income = checked_sub(after_exemption, self.other_deductions, "taxable income")?;

        Ok(DeductionsAndExemptions {
            net_profit,
            article_101_ceiling: self.config.article_101_ceiling,
            article_101_deduction,
            other_deductions: self.other_deductions,
            taxable_income: taxable_income.max(0),
        })
    }

    /// Scenario 1: progressive tax on taxable income as declared.
    pub fn intack_based_scenario(
        &self,
        taxable_income: i64,
    ) -> Result<TaxScenario, CalculationError> {
        let tax = self.progressive().calculate(taxable_income)?;

        Ok(TaxScenario {
            method: ScenarioKind::IntackBased.method_label().to_string(),
            taxable_income: Some(taxable_income),
            original_income: None,
            adjusted_income: None,
            adjustment_percent: None,
            base_tax: tax.total_tax,
            reduction_rate: Some(Decimal::ZERO),
            reduction_rate_percent: None,
            reduction_amount: Some(0),
            final_tax: tax.total_tax,
            breakdown: tax.breakdown,
        })
    }

    /// Scenario 2: the auditor estimates income 10% above the declaration.
    pub fn auditor_ideal_scenario(
        &self,
        taxable_income: i64,
    ) -> Result<TaxScenario, CalculationError> {
        let adjusted_income = apply_rate(taxable_income, AUDITOR_ADJUSTMENT_FACTOR)?;
        let tax = self.progressive().calculate(adjusted_income)?;

        Ok(TaxScenario {
            method: ScenarioKind::AuditorIdeal.method_label().to_string(),
            taxable_income: None,
            original_income: Some(taxable_income),
            adjusted_income: Some(adjusted_income),
            adjustment_percent: Some(AUDITOR_ADJUSTMENT_PERCENT),
            base_tax: tax.total_tax,
            reduction_rate: None,
            reduction_rate_percent: None,
            reduction_amount: None,
            final_tax: tax.total_tax,
            breakdown: tax.breakdown,
        })
    }

    /// Scenario 3: declared income with the reductions the taxpayer qualifies for.
    pub fn declaration_proposal_scenario(
        &self,
        taxable_income: i64,
    ) -> Result<TaxScenario, CalculationError> {
        let tax = self.progressive().calculate(taxable_income)?;
        let reduction_rate = self.reduction_rate(taxable_income);
        let reduction_amount = apply_rate(tax.total_tax, reduction_rate)?;
        let final_tax = checked_sub(tax.total_tax, reduction_amount, "final tax")?;

        Ok(TaxScenario {
            method: ScenarioKind::DeclarationProposal.method_label().to_string(),
            taxable_income: Some(taxable_income),
            original_income: None,
            adjusted_income: None,
            adjustment_percent: None,
            base_tax: tax.total_tax,
            reduction_rate: Some(reduction_rate),
            reduction_rate_percent: Some(rate_percent(reduction_rate, 1)),
            reduction_amount: Some(reduction_amount),
            final_tax,
            breakdown: tax.breakdown,
        })
    }

    /// Produces the full report: profit and loss, exemptions and all scenarios.
    pub fn generate_report(&self) -> Result<DeclarationReport, CalculationError> {
        let gross_profit = self.gross_profit()?;
        let deductions = self.deductions_and_exemptions()?;
        let taxable_income = deductions.taxable_income;

        debug!(
            gross_profit,
            net_profit = deductions.net_profit,
            taxable_income,
            "computed declaration base"
        );

        let tax_scenarios = TaxScenarios {
            intack_based: self.intack_based_scenario(taxable_income)?,
            auditor_ideal: self.auditor_ideal_scenario(taxable_income)?,
            declaration_proposal: self.declaration_proposal_scenario(taxable_income)?,
        };

        let pl = &self.profit_loss;
        Ok(DeclarationReport {
            activities: self.activities.clone(),
            profit_loss_statement: ProfitLossSummary {
                goods_sales: pl.goods_sales,
                service_sales: pl.service_sales,
                goods_cogs: pl.goods_cogs,
                service_cogs: pl.service_cogs,
                gross_profit,
                admin_expenses: pl.admin_expenses,
                net_profit: deductions.net_profit,
            },
            deductions_and_exemptions: deductions,
            tax_scenarios,
        })
    }

    fn progressive(&self) -> ProgressiveTax<'_> {
        ProgressiveTax::new(&self.config.tax_brackets)
    }

    /// Small businesses get 5%; income growth over 10% adds 2%; capped at 5%.
    fn reduction_rate(
        &self,
        taxable_income: i64,
    ) -> Decimal {
        let mut rate = Decimal::ZERO;

        if taxable_income < self.config.small_business_threshold {
            rate += SMALL_BUSINESS_REDUCTION;
        }

        if self.previous_year_income > 0 {
            let previous = Decimal::from(self.previous_year_income);
            let growth = Decimal::from(taxable_income) - previous;
            if growth > previous * GROWTH_THRESHOLD {
                rate += GROWTH_REDUCTION;
            }
        }

        rate.min(MAX_REDUCTION_RATE)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::ActivityType;

    fn calculator_with(profit_loss: ProfitLossStatement) -> DeclarationCalculator {
        let mut calculator = DeclarationCalculator::new(TaxYearConfig::year_1404());
        calculator.set_profit_loss(profit_loss);
        calculator
    }

    /// Net profit of 2.3B: 300M taxable after the 2B exemption.
    fn mid_size_business() -> DeclarationCalculator {
        calculator_with(ProfitLossStatement {
            goods_sales: 3_000_000_000,
            goods_cogs: 500_000_000,
            admin_expenses: 200_000_000,
            ..Default::default()
        })
    }

    /// Net profit of 5B: 3B taxable, above the small business threshold.
    fn large_business() -> DeclarationCalculator {
        calculator_with(ProfitLossStatement {
            goods_sales: 4_000_000_000,
            service_sales: 2_000_000_000,
            goods_cogs: 1_000_000_000,
            ..Default::default()
        })
    }

    // =========================================================================
    // profit tests
    // =========================================================================

    #[test]
    fn gross_profit_combines_goods_and_services() {
        let calculator = calculator_with(ProfitLossStatement {
            goods_sales: 1_000,
            goods_cogs: 400,
            service_sales: 500,
            service_cogs: 100,
            ..Default::default()
        });

        assert_eq!(calculator.gross_profit().unwrap(), 1_000);
    }

    #[test]
    fn gross_profit_never_negative() {
        let calculator = calculator_with(ProfitLossStatement {
            goods_sales: 100,
            goods_cogs: 900,
            ..Default::default()
        });

        assert_eq!(calculator.gross_profit().unwrap(), 0);
    }

    #[test]
    fn net_profit_never_negative() {
        let calculator = calculator_with(ProfitLossStatement {
            goods_sales: 100,
            admin_expenses: 500,
            ..Default::default()
        });

        assert_eq!(calculator.net_profit().unwrap(), 0);
    }

    #[test]
    fn gross_profit_reports_overflow() {
        let calculator = calculator_with(ProfitLossStatement {
            goods_sales: i64::MAX,
            service_sales: i64::MAX,
            ..Default::default()
        });

        assert_eq!(
            calculator.gross_profit(),
            Err(CalculationError::Overflow("gross profit"))
        );
    }

    // =========================================================================
    // deductions tests
    // =========================================================================

    #[test]
    fn article_101_exempts_up_to_ceiling() {
        let deductions = mid_size_business().deductions_and_exemptions().unwrap();

        assert_eq!(deductions.net_profit, 2_300_000_000);
        assert_eq!(deductions.article_101_deduction, 2_000_000_000);
        assert_eq!(deductions.taxable_income, 300_000_000);
    }

    #[test]
    fn article_101_exempts_whole_profit_below_ceiling() {
        let calculator = calculator_with(ProfitLossStatement {
            goods_sales: 800_000_000,
            ..Default::default()
        });

        let deductions = calculator.deductions_and_exemptions().unwrap();

        assert_eq!(deductions.article_101_deduction, 800_000_000);
        assert_eq!(deductions.taxable_income, 0);
    }

    #[test]
    fn other_deductions_cannot_push_taxable_income_negative() {
        let mut calculator = mid_size_business();
        calculator.set_other_deductions(500_000_000);

        let deductions = calculator.deductions_and_exemptions().unwrap();

        assert_eq!(deductions.other_deductions, 500_000_000);
        assert_eq!(deductions.taxable_income, 0);
    }

    // =========================================================================
    // scenario tests
    // =========================================================================

    #[test]
    fn intack_scenario_has_no_reduction() {
        let scenario = mid_size_business()
            .intack_based_scenario(300_000_000)
            .unwrap();

        assert_eq!(scenario.base_tax, 67_500_000);
        assert_eq!(scenario.final_tax, 67_500_000);
        assert_eq!(scenario.reduction_amount, Some(0));
        assert_eq!(scenario.breakdown.len(), 3);
    }

    #[test]
    fn auditor_scenario_raises_income_ten_percent() {
        let scenario = mid_size_business()
            .auditor_ideal_scenario(300_000_000)
            .unwrap();

        assert_eq!(scenario.original_income, Some(300_000_000));
        assert_eq!(scenario.adjusted_income, Some(330_000_000));
        assert_eq!(scenario.adjustment_percent, Some(10));
        assert_eq!(scenario.final_tax, 75_000_000);
        assert_eq!(scenario.reduction_amount, None);
    }

    #[test]
    fn proposal_scenario_gives_small_business_reduction() {
        let scenario = mid_size_business()
            .declaration_proposal_scenario(300_000_000)
            .unwrap();

        assert_eq!(scenario.reduction_rate, Some(dec!(0.05)));
        assert_eq!(scenario.reduction_rate_percent.as_deref(), Some("5.0%"));
        assert_eq!(scenario.reduction_amount, Some(3_375_000));
        assert_eq!(scenario.final_tax, 64_125_000);
    }

    #[test]
    fn proposal_reduction_is_capped_with_growth() {
        let mut calculator = mid_size_business();
        calculator.set_previous_year_income(100_000_000);

        let scenario = calculator
            .declaration_proposal_scenario(300_000_000)
            .unwrap();

        assert_eq!(scenario.reduction_rate, Some(dec!(0.05)));
        assert_eq!(scenario.final_tax, 64_125_000);
    }

    #[test]
    fn proposal_growth_reduction_for_large_business() {
        let mut calculator = large_business();
        calculator.set_previous_year_income(1_000_000_000);

        let scenario = calculator
            .declaration_proposal_scenario(3_000_000_000)
            .unwrap();

        assert_eq!(scenario.base_tax, 742_500_000);
        assert_eq!(scenario.reduction_rate_percent.as_deref(), Some("2.0%"));
        assert_eq!(scenario.reduction_amount, Some(14_850_000));
        assert_eq!(scenario.final_tax, 727_650_000);
    }

    #[test]
    fn proposal_without_growth_for_large_business() {
        let mut calculator = large_business();
        calculator.set_previous_year_income(2_900_000_000);

        let scenario = calculator
            .declaration_proposal_scenario(3_000_000_000)
            .unwrap();

        assert_eq!(scenario.reduction_rate_percent.as_deref(), Some("0.0%"));
        assert_eq!(scenario.final_tax, scenario.base_tax);
    }

    // =========================================================================
    // report tests
    // =========================================================================

    #[test]
    fn report_echoes_inputs_and_orders_scenarios() {
        let request = DeclarationRequest {
            taxpayer_name: "Ahmad".to_string(),
            taxpayer_id: "1400".to_string(),
            activities: vec![Activity {
                code: "1".to_string(),
                name: "Retail".to_string(),
                activity_type: ActivityType::Goods,
                activity_percentage: dec!(15),
                non_specialized_percentage: dec!(0),
                sales: 3_000_000_000,
            }],
            profit_loss: ProfitLossStatement {
                goods_sales: 3_000_000_000,
                goods_cogs: 500_000_000,
                admin_expenses: 200_000_000,
                ..Default::default()
            },
            other_deductions: 0,
            previous_year_income: 0,
        };

        let report = DeclarationCalculator::from_request(TaxYearConfig::year_1404(), &request)
            .generate_report()
            .unwrap();

        assert_eq!(report.activities, request.activities);
        assert_eq!(report.profit_loss_statement.gross_profit, 2_500_000_000);
        assert_eq!(report.profit_loss_statement.net_profit, 2_300_000_000);

        let keys: Vec<&str> = report.tax_scenarios.iter().map(|(k, _)| k.key()).collect();
        assert_eq!(
            keys,
            vec!["intack_based", "auditor_ideal", "declaration_proposal"]
        );
    }

    #[test]
    fn report_for_exempt_business_has_zero_tax() {
        let report = calculator_with(ProfitLossStatement {
            service_sales: 900_000_000,
            ..Default::default()
        })
        .generate_report()
        .unwrap();

        for (_, scenario) in report.tax_scenarios.iter() {
            assert_eq!(scenario.final_tax, 0);
            assert!(scenario.breakdown.is_empty());
        }
    }

    #[test]
    fn report_serializes_scenarios_in_order() {
        let report = mid_size_business().generate_report().unwrap();

        let json = serde_json::to_string(&report).unwrap();
        let intack = json.find("\"intack_based\"").unwrap();
        let auditor = json.find("\"auditor_ideal\"").unwrap();
        let proposal = json.find("\"declaration_proposal\"").unwrap();

        assert!(intack < auditor && auditor < proposal);
        assert!(json.contains("\"range_max\":null"));
    }
}
