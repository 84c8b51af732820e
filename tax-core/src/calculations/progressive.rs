//! Progressive (stepped) income tax over a bracket schedule.
//!
//! Each bracket taxes only the slice of income between its lower bound and
//! its upper bound. With the 1404 schedule an income of 75,000,000 Rials is
//! taxed as 50,000,000 at 15% plus 25,000,000 at 20%.
//!
//! # Example
//!
//! ```
//! use tax_core::TaxYearConfig;
//! use tax_core::calculations::ProgressiveTax;
//!
//! let config = TaxYearConfig::year_1404();
//! let result = ProgressiveTax::new(&config.tax_brackets)
//!     .calculate(75_000_000)
//!     .unwrap();
//!
//! assert_eq!(result.total_tax, 12_500_000);
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use crate::calculations::CalculationError;
use crate::calculations::common::{apply_rate, checked_add, checked_sub, rate_percent};
use crate::models::{BracketBreakdown, TaxBracket};

/// Total tax and the per-bracket slices that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveTaxResult {
    pub total_tax: i64,
    pub breakdown: Vec<BracketBreakdown>,
}

/// Calculator over a borrowed bracket schedule.
#[derive(Debug, Clone)]
pub struct ProgressiveTax<'a> {
    tax_brackets: &'a [TaxBracket],
}

impl<'a> ProgressiveTax<'a> {
    /// Brackets must be sorted by `min_income` in ascending order and
    /// contiguous; the last one should have `max_income` as `None`.
    pub fn new(tax_brackets: &'a [TaxBracket]) -> Self {
        Self { tax_brackets }
    }

    /// Calculates the progressive tax on `income`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::NoTaxBrackets`] for an empty schedule and
    /// [`CalculationError::Overflow`] if an amount leaves the `i64` range.
    pub fn calculate(
        &self,
        income: i64,
    ) -> Result<ProgressiveTaxResult, CalculationError> {
        if self.tax_brackets.is_empty() {
            return Err(CalculationError::NoTaxBrackets);
        }

        let mut total_tax = 0;
        let mut breakdown = Vec::new();

        for bracket in self.tax_brackets {
            if income <= bracket.min_income {
                continue;
            }

            let upper = bracket
                .max_income
                .map_or(income, |max_income| income.min(max_income));
            let income_in_bracket = checked_sub(upper, bracket.min_income, "income in bracket")?;
            if income_in_bracket <= 0 {
                continue;
            }

            let tax = apply_rate(income_in_bracket, bracket.rate)?;
            total_tax = checked_add(total_tax, tax, "total tax")?;

            breakdown.push(BracketBreakdown {
                range_min: bracket.min_income,
                range_max: bracket.max_income,
                income_in_bracket,
                rate: bracket.rate,
                rate_percent: rate_percent(bracket.rate, 0),
                tax,
            });
        }

        Ok(ProgressiveTaxResult {
            total_tax,
            breakdown,
        })
    }
}
