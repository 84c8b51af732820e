use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::models::TaxBracket;

/// Tax rules in force for one (Solar Hijri) tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    /// Sorted by `min_income`, the last bracket open-ended.
    pub tax_brackets: Vec<TaxBracket>,
    /// Exemption ceiling of Article 101, in Rials.
    pub article_101_ceiling: i64,
    /// Taxable income below which the declaration proposal earns its reduction.
    pub small_business_threshold: i64,
}

impl TaxYearConfig {
    /// Rules for tax year 1404 (Article 131 rates).
    pub fn year_1404() -> Self {
        Self {
            tax_year: 1404,
            tax_brackets: vec![
                TaxBracket {
                    min_income: 0,
                    max_income: Some(50_000_000),
                    rate: dec!(0.15),
                },
                TaxBracket {
                    min_income: 50_000_000,
                    max_income: Some(100_000_000),
                    rate: dec!(0.20),
                },
                TaxBracket {
                    min_income: 100_000_000,
                    max_income: None,
                    rate: dec!(0.25),
                },
            ],
            article_101_ceiling: 2_000_000_000,
            small_business_threshold: 2_000_000_000,
        }
    }
}

impl Default for TaxYearConfig {
    fn default() -> Self {
        Self::year_1404()
    }
}
