use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One step of the progressive income tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: i64,
    /// `None` for the open-ended top bracket.
    pub max_income: Option<i64>,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
}
