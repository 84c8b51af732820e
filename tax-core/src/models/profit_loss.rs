use serde::{Deserialize, Serialize};

/// Profit and loss figures for the declaration year, all in Rials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitLossStatement {
    pub goods_sales: i64,
    pub service_sales: i64,
    /// Cost of goods sold.
    pub goods_cogs: i64,
    pub service_cogs: i64,
    /// General and administrative expenses.
    pub admin_expenses: i64,
}
