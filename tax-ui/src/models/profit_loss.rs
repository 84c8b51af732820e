use serde::{Deserialize, Serialize};
use tax_core::ProfitLossStatement;

use crate::utils::{parse_number, text_or_number};

/// Profit and loss section of the form. Every field is free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitLossForm {
    #[serde(deserialize_with = "text_or_number")]
    pub goods_sales: String,
    #[serde(deserialize_with = "text_or_number")]
    pub service_sales: String,
    #[serde(deserialize_with = "text_or_number")]
    pub goods_cogs: String,
    #[serde(deserialize_with = "text_or_number")]
    pub service_cogs: String,
    #[serde(deserialize_with = "text_or_number")]
    pub admin_expenses: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitLossField {
    GoodsSales,
    ServiceSales,
    GoodsCogs,
    ServiceCogs,
    AdminExpenses,
}

impl ProfitLossForm {
    pub fn set(
        &mut self,
        field: ProfitLossField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            ProfitLossField::GoodsSales => self.goods_sales = value,
            ProfitLossField::ServiceSales => self.service_sales = value,
            ProfitLossField::GoodsCogs => self.goods_cogs = value,
            ProfitLossField::ServiceCogs => self.service_cogs = value,
            ProfitLossField::AdminExpenses => self.admin_expenses = value,
        }
    }

    /// Normalizes every field into the wire statement.
    pub fn to_statement(&self) -> ProfitLossStatement {
        ProfitLossStatement {
            goods_sales: parse_number(&self.goods_sales),
            service_sales: parse_number(&self.service_sales),
            goods_cogs: parse_number(&self.goods_cogs),
            service_cogs: parse_number(&self.service_cogs),
            admin_expenses: parse_number(&self.admin_expenses),
        }
    }
}
