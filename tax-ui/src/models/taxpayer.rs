use serde::{Deserialize, Serialize};

use crate::utils::text_or_number;

/// Identity section of the declaration form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxpayerInfo {
    #[serde(deserialize_with = "text_or_number")]
    pub taxpayer_name: String,
    #[serde(deserialize_with = "text_or_number")]
    pub taxpayer_id: String,
    /// Free-text amount; normalized on submission.
    #[serde(deserialize_with = "text_or_number")]
    pub previous_year_income: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxpayerField {
    Name,
    Id,
    PreviousYearIncome,
}

impl TaxpayerInfo {
    pub fn set(
        &mut self,
        field: TaxpayerField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            TaxpayerField::Name => self.taxpayer_name = value,
            TaxpayerField::Id => self.taxpayer_id = value,
            TaxpayerField::PreviousYearIncome => self.previous_year_income = value,
        }
    }
}
