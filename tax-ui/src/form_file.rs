//! Declaration forms stored as TOML.
//!
//! ```toml
//! other_deductions = "0"
//!
//! [taxpayer]
//! taxpayer_name = "Ahmad Mohammadi"
//! taxpayer_id = "14001234567"
//! previous_year_income = "250,000,000"
//!
//! [[activities]]
//! name = "Retail"
//! activity_type = "goods"
//! activity_percentage = 15
//! sales = "3,000,000,000"
//!
//! [profit_loss]
//! goods_sales = 3000000000
//! goods_cogs = 500000000
//! admin_expenses = 200000000
//! ```
//!
//! Every section is optional. Amounts may be written as numbers or as the
//! same free text the form accepts. Top-level keys must come before the
//! first table.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::ActivityType;
use thiserror::Error;
use tracing::debug;

use crate::{
    form::DeclarationForm,
    models::{ActivityField, ProfitLossField, ProfitLossForm, TaxpayerField, TaxpayerInfo},
    utils::text_or_number,
};

#[derive(Debug, Error)]
pub enum FormFileError {
    #[error("cannot read form file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormFile {
    pub taxpayer: TaxpayerInfo,
    pub activities: Vec<ActivityEntry>,
    pub profit_loss: ProfitLossForm,
    #[serde(deserialize_with = "text_or_number")]
    pub other_deductions: String,
}

/// One `[[activities]]` table. Without a `code` the row keeps the code the
/// form assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivityEntry {
    pub code: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    pub name: String,
    pub activity_type: ActivityType,
    #[serde(deserialize_with = "text_or_number")]
    pub activity_percentage: String,
    #[serde(deserialize_with = "text_or_number")]
    pub non_specialized_percentage: String,
    #[serde(deserialize_with = "text_or_number")]
    pub sales: String,
}

impl std::str::FromStr for FormFile {
    type Err = FormFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl FormFile {
    pub fn load(path: &Path) -> Result<Self, FormFileError> {
        let contents = std::fs::read_to_string(path).map_err(|source| FormFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded form file");
        contents.parse()
    }

    /// Enters the file's values into `form` through its handlers, the same
    /// way a user would type them. The first entry fills the form's existing
    /// row; further entries add rows.
    pub fn apply_to(
        &self,
        form: &mut DeclarationForm,
    ) {
        form.set_taxpayer_field(TaxpayerField::Name, self.taxpayer.taxpayer_name.as_str());
        form.set_taxpayer_field(TaxpayerField::Id, self.taxpayer.taxpayer_id.as_str());
        form.set_taxpayer_field(
            TaxpayerField::PreviousYearIncome,
            self.taxpayer.previous_year_income.as_str(),
        );

        let first_row = form.activities().first().map(|row| row.id);
        for (index, entry) in self.activities.iter().enumerate() {
            let id = match (index, first_row) {
                (0, Some(id)) => id,
                _ => form.add_activity(),
            };
            if let Some(code) = &entry.code {
                form.set_activity_field(id, ActivityField::Code, code.as_str());
            }
            form.set_activity_field(id, ActivityField::Name, entry.name.as_str());
            form.set_activity_type(id, entry.activity_type);
            form.set_activity_field(
                id,
                ActivityField::ActivityPercentage,
                entry.activity_percentage.as_str(),
            );
            form.set_activity_field(
                id,
                ActivityField::NonSpecializedPercentage,
                entry.non_specialized_percentage.as_str(),
            );
            form.set_activity_field(id, ActivityField::Sales, entry.sales.as_str());
        }

        let pl = &self.profit_loss;
        for (field, value) in [
            (ProfitLossField::GoodsSales, &pl.goods_sales),
            (ProfitLossField::ServiceSales, &pl.service_sales),
            (ProfitLossField::GoodsCogs, &pl.goods_cogs),
            (ProfitLossField::ServiceCogs, &pl.service_cogs),
            (ProfitLossField::AdminExpenses, &pl.admin_expenses),
        ] {
            form.set_profit_loss_field(field, value.as_str());
        }
        form.set_other_deductions(self.other_deductions.as_str());
    }
}
