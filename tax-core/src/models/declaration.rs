use serde::{Deserialize, Serialize};

use crate::models::{Activity, ProfitLossStatement};

/// Body of a declaration calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRequest {
    pub taxpayer_name: String,
    /// National or economic identifier.
    pub taxpayer_id: String,
    pub activities: Vec<Activity>,
    pub profit_loss: ProfitLossStatement,
    #[serde(default)]
    pub other_deductions: i64,
    #[serde(default)]
    pub previous_year_income: i64,
}

impl DeclarationRequest {
    /// Validates that the request has all required values for calculation.
    ///
    /// Rules:
    /// - taxpayer name is required
    /// - taxpayer identifier is required
    /// - at least one activity is required
    /// - goods sales and administrative expenses cannot be negative
    pub fn validate_for_submit(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.taxpayer_name.trim().is_empty() {
            errors.push("Taxpayer name is required".to_string());
        }

        if self.taxpayer_id.trim().is_empty() {
            errors.push("Taxpayer ID is required".to_string());
        }

        if self.activities.is_empty() {
            errors.push("At least one activity is required".to_string());
        }

        if self.profit_loss.goods_sales < 0 {
            errors.push("Goods sales cannot be negative".to_string());
        }

        if self.profit_loss.admin_expenses < 0 {
            errors.push("Administrative expenses cannot be negative".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
