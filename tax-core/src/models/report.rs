use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Activity;

/// The alternative computation methods offered for a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    IntackBased,
    AuditorIdeal,
    DeclarationProposal,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        Self::IntackBased,
        Self::AuditorIdeal,
        Self::DeclarationProposal,
    ];

    /// Key used in the `tax_scenarios` object of the report.
    pub fn key(&self) -> &'static str {
        match self {
            Self::IntackBased => "intack_based",
            Self::AuditorIdeal => "auditor_ideal",
            Self::DeclarationProposal => "declaration_proposal",
        }
    }

    pub fn method_label(&self) -> &'static str {
        match self {
            Self::IntackBased => "Activity profit ratio (Intack)",
            Self::AuditorIdeal => "Auditor's ideal",
            Self::DeclarationProposal => "Declaration proposal",
        }
    }
}

/// Tax due on the slice of income falling inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub range_min: i64,
    pub range_max: Option<i64>,
    pub income_in_bracket: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    pub rate_percent: String,
    pub tax: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLossSummary {
    pub goods_sales: i64,
    pub service_sales: i64,
    pub goods_cogs: i64,
    pub service_cogs: i64,
    pub gross_profit: i64,
    pub admin_expenses: i64,
    pub net_profit: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsAndExemptions {
    pub net_profit: i64,
    pub article_101_ceiling: i64,
    pub article_101_deduction: i64,
    pub other_deductions: i64,
    pub taxable_income: i64,
}

/// Result of one scenario. Fields that a method does not use are omitted
/// from the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxScenario {
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxable_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjusted_income: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_percent: Option<u32>,
    pub base_tax: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub reduction_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_rate_percent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_amount: Option<i64>,
    pub final_tax: i64,
    pub breakdown: Vec<BracketBreakdown>,
}

/// The three scenarios in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxScenarios {
    pub intack_based: TaxScenario,
    pub auditor_ideal: TaxScenario,
    pub declaration_proposal: TaxScenario,
}

impl TaxScenarios {
    pub fn get(
        &self,
        kind: ScenarioKind,
    ) -> &TaxScenario {
        match kind {
            ScenarioKind::IntackBased => &self.intack_based,
            ScenarioKind::AuditorIdeal => &self.auditor_ideal,
            ScenarioKind::DeclarationProposal => &self.declaration_proposal,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScenarioKind, &TaxScenario)> {
        ScenarioKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// Complete declaration report produced by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationReport {
    pub activities: Vec<Activity>,
    pub profit_loss_statement: ProfitLossSummary,
    pub deductions_and_exemptions: DeductionsAndExemptions,
    pub tax_scenarios: TaxScenarios,
}
