use std::sync::Arc;

use chrono::{DateTime, Local};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tax_core::{DeclarationReport, TaxBracket, TaxYearConfig, calculations::common::rate_percent};

/// Application state shared across handlers
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Rules applied to every calculation
    pub tax_year: Arc<TaxYearConfig>,
}

impl AppState {
    pub fn new(tax_year: TaxYearConfig) -> Self {
        Self {
            tax_year: Arc::new(tax_year),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxpayerIdentity {
    pub name: String,
    pub id: String,
}

/// Successful calculation
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub status: String,
    pub timestamp: DateTime<Local>,
    pub taxpayer: TaxpayerIdentity,
    pub data: DeclarationReport,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub status: String,
    pub message: String,
}

/// One bracket as published by the regulations endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct BracketRegulation {
    pub min: i64,
    pub max: Option<i64>,
    pub rate: f64,
    pub rate_percent: String,
}

impl From<&TaxBracket> for BracketRegulation {
    fn from(bracket: &TaxBracket) -> Self {
        Self {
            min: bracket.min_income,
            max: bracket.max_income,
            rate: bracket.rate.to_f64().unwrap_or_default(),
            rate_percent: rate_percent(bracket.rate, 0),
        }
    }
}

/// Current tax regulations
#[derive(Debug, Serialize, Deserialize)]
pub struct RegulationsResponse {
    pub year: i32,
    pub tax_brackets: Vec<BracketRegulation>,
    pub article_101_ceiling: i64,
    pub article_101_ceiling_display: String,
}

impl From<&TaxYearConfig> for RegulationsResponse {
    fn from(config: &TaxYearConfig) -> Self {
        Self {
            year: config.tax_year,
            tax_brackets: config.tax_brackets.iter().map(Into::into).collect(),
            article_101_ceiling: config.article_101_ceiling,
            article_101_ceiling_display: display_rials(config.article_101_ceiling),
        }
    }
}

/// Error body. `detail` is a single message or a list of messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: ErrorDetail,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Messages(Vec<String>),
}

/// Short human form of a large Rial amount, e.g. "2 billion Rials".
fn display_rials(amount: i64) -> String {
    const BILLION: i64 = 1_000_000_000;
    const MILLION: i64 = 1_000_000;

    if amount != 0 && amount % BILLION == 0 {
        format!("{} billion Rials", amount / BILLION)
    } else if amount != 0 && amount % MILLION == 0 {
        format!("{} million Rials", amount / MILLION)
    } else {
        format!("{amount} Rials")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_rials_uses_largest_whole_unit() {
        assert_eq!(display_rials(2_000_000_000), "2 billion Rials");
        assert_eq!(display_rials(50_000_000), "50 million Rials");
        assert_eq!(display_rials(1_234), "1234 Rials");
    }

    #[test]
    fn error_detail_accepts_string_or_list() {
        let single: ErrorResponse = serde_json::from_str(r#"{"detail": "boom"}"#).unwrap();
        let many: ErrorResponse = serde_json::from_str(r#"{"detail": ["a", "b"]}"#).unwrap();

        assert_eq!(single.detail, ErrorDetail::Message("boom".to_string()));
        assert_eq!(
            many.detail,
            ErrorDetail::Messages(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn regulations_publish_rate_labels() {
        let regulations = RegulationsResponse::from(&TaxYearConfig::year_1404());

        let labels: Vec<&str> = regulations
            .tax_brackets
            .iter()
            .map(|b| b.rate_percent.as_str())
            .collect();

        assert_eq!(regulations.year, 1404);
        assert_eq!(labels, vec!["15%", "20%", "25%"]);
        assert_eq!(regulations.article_101_ceiling_display, "2 billion Rials");
    }
}
