//! Client-side view of a calculation response.
//!
//! Only the figures the form renders are modelled; anything else the
//! service sends is ignored, so the client keeps working as the report grows.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalculationResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub data: ResultData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultData {
    pub profit_loss_statement: ProfitFigures,
    pub deductions_and_exemptions: TaxableFigures,
    pub tax_scenarios: ScenarioList,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfitFigures {
    pub gross_profit: i64,
    pub net_profit: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxableFigures {
    pub taxable_income: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioSummary {
    pub method: String,
    pub final_tax: i64,
    #[serde(default)]
    pub reduction_amount: Option<i64>,
}

/// Named scenarios in the order the service listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioList(Vec<(String, ScenarioSummary)>);

impl ScenarioList {
    pub fn new(scenarios: Vec<(String, ScenarioSummary)>) -> Self {
        Self(scenarios)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScenarioSummary)> {
        self.0.iter().map(|(key, scenario)| (key.as_str(), scenario))
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&ScenarioSummary> {
        self.iter().find(|(k, _)| *k == key).map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ScenarioList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedScenarios;

        impl<'de> Visitor<'de> for OrderedScenarios {
            type Value = ScenarioList;

            fn expecting(
                &self,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                f.write_str("a map of scenario name to scenario")
            }

            fn visit_map<A>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scenarios = Vec::with_capacity(map.size_hint().unwrap_or(3));
                while let Some((key, scenario)) = map.next_entry::<String, ScenarioSummary>()? {
                    scenarios.push((key, scenario));
                }
                Ok(ScenarioList(scenarios))
            }
        }

        deserializer.deserialize_map(OrderedScenarios)
    }
}
