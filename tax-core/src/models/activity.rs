use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a string is not one of the known activity type codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown activity type '{0}'")]
pub struct UnknownActivityType(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Goods,
    Services,
    Industrial,
    Agricultural,
}

impl ActivityType {
    /// Types offered by the declaration form's activity table.
    pub const FORM_OPTIONS: [ActivityType; 3] = [Self::Goods, Self::Services, Self::Industrial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goods => "goods",
            Self::Services => "services",
            Self::Industrial => "industrial",
            Self::Agricultural => "agricultural",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Goods => "Goods",
            Self::Services => "Services",
            Self::Industrial => "Industrial",
            Self::Agricultural => "Agricultural",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = UnknownActivityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goods" => Ok(Self::Goods),
            "services" => Ok(Self::Services),
            "industrial" => Ok(Self::Industrial),
            "agricultural" => Ok(Self::Agricultural),
            _ => Err(UnknownActivityType(s.to_string())),
        }
    }
}

/// One declared line of business activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub activity_type: ActivityType,
    #[serde(with = "rust_decimal::serde::float")]
    pub activity_percentage: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub non_specialized_percentage: Decimal,
    /// Sales in Rials.
    pub sales: i64,
}
