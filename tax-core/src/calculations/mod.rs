//! Tax calculation modules for the annual business declaration.
//!
//! This module provides the progressive bracket calculation and the
//! declaration calculator that builds the multi-scenario report on top of it.

pub mod common;
pub mod declaration;
pub mod progressive;

pub use declaration::{CalculationError, DeclarationCalculator};
pub use progressive::{ProgressiveTax, ProgressiveTaxResult};
