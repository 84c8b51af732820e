pub mod calculations;
pub mod models;

pub use calculations::{CalculationError, DeclarationCalculator};
pub use models::*;
