mod activity_row;
mod calculation_result;
mod profit_loss;
mod taxpayer;

pub use activity_row::{ActivityField, ActivityRow};
pub use calculation_result::{
    CalculationResult, ProfitFigures, ResultData, ScenarioList, ScenarioSummary, TaxableFigures,
};
pub use profit_loss::{ProfitLossField, ProfitLossForm};
pub use taxpayer::{TaxpayerField, TaxpayerInfo};
