mod activity;
mod declaration;
mod profit_loss;
mod report;
mod tax_bracket;
mod tax_year_config;

pub use activity::{Activity, ActivityType, UnknownActivityType};
pub use declaration::DeclarationRequest;
pub use profit_loss::ProfitLossStatement;
pub use report::{
    BracketBreakdown, DeclarationReport, DeductionsAndExemptions, ProfitLossSummary, ScenarioKind,
    TaxScenario, TaxScenarios,
};
pub use tax_bracket::TaxBracket;
pub use tax_year_config::TaxYearConfig;
