//! Plain-text rendering of the form outcome.

use std::fmt;

use crate::{
    form::DeclarationForm,
    models::{CalculationResult, ScenarioSummary},
    utils::format_currency,
};

/// Displays whatever the form currently has to show: the error banner, a
/// loading line, or the calculation result.
pub struct FormView<'a>(pub &'a DeclarationForm);

/// Displays a calculation summary followed by one card per scenario.
pub struct ResultView<'a>(pub &'a CalculationResult);

struct ScenarioCard<'a>(&'a ScenarioSummary);

impl fmt::Display for FormView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let form = self.0;
        if let Some(error) = form.error() {
            writeln!(f, "Error: {error}")?;
        }
        if form.is_loading() {
            writeln!(f, "Calculating...")?;
        }
        if let Some(result) = form.result() {
            write!(f, "{}", ResultView(result))?;
        }
        Ok(())
    }
}

impl fmt::Display for ResultView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let data = &self.0.data;
        writeln!(f, "Calculation results")?;
        writeln!(
            f,
            "  {:<16}{}",
            "Gross profit:",
            format_currency(data.profit_loss_statement.gross_profit)
        )?;
        writeln!(
            f,
            "  {:<16}{}",
            "Net profit:",
            format_currency(data.profit_loss_statement.net_profit)
        )?;
        writeln!(
            f,
            "  {:<16}{}",
            "Taxable income:",
            format_currency(data.deductions_and_exemptions.taxable_income)
        )?;

        for (_, scenario) in data.tax_scenarios.iter() {
            writeln!(f)?;
            write!(f, "{}", ScenarioCard(scenario))?;
        }
        Ok(())
    }
}

impl fmt::Display for ScenarioCard<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let scenario = self.0;
        writeln!(f, "[{}]", scenario.method)?;
        writeln!(f, "  {:<12}{}", "Tax:", format_currency(scenario.final_tax))?;
        if let Some(reduction) = scenario.reduction_amount.filter(|amount| *amount > 0) {
            writeln!(f, "  {:<12}{}", "Reduction:", format_currency(reduction))?;
        }
        Ok(())
    }
}
