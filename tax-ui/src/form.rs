//! Headless declaration form.
//!
//! [`DeclarationForm`] owns everything the user has typed, the last
//! calculation result and the last error. Front ends call the `set_*`
//! handlers as input changes and [`DeclarationForm::submit`] to calculate.

use tax_core::{ActivityType, DeclarationRequest};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    client::{CalculationService, ServiceError},
    models::{
        ActivityField, ActivityRow, CalculationResult, ProfitLossField, ProfitLossForm,
        TaxpayerField, TaxpayerInfo,
    },
    utils::parse_number,
};

/// Input problems caught before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Taxpayer name is required")]
    MissingName,
    #[error("Taxpayer ID is required")]
    MissingId,
    #[error("Enter at least one valid activity")]
    NoValidActivities,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] FormError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationForm {
    taxpayer: TaxpayerInfo,
    activities: Vec<ActivityRow>,
    profit_loss: ProfitLossForm,
    other_deductions: String,
    result: Option<CalculationResult>,
    error: Option<String>,
    loading: bool,
}

impl Default for DeclarationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationForm {
    /// Empty form with a single blank activity row.
    pub fn new() -> Self {
        Self {
            taxpayer: TaxpayerInfo::default(),
            activities: vec![ActivityRow::new(1)],
            profit_loss: ProfitLossForm::default(),
            other_deductions: String::new(),
            result: None,
            error: None,
            loading: false,
        }
    }

    pub fn taxpayer(&self) -> &TaxpayerInfo {
        &self.taxpayer
    }

    pub fn activities(&self) -> &[ActivityRow] {
        &self.activities
    }

    pub fn profit_loss(&self) -> &ProfitLossForm {
        &self.profit_loss
    }

    pub fn other_deductions(&self) -> &str {
        &self.other_deductions
    }

    /// The last successful calculation, if the last submission succeeded.
    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// Message from the last failed submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_taxpayer_field(
        &mut self,
        field: TaxpayerField,
        value: impl Into<String>,
    ) {
        self.taxpayer.set(field, value);
    }

    /// Updates one text field of the row with `id`. Returns `false` when no
    /// such row exists.
    pub fn set_activity_field(
        &mut self,
        id: u32,
        field: ActivityField,
        value: impl Into<String>,
    ) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn set_activity_type(
        &mut self,
        id: u32,
        activity_type: ActivityType,
    ) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.activity_type = activity_type;
                true
            }
            None => false,
        }
    }

    /// Appends a blank row and returns its id (one past the largest id in
    /// use).
    pub fn add_activity(&mut self) -> u32 {
        let id = self.activities.iter().map(|row| row.id).max().unwrap_or(0) + 1;
        self.activities.push(ActivityRow::new(id));
        id
    }

    /// Removes the row with `id`. The last remaining row is never removed.
    pub fn remove_activity(
        &mut self,
        id: u32,
    ) -> bool {
        if self.activities.len() <= 1 {
            return false;
        }
        let before = self.activities.len();
        self.activities.retain(|row| row.id != id);
        self.activities.len() != before
    }

    /// Replaces every activity row, renumbering ids from 1 in the given
    /// order. An empty list leaves one blank row.
    pub fn replace_activities(
        &mut self,
        rows: Vec<ActivityRow>,
    ) {
        if rows.is_empty() {
            self.activities = vec![ActivityRow::new(1)];
            return;
        }
        self.activities = rows
            .into_iter()
            .zip(1..)
            .map(|(row, id)| ActivityRow { id, ..row })
            .collect();
    }

    pub fn set_profit_loss_field(
        &mut self,
        field: ProfitLossField,
        value: impl Into<String>,
    ) {
        self.profit_loss.set(field, value);
    }

    pub fn set_other_deductions(
        &mut self,
        value: impl Into<String>,
    ) {
        self.other_deductions = value.into();
    }

    /// Builds the wire request from the current input.
    ///
    /// Rows without a name or without positive sales are dropped. Checks run
    /// in order and stop at the first failure.
    pub fn to_request(&self) -> Result<DeclarationRequest, FormError> {
        let taxpayer_name = self.taxpayer.taxpayer_name.trim();
        let taxpayer_id = self.taxpayer.taxpayer_id.trim();
        let activities: Vec<_> = self.activities.iter().filter_map(ActivityRow::to_activity).collect();

        if taxpayer_name.is_empty() {
            return Err(FormError::MissingName);
        }
        if taxpayer_id.is_empty() {
            return Err(FormError::MissingId);
        }
        if activities.is_empty() {
            return Err(FormError::NoValidActivities);
        }

        Ok(DeclarationRequest {
            taxpayer_name: taxpayer_name.to_string(),
            taxpayer_id: taxpayer_id.to_string(),
            activities,
            profit_loss: self.profit_loss.to_statement(),
            other_deductions: parse_number(&self.other_deductions),
            previous_year_income: parse_number(&self.taxpayer.previous_year_income),
        })
    }

    /// Validates the form and sends it to `service`.
    ///
    /// The previous result and error are cleared first. On success the
    /// result is stored and returned; on failure the message is stored in
    /// [`error`](Self::error). Validation failures never reach the service.
    pub async fn submit<S>(
        &mut self,
        service: &S,
    ) -> Result<&CalculationResult, SubmitError>
    where
        S: CalculationService + ?Sized,
    {
        self.error = None;
        self.result = None;
        self.loading = true;

        let outcome = self.send(service).await;
        self.loading = false;

        match outcome {
            Ok(result) => {
                info!(
                    scenarios = result.data.tax_scenarios.len(),
                    "declaration calculated"
                );
                Ok(self.result.insert(result))
            }
            Err(e) => {
                warn!(error = %e, "declaration submission failed");
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn send<S>(
        &self,
        service: &S,
    ) -> Result<CalculationResult, SubmitError>
    where
        S: CalculationService + ?Sized,
    {
        let request = self.to_request()?;
        info!(
            taxpayer_id = %request.taxpayer_id,
            activities = request.activities.len(),
            "submitting declaration"
        );
        Ok(service.calculate(&request).await?)
    }

    fn row_mut(
        &mut self,
        id: u32,
    ) -> Option<&mut ActivityRow> {
        self.activities.iter_mut().find(|row| row.id == id)
    }
}
