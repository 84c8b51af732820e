pub mod client;
pub mod csv_loader;
pub mod form;
pub mod form_file;
pub mod logging;
pub mod models;
pub mod render;
pub mod utils;

pub use client::{CalculationService, HttpCalculationClient, ServiceError};
pub use form::{DeclarationForm, FormError, SubmitError};
pub use render::{FormView, ResultView};
