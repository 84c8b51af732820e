//! Loads the on-disk fixtures and feeds them through the form.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tax_core::ActivityType;
use tax_ui::{DeclarationForm, csv_loader, form_file::FormFile};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_file_succeeds() {
    let rows = csv_loader::load_from_file(&fixture("activities.csv"))
        .expect("fixture file should load without error");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].activity_type, ActivityType::Services);
    assert_eq!(rows[2].code, "3");
}

#[test]
fn test_fixture_rows_replace_form_activities() {
    let mut form = DeclarationForm::new();
    FormFile::load(&fixture("declaration.toml"))
        .expect("form fixture should load")
        .apply_to(&mut form);

    let rows = csv_loader::load_from_file(&fixture("activities.csv")).unwrap();
    form.replace_activities(rows);

    let request = form.to_request().unwrap();
    let names: Vec<&str> = request.activities.iter().map(|a| a.name.as_str()).collect();
    // The third row has no sales and is left out.
    assert_eq!(names, vec!["Retail", "Repairs"]);
    assert_eq!(request.activities[0].sales, 3_000_000_000);
    assert_eq!(request.profit_loss.admin_expenses, 200_000_000);
}
