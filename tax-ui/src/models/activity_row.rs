use rust_decimal::Decimal;
use tax_core::{Activity, ActivityType};

use crate::utils::parse_number;

/// One editable row of the activity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    /// Unique within the form; never reused while the row exists.
    pub id: u32,
    pub code: String,
    pub name: String,
    pub activity_type: ActivityType,
    pub activity_percentage: String,
    pub non_specialized_percentage: String,
    pub sales: String,
}

/// Text fields of an [`ActivityRow`]. The type is set separately since it
/// is a closed choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Code,
    Name,
    ActivityPercentage,
    NonSpecializedPercentage,
    Sales,
}

impl ActivityRow {
    /// Blank goods row whose code defaults to its id.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            code: id.to_string(),
            name: String::new(),
            activity_type: ActivityType::Goods,
            activity_percentage: String::new(),
            non_specialized_percentage: String::new(),
            sales: String::new(),
        }
    }

    pub fn set(
        &mut self,
        field: ActivityField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match field {
            ActivityField::Code => self.code = value,
            ActivityField::Name => self.name = value,
            ActivityField::ActivityPercentage => self.activity_percentage = value,
            ActivityField::NonSpecializedPercentage => self.non_specialized_percentage = value,
            ActivityField::Sales => self.sales = value,
        }
    }

    /// Normalizes the row into a wire activity.
    ///
    /// Returns `None` for rows that do not count toward the declaration:
    /// a blank name or no positive sales.
    pub fn to_activity(&self) -> Option<Activity> {
        let name = self.name.trim();
        let sales = parse_number(&self.sales);
        if name.is_empty() || sales <= 0 {
            return None;
        }

        Some(Activity {
            code: self.code.clone(),
            name: name.to_string(),
            activity_type: self.activity_type,
            activity_percentage: Decimal::from(parse_number(&self.activity_percentage)),
            non_specialized_percentage: Decimal::from(parse_number(
                &self.non_specialized_percentage,
            )),
            sales,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_row_uses_id_as_code() {
        let row = ActivityRow::new(4);

        assert_eq!(row.code, "4");
        assert_eq!(row.activity_type, ActivityType::Goods);
        assert!(row.name.is_empty());
    }

    #[test]
    fn to_activity_trims_and_normalizes() {
        let mut row = ActivityRow::new(1);
        row.set(ActivityField::Name, "  Retail  ");
        row.set(ActivityField::ActivityPercentage, "15%");
        row.set(ActivityField::Sales, "2,000,000");

        let activity = row.to_activity().unwrap();

        assert_eq!(activity.name, "Retail");
        assert_eq!(activity.activity_percentage, dec!(15));
        assert_eq!(activity.non_specialized_percentage, dec!(0));
        assert_eq!(activity.sales, 2_000_000);
    }

    #[test]
    fn to_activity_skips_blank_name() {
        let mut row = ActivityRow::new(1);
        row.set(ActivityField::Name, "   ");
        row.set(ActivityField::Sales, "100");

        assert_eq!(row.to_activity(), None);
    }

    #[test]
    fn to_activity_skips_rows_without_sales() {
        let mut row = ActivityRow::new(1);
        row.set(ActivityField::Name, "Retail");
        row.set(ActivityField::Sales, "none yet");

        assert_eq!(row.to_activity(), None);
    }
}
