//! Per-render data context
//!
//! A [`DataContext`] is assembled fresh for every generation request from the
//! caller's current records, is read-only during the render, and is discarded
//! afterwards. No field values are cached between renders.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date format used for System values
const DATE_FORMAT: &str = "%d/%m/%Y";

/// The person being documented
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subject {
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The time-bounded activity being attested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Engagement {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub duration_weeks: Option<String>,
    pub weekly_hours: Option<String>,
    pub location: Option<String>,
    pub topic: Option<String>,
    pub supervisor_name: Option<String>,
    pub supervisor_role: Option<String>,
}

/// The host organization the subject engages with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Counterparty {
    pub name: Option<String>,
    pub legal_form: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub representative: Option<String>,
    pub representative_role: Option<String>,
    pub registration: Option<String>,
}

/// The issuing entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    pub name: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub director: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Per-render system values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct System {
    /// The generation date
    pub generated_date: Option<String>,
    /// One year after the generation date
    pub valid_until: Option<String>,
}

impl System {
    /// Build system values from an explicit generation date
    pub fn from_date(date: NaiveDate) -> Self {
        let valid_until = date.checked_add_months(Months::new(12)).unwrap_or(date);
        Self {
            generated_date: Some(date.format(DATE_FORMAT).to_string()),
            valid_until: Some(valid_until.format(DATE_FORMAT).to_string()),
        }
    }

    /// Build system values from the local clock
    pub fn now() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }
}

/// The read-only bundle of live field values for one render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataContext {
    pub subject: Subject,
    pub engagement: Engagement,
    pub counterparty: Counterparty,
    pub organization: Organization,
    pub system: System,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_system_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let system = System::from_date(date);
        assert_eq!(system.generated_date.as_deref(), Some("15/03/2026"));
        assert_eq!(system.valid_until.as_deref(), Some("15/03/2027"));
    }

    #[test]
    fn test_system_from_date_leap_day() {
        let date = NaiveDate::from_ymd_opt(2028, 2, 29).unwrap();
        let system = System::from_date(date);
        assert_eq!(system.generated_date.as_deref(), Some("29/02/2028"));
        // 2029 has no Feb 29; chrono clamps to the end of the month
        assert_eq!(system.valid_until.as_deref(), Some("28/02/2029"));
    }

    #[test]
    fn test_context_deserializes_from_partial_json() {
        let json = r#"{
            "subject": { "firstName": "Alice", "lastName": "Martin" },
            "counterparty": { "name": "Acme" }
        }"#;

        let ctx: DataContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.subject.first_name.as_deref(), Some("Alice"));
        assert_eq!(ctx.counterparty.name.as_deref(), Some("Acme"));
        assert_eq!(ctx.organization, Organization::default());
        assert_eq!(ctx.system, System::default());
    }
}
