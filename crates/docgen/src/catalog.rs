//! Tag catalog - the fixed mapping from field identifiers to tokens
//!
//! Template authors write tokens like `<lastName>` in raw region text, or
//! bind a region directly to a field identifier. The catalog is part of the
//! engine's public contract and is versioned with it, not with any template:
//! adding a field means adding a variant here, and the compiler points at
//! every match that needs extending.

use crate::context::DataContext;
use serde::{Deserialize, Serialize};

/// The five field groups of a [`DataContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Subject,
    Engagement,
    Counterparty,
    Organization,
    System,
}

/// Every resolvable field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // Subject - the person being documented
    Title,
    FirstName,
    LastName,
    BirthDate,
    BirthPlace,
    Address,
    PostalCode,
    City,
    Email,
    Phone,

    // Engagement - the time-bounded activity
    StartDate,
    EndDate,
    DurationWeeks,
    WeeklyHours,
    EngagementLocation,
    EngagementTopic,
    SupervisorName,
    SupervisorRole,

    // Counterparty - the host organization
    CompanyName,
    CompanyLegalForm,
    CompanyAddress,
    CompanyPostalCode,
    CompanyCity,
    CompanyRepresentative,
    CompanyRepresentativeRole,
    CompanyRegistration,

    // Organization - the issuing entity
    OrganizationName,
    OrganizationAddress,
    OrganizationPostalCode,
    OrganizationCity,
    OrganizationDirector,
    OrganizationPhone,
    OrganizationEmail,

    // System - per-render values
    GeneratedDate,
    ValidUntil,
}

impl Field {
    /// Every catalog field, in a stable order
    pub const ALL: [Field; 35] = [
        Field::Title,
        Field::FirstName,
        Field::LastName,
        Field::BirthDate,
        Field::BirthPlace,
        Field::Address,
        Field::PostalCode,
        Field::City,
        Field::Email,
        Field::Phone,
        Field::StartDate,
        Field::EndDate,
        Field::DurationWeeks,
        Field::WeeklyHours,
        Field::EngagementLocation,
        Field::EngagementTopic,
        Field::SupervisorName,
        Field::SupervisorRole,
        Field::CompanyName,
        Field::CompanyLegalForm,
        Field::CompanyAddress,
        Field::CompanyPostalCode,
        Field::CompanyCity,
        Field::CompanyRepresentative,
        Field::CompanyRepresentativeRole,
        Field::CompanyRegistration,
        Field::OrganizationName,
        Field::OrganizationAddress,
        Field::OrganizationPostalCode,
        Field::OrganizationCity,
        Field::OrganizationDirector,
        Field::OrganizationPhone,
        Field::OrganizationEmail,
        Field::GeneratedDate,
        Field::ValidUntil,
    ];

    /// Canonical identifier, as written inside a token
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::BirthDate => "birthDate",
            Field::BirthPlace => "birthPlace",
            Field::Address => "address",
            Field::PostalCode => "postalCode",
            Field::City => "city",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::StartDate => "startDate",
            Field::EndDate => "endDate",
            Field::DurationWeeks => "durationWeeks",
            Field::WeeklyHours => "weeklyHours",
            Field::EngagementLocation => "engagementLocation",
            Field::EngagementTopic => "engagementTopic",
            Field::SupervisorName => "supervisorName",
            Field::SupervisorRole => "supervisorRole",
            Field::CompanyName => "companyName",
            Field::CompanyLegalForm => "companyLegalForm",
            Field::CompanyAddress => "companyAddress",
            Field::CompanyPostalCode => "companyPostalCode",
            Field::CompanyCity => "companyCity",
            Field::CompanyRepresentative => "companyRepresentative",
            Field::CompanyRepresentativeRole => "companyRepresentativeRole",
            Field::CompanyRegistration => "companyRegistration",
            Field::OrganizationName => "organizationName",
            Field::OrganizationAddress => "organizationAddress",
            Field::OrganizationPostalCode => "organizationPostalCode",
            Field::OrganizationCity => "organizationCity",
            Field::OrganizationDirector => "organizationDirector",
            Field::OrganizationPhone => "organizationPhone",
            Field::OrganizationEmail => "organizationEmail",
            Field::GeneratedDate => "generatedDate",
            Field::ValidUntil => "validUntil",
        }
    }

    /// The canonical placeholder token for this field, e.g. `<lastName>`
    pub fn token(&self) -> String {
        format!("<{}>", self.name())
    }

    /// Human-readable field name, used in "not available" placeholders
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::BirthDate => "Birth date",
            Field::BirthPlace => "Birth place",
            Field::Address => "Address",
            Field::PostalCode => "Postal code",
            Field::City => "City",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::StartDate => "Start date",
            Field::EndDate => "End date",
            Field::DurationWeeks => "Duration in weeks",
            Field::WeeklyHours => "Weekly hours",
            Field::EngagementLocation => "Engagement location",
            Field::EngagementTopic => "Engagement topic",
            Field::SupervisorName => "Supervisor name",
            Field::SupervisorRole => "Supervisor role",
            Field::CompanyName => "Company name",
            Field::CompanyLegalForm => "Company legal form",
            Field::CompanyAddress => "Company address",
            Field::CompanyPostalCode => "Company postal code",
            Field::CompanyCity => "Company city",
            Field::CompanyRepresentative => "Company representative",
            Field::CompanyRepresentativeRole => "Company representative role",
            Field::CompanyRegistration => "Company registration number",
            Field::OrganizationName => "Organization name",
            Field::OrganizationAddress => "Organization address",
            Field::OrganizationPostalCode => "Organization postal code",
            Field::OrganizationCity => "Organization city",
            Field::OrganizationDirector => "Organization director",
            Field::OrganizationPhone => "Organization phone",
            Field::OrganizationEmail => "Organization email",
            Field::GeneratedDate => "Generation date",
            Field::ValidUntil => "Valid until",
        }
    }

    /// The group this field belongs to
    pub fn group(&self) -> FieldGroup {
        match self {
            Field::Title
            | Field::FirstName
            | Field::LastName
            | Field::BirthDate
            | Field::BirthPlace
            | Field::Address
            | Field::PostalCode
            | Field::City
            | Field::Email
            | Field::Phone => FieldGroup::Subject,

            Field::StartDate
            | Field::EndDate
            | Field::DurationWeeks
            | Field::WeeklyHours
            | Field::EngagementLocation
            | Field::EngagementTopic
            | Field::SupervisorName
            | Field::SupervisorRole => FieldGroup::Engagement,

            Field::CompanyName
            | Field::CompanyLegalForm
            | Field::CompanyAddress
            | Field::CompanyPostalCode
            | Field::CompanyCity
            | Field::CompanyRepresentative
            | Field::CompanyRepresentativeRole
            | Field::CompanyRegistration => FieldGroup::Counterparty,

            Field::OrganizationName
            | Field::OrganizationAddress
            | Field::OrganizationPostalCode
            | Field::OrganizationCity
            | Field::OrganizationDirector
            | Field::OrganizationPhone
            | Field::OrganizationEmail => FieldGroup::Organization,

            Field::GeneratedDate | Field::ValidUntil => FieldGroup::System,
        }
    }

    /// Look up a field by its canonical identifier
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    /// The field's value in a context, if present
    pub fn value<'a>(&self, ctx: &'a DataContext) -> Option<&'a str> {
        let value = match self {
            Field::Title => &ctx.subject.title,
            Field::FirstName => &ctx.subject.first_name,
            Field::LastName => &ctx.subject.last_name,
            Field::BirthDate => &ctx.subject.birth_date,
            Field::BirthPlace => &ctx.subject.birth_place,
            Field::Address => &ctx.subject.address,
            Field::PostalCode => &ctx.subject.postal_code,
            Field::City => &ctx.subject.city,
            Field::Email => &ctx.subject.email,
            Field::Phone => &ctx.subject.phone,
            Field::StartDate => &ctx.engagement.start_date,
            Field::EndDate => &ctx.engagement.end_date,
            Field::DurationWeeks => &ctx.engagement.duration_weeks,
            Field::WeeklyHours => &ctx.engagement.weekly_hours,
            Field::EngagementLocation => &ctx.engagement.location,
            Field::EngagementTopic => &ctx.engagement.topic,
            Field::SupervisorName => &ctx.engagement.supervisor_name,
            Field::SupervisorRole => &ctx.engagement.supervisor_role,
            Field::CompanyName => &ctx.counterparty.name,
            Field::CompanyLegalForm => &ctx.counterparty.legal_form,
            Field::CompanyAddress => &ctx.counterparty.address,
            Field::CompanyPostalCode => &ctx.counterparty.postal_code,
            Field::CompanyCity => &ctx.counterparty.city,
            Field::CompanyRepresentative => &ctx.counterparty.representative,
            Field::CompanyRepresentativeRole => &ctx.counterparty.representative_role,
            Field::CompanyRegistration => &ctx.counterparty.registration,
            Field::OrganizationName => &ctx.organization.name,
            Field::OrganizationAddress => &ctx.organization.address,
            Field::OrganizationPostalCode => &ctx.organization.postal_code,
            Field::OrganizationCity => &ctx.organization.city,
            Field::OrganizationDirector => &ctx.organization.director,
            Field::OrganizationPhone => &ctx.organization.phone,
            Field::OrganizationEmail => &ctx.organization.email,
            Field::GeneratedDate => &ctx.system.generated_date,
            Field::ValidUntil => &ctx.system.valid_until,
        };
        value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokens_are_unique() {
        let mut names: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Field::ALL.len());
    }

    #[test]
    fn test_from_name_roundtrip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("nonexistent"), None);
    }

    #[test]
    fn test_token_format() {
        assert_eq!(Field::LastName.token(), "<lastName>");
        assert_eq!(Field::CompanyName.token(), "<companyName>");
    }

    #[test]
    fn test_serde_uses_canonical_names() {
        let json = serde_json::to_string(&Field::CompanyRepresentativeRole).unwrap();
        assert_eq!(json, "\"companyRepresentativeRole\"");

        let field: Field = serde_json::from_str("\"lastName\"").unwrap();
        assert_eq!(field, Field::LastName);
    }

    #[test]
    fn test_serde_names_match_name_method() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }

    #[test]
    fn test_group_counts() {
        let count = |g: FieldGroup| Field::ALL.iter().filter(|f| f.group() == g).count();
        assert_eq!(count(FieldGroup::Subject), 10);
        assert_eq!(count(FieldGroup::Engagement), 8);
        assert_eq!(count(FieldGroup::Counterparty), 8);
        assert_eq!(count(FieldGroup::Organization), 7);
        assert_eq!(count(FieldGroup::System), 2);
    }

    #[test]
    fn test_value_lookup() {
        let mut ctx = DataContext::default();
        ctx.subject.last_name = Some("Martin".to_string());
        ctx.counterparty.name = Some("Acme".to_string());

        assert_eq!(Field::LastName.value(&ctx), Some("Martin"));
        assert_eq!(Field::CompanyName.value(&ctx), Some("Acme"));
        assert_eq!(Field::FirstName.value(&ctx), None);
    }
}
