//! User profile record as stored in the user collection.
//!
//! The profile is fetched by an external collaborator and is read-only here.
//! The only derived fact is *completeness*: whether every mandatory contact
//! field has been filled in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adminboard_core::{Entity, UserId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Required fields
// ─────────────────────────────────────────────────────────────────────────────

/// A mandatory profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Address,
    City,
    Company,
    Country,
    PhoneNumber,
    State,
    ZipCode,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::Address,
        ProfileField::City,
        ProfileField::Company,
        ProfileField::Country,
        ProfileField::PhoneNumber,
        ProfileField::State,
        ProfileField::ZipCode,
    ];

    /// Document key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Address => "address",
            ProfileField::City => "city",
            ProfileField::Company => "company",
            ProfileField::Country => "country",
            ProfileField::PhoneNumber => "phoneNumber",
            ProfileField::State => "state",
            ProfileField::ZipCode => "zipCode",
        }
    }
}

impl core::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile
// ─────────────────────────────────────────────────────────────────────────────

/// User profile document.
///
/// # Invariants
/// - Complete iff all seven [`ProfileField`]s are present and not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl UserProfile {
    /// A profile with identity fields only; every required field is missing.
    pub fn new(id: UserId, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: display_name.into(),
            role: None,
            photo_url: None,
            created_at: None,
            address: None,
            city: None,
            company: None,
            country: None,
            phone_number: None,
            state: None,
            zip_code: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set a required field (builder style).
    pub fn with_field(mut self, field: ProfileField, value: impl Into<String>) -> Self {
        *self.field_mut(field) = Some(value.into());
        self
    }

    pub fn field(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::Address => &self.address,
            ProfileField::City => &self.city,
            ProfileField::Company => &self.company,
            ProfileField::Country => &self.country,
            ProfileField::PhoneNumber => &self.phone_number,
            ProfileField::State => &self.state,
            ProfileField::ZipCode => &self.zip_code,
        };
        value.as_deref()
    }

    fn field_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Address => &mut self.address,
            ProfileField::City => &mut self.city,
            ProfileField::Company => &mut self.company,
            ProfileField::Country => &mut self.country,
            ProfileField::PhoneNumber => &mut self.phone_number,
            ProfileField::State => &mut self.state,
            ProfileField::ZipCode => &mut self.zip_code,
        }
    }

    /// Required fields that are absent or blank, in declaration order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl Entity for UserProfile {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_profile() -> UserProfile {
        UserProfile::new(UserId::new(), "alice@example.com", "Alice")
            .with_field(ProfileField::Address, "12 Main St")
            .with_field(ProfileField::City, "Springfield")
            .with_field(ProfileField::Company, "Acme Driving")
            .with_field(ProfileField::Country, "US")
            .with_field(ProfileField::PhoneNumber, "+1 555 0100")
            .with_field(ProfileField::State, "IL")
            .with_field(ProfileField::ZipCode, "62701")
    }

    #[test]
    fn all_fields_present_is_complete() {
        let profile = complete_profile();
        assert!(profile.is_complete());
        assert!(profile.missing_fields().is_empty());
    }

    #[test]
    fn empty_zip_code_is_incomplete() {
        let profile = complete_profile().with_field(ProfileField::ZipCode, "");
        assert!(!profile.is_complete());
        assert_eq!(profile.missing_fields(), vec![ProfileField::ZipCode]);
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let profile = complete_profile().with_field(ProfileField::City, "   ");
        assert_eq!(profile.missing_fields(), vec![ProfileField::City]);
    }

    #[test]
    fn fresh_profile_misses_everything() {
        let profile = UserProfile::new(UserId::new(), "bob@example.com", "Bob");
        assert_eq!(profile.missing_fields(), ProfileField::ALL.to_vec());
    }

    #[test]
    fn deserializes_document_shape() {
        let id = UserId::new();
        let json = serde_json::json!({
            "id": id,
            "email": "carol@example.com",
            "displayName": "Carol",
            "role": "manager",
            "address": "1 Road",
            "city": "Town",
            "company": "Co",
            "country": "FR",
            "phoneNumber": "0102030405",
            "state": "IDF",
            "zipCode": "75001"
        });
        let profile: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.role, Some(Role::MANAGER));
        assert!(profile.is_complete());
    }

    #[test]
    fn missing_keys_deserialize_as_absent() {
        let json = serde_json::json!({ "id": UserId::new(), "city": "Town" });
        let profile: UserProfile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.missing_fields().len(), 6);
    }

    #[test]
    fn identity_survives_field_changes() {
        let before = complete_profile();
        let after = before.clone().with_field(ProfileField::City, "Shelbyville");
        assert_ne!(before, after);
        assert!(before.same_entity(&after));
    }

    #[test]
    fn field_names_match_document_keys() {
        let names: Vec<String> = ProfileField::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            names,
            vec!["address", "city", "company", "country", "phoneNumber", "state", "zipCode"]
        );
    }
}
