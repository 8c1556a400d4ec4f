//! Wire models for the reporting API.
//!
//! Field names on the wire are camelCase. List endpoints wrap their payload
//! in a `results` array; when the key is missing the list decodes as empty
//! rather than failing.

use serde::{Deserialize, Serialize};

/// Envelope returned by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Person reference as embedded in user records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub uuid: String,
    #[serde(default)]
    pub display: String,
}

/// Role reference as embedded in user records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub uuid: String,
    #[serde(default)]
    pub display: String,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uuid: String,
    #[serde(default)]
    pub username: String,
    pub person: PersonRef,
    #[serde(default)]
    pub roles: Vec<RoleRef>,
    #[serde(default)]
    pub system_id: Option<String>,
}

/// An assignable role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub uuid: String,
    #[serde(alias = "display")]
    pub name: String,
}

/// An organisation unit (facility, district, region).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnit {
    pub uuid: String,
    #[serde(alias = "display")]
    pub name: String,
    #[serde(default)]
    pub level: Option<u32>,
}

/// A reporting form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportForm {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub period_type: Option<String>,
}

/// A reporting period. The API has no period endpoint; these are generated
/// client side from the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Compact identifier, e.g. "202508".
    pub id: String,
    /// Human-readable label, e.g. "August 2025".
    pub name: String,
}

/// One name entry on a person payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonName {
    pub given_name: String,
    pub family_name: String,
}

/// Payload for creating a person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub names: Vec<PersonName>,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
}

/// Response envelope for a created person.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPerson {
    pub uuid: String,
    #[serde(default)]
    pub display: String,
}

/// Payload for creating a user account. `person` must reference an existing
/// person record; the create effect chains the two calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub person: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Payload for creating a reporting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_type: Option<String>,
}

/// Everything the add-user dialog collects. The create effect splits this
/// into the person payload and the account payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub person: NewPerson,
    pub username: String,
    pub password: String,
    /// Uuids of the roles ticked in the dialog.
    pub roles: Vec<String>,
}
