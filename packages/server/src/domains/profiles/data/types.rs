//! Request/response types for registration, login and profiles.
//!
//! Request bodies deserialize into permissive option-typed inputs and are
//! validated into commands explicitly, so missing fields surface as 400s
//! with field-level messages. The typed patch structs double as the field
//! allow-list: unknown keys are dropped during deserialization and the
//! inbound body is never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::super::models::profile::ProfileRecord;
use crate::common::auth::Role;
use crate::common::{ApiError, ApiResult, UserId};

// ============================================================================
// Registration / login
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegistrationInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub repeated_password: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
}

/// Validated registration command.
#[derive(Debug)]
pub struct RegistrationCommand {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegistrationInput {
    pub fn into_command(self) -> ApiResult<RegistrationCommand> {
        let username = require_text(self.username, "username")?;
        let email = require_text(self.email, "email")?;
        let password = require_text(self.password, "password")?;
        let repeated_password = require_text(self.repeated_password, "repeated_password")?;

        if password != repeated_password {
            return Err(ApiError::validation("The passwords do not match."));
        }

        let user_type = require_text(self.user_type, "type")?;
        let role = Role::from_str(&user_type)
            .map_err(|_| ApiError::validation("type must be 'business' or 'customer'"))?;

        Ok(RegistrationCommand {
            username,
            email,
            password,
            role,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginInput {
    pub fn into_credentials(self) -> ApiResult<(String, String)> {
        let username = require_text(self.username, "username")?;
        let password = require_text(self.password, "password")?;
        Ok((username, password))
    }
}

/// Token response returned by registration and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

// ============================================================================
// Profiles
// ============================================================================

/// Public profile representation.
#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: UserId,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub file: Option<String>,
    pub location: String,
    pub tel: String,
    pub description: String,
    pub working_hours: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileRecord> for ProfileData {
    fn from(record: ProfileRecord) -> Self {
        ProfileData {
            user: record.user_id,
            username: record.username,
            first_name: record.first_name,
            last_name: record.last_name,
            file: record.file,
            location: record.location,
            tel: record.tel,
            description: record.description,
            working_hours: record.working_hours,
            user_type: record.user_type,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// Allow-listed profile patch. `email` is stored on the user row, the
/// rest on the profile row.
#[derive(Debug, Default, Deserialize)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub file: Option<String>,
    pub location: Option<String>,
    pub tel: Option<String>,
    pub description: Option<String>,
    pub working_hours: Option<String>,
    pub email: Option<String>,
}

fn require_text(value: Option<String>, field: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation(format!("{} field required", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            username: Some("alice".to_string()),
            email: Some("alice@example.com".to_string()),
            password: Some("secret".to_string()),
            repeated_password: Some("secret".to_string()),
            user_type: Some("business".to_string()),
        }
    }

    #[test]
    fn test_valid_registration() {
        let command = valid_input().into_command().unwrap();
        assert_eq!(command.username, "alice");
        assert_eq!(command.role, Role::Business);
    }

    #[test]
    fn test_password_mismatch_is_rejected() {
        let mut input = valid_input();
        input.repeated_password = Some("other".to_string());
        let err = input.into_command().unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_missing_username_is_rejected() {
        let mut input = valid_input();
        input.username = None;
        let err = input.into_command().unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let mut input = valid_input();
        input.user_type = Some("admin".to_string());
        assert!(input.into_command().is_err());
    }

    #[test]
    fn test_patch_drops_unknown_fields() {
        let patch: ProfilePatch = serde_json::from_value(serde_json::json!({
            "location": "Berlin",
            "user_type": "business",
            "is_staff": true
        }))
        .unwrap();
        assert_eq!(patch.location.as_deref(), Some("Berlin"));
        assert!(patch.first_name.is_none());
    }
}
