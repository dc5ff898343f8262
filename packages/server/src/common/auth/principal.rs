use serde::{Deserialize, Serialize};

use crate::common::UserId;

/// Authenticated user information from a verified JWT.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub is_staff: bool,
}

/// Marketplace role carried by a user's profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Business,
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Business => write!(f, "business"),
            Role::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "business" => Ok(Role::Business),
            "customer" => Ok(Role::Customer),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

/// A fully resolved principal: identity plus role.
///
/// The role is looked up from the profile store before any permission
/// check runs. A user without a profile row has no role and is denied
/// by default; there is no fallback lookup at check time.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Option<Role>,
    pub is_staff: bool,
}

impl Principal {
    pub fn is_business(&self) -> bool {
        self.role == Some(Role::Business)
    }

    pub fn is_customer(&self) -> bool {
        self.role == Some(Role::Customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::from_str("business").unwrap(), Role::Business);
        assert_eq!(Role::from_str("customer").unwrap(), Role::Customer);
        assert_eq!(Role::Business.to_string(), "business");
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("").is_err());
    }
}
