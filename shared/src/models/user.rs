//! Session user models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Retailer,
    Wholesaler,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Retailer => "retailer",
            UserRole::Wholesaler => "wholesaler",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "retailer" => Ok(UserRole::Retailer),
            "wholesaler" => Ok(UserRole::Wholesaler),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// The signed-in user, as supplied by the authentication context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub role: UserRole,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    pub fn retailer(id: impl Into<String>) -> Self {
        Self::new(id, UserRole::Retailer)
    }
}
