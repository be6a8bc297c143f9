//! Account Models
//!
//! Wire views of customers and managers. Credentials never leave the server,
//! so these types carry no password material.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::CustomerId;

/// Session role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Manager => "manager",
        }
    }

    /// Landing page after a successful login
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Customer => "/CustomerDashboard.html",
            Role::Manager => "/manager-dashboard.html",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "manager" => Ok(Role::Manager),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Customer row on the manager dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Display label, always `Customer`
    pub role: String,
}
