//! Account Models
//!
//! Server-side customer and manager records. Unlike the wire types in
//! `shared`, these carry the argon2 password hash.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use shared::models::{CustomerId, CustomerSummary, ManagerId};

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify password against an argon2 hash
pub fn verify_password(hash: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Customer account
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

/// Create customer payload
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

impl Customer {
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(&self.password_hash, password)
    }

    /// Phone for display; empty when none was given
    pub fn phone_display(&self) -> &str {
        self.phone.as_deref().unwrap_or("")
    }

    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            id: self.id,
            name: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone_display().to_string(),
            role: "Customer".to_string(),
        }
    }
}

/// Manager account (seeded, never created at runtime)
#[derive(Debug, Clone)]
pub struct Manager {
    pub id: ManagerId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl Manager {
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        verify_password(&self.password_hash, password)
    }
}
