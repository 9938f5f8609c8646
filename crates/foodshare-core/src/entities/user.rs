//! User entity - a donor/recipient account

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A registered account. Users are never hard-deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub location: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, name: String, email: String, location: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            location,
            phone: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
        self.updated_at = Utc::now();
    }
}
