//! Person entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A person registered in the organization.
///
/// Every member of a division or team is a person. A person may additionally
/// have a login account, in which case a [`crate::User`] row exists with the
/// same id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    /// Unique person identifier.
    pub id: Uuid,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Contact email (optional, unique when present).
    pub email: Option<String>,
    /// Mobile phone number (optional).
    pub mobile: Option<String>,
    /// When the person was created.
    pub created_at: DateTime<Utc>,
    /// When the person was last modified.
    pub modified_at: DateTime<Utc>,
}

impl Person {
    /// Full display name, "firstname lastname".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Data required to create a new person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePerson {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Contact email (optional).
    pub email: Option<String>,
    /// Mobile phone number (optional).
    pub mobile: Option<String>,
}

/// Data for updating an existing person.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePerson {
    /// New given name.
    pub firstname: Option<String>,
    /// New family name.
    pub lastname: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New mobile phone number.
    pub mobile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        let person = Person {
            id: Uuid::new_v4(),
            firstname: "Anna".to_string(),
            lastname: "Lindqvist".to_string(),
            email: None,
            mobile: None,
            created_at: Utc::now(),
            modified_at: Utc::now(),
        };
        assert_eq!(person.full_name(), "Anna Lindqvist");
    }
}
