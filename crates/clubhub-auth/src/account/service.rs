//! Login and account provisioning.

use tracing::info;
use uuid::Uuid;

use clubhub_core::result::AppResult;
use clubhub_database::repositories::UserRepository;
use clubhub_entity::person::CreatePerson;
use clubhub_entity::user::User;

use crate::password::PasswordHasher;

/// Handles credential checks and account creation.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: UserRepository,
    hasher: PasswordHasher,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(users: UserRepository) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
        }
    }

    /// Check a username and password.
    ///
    /// Answers `None` for an unknown username, a wrong password or a
    /// deactivated account; the caller cannot tell which. A successful
    /// login stamps the user's last login time.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.users.find_by_username(username).await? else {
            return Ok(None);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            return Ok(None);
        }
        if !user.is_active {
            return Ok(None);
        }

        self.users.record_login(user.id).await?;
        Ok(Some(user))
    }

    /// Register a brand new person with a login account.
    pub async fn register(
        &self,
        person: &CreatePerson,
        username: &str,
        password: &str,
    ) -> AppResult<User> {
        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create_with_person(person, username, &password_hash)
            .await?;
        info!(user_id = %user.id, username, "Registered new account");
        Ok(user)
    }

    /// Attach a login account to an existing person.
    ///
    /// Answers `None` when the person does not exist or already has an
    /// account.
    pub async fn promote_person(
        &self,
        person_id: Uuid,
        username: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let password_hash = self.hasher.hash(password)?;
        let user = self
            .users
            .create_for_person(person_id, username, &password_hash)
            .await?;
        if let Some(ref user) = user {
            info!(user_id = %user.id, username, "Promoted person to user");
        }
        Ok(user)
    }

    /// Replace a user's password.
    pub async fn change_password(&self, user_id: Uuid, new_password: &str) -> AppResult<()> {
        let password_hash = self.hasher.hash(new_password)?;
        self.users.update_password(user_id, &password_hash).await
    }
}
