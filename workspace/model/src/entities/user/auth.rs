//! Signup and password authentication for users.

use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::{debug, instrument};

use crate::error::ModelError;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use super::{ActiveModel, Column, Entity, Model};

impl Model {
    /// Stage a new user with a bcrypt-hashed password.
    ///
    /// The returned record is not yet inserted; committing it is the
    /// caller's responsibility, and that is where uniqueness violations
    /// surface.
    #[instrument(skip(password))]
    pub fn signup(
        username: &str,
        email: &str,
        password: &str,
        image_url: Option<String>,
    ) -> Result<ActiveModel, ModelError> {
        let hashed = hash(password, DEFAULT_COST)?;
        debug!("Staged signup for username: {}", username);
        Ok(ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.to_string()),
            password: Set(hashed),
            image_url: Set(image_url),
            ..Default::default()
        })
    }

    /// Find a user by username and check the password against the stored
    /// hash. Returns `Ok(None)` for an unknown username or a wrong password.
    #[instrument(skip(db, password))]
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> Result<Option<Model>, ModelError> {
        let user = match Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await?
        {
            Some(user) => user,
            None => {
                debug!("Authentication failed, no such username: {}", username);
                return Ok(None);
            }
        };

        if verify(password, &user.password)? {
            debug!("Authenticated {}", user);
            Ok(Some(user))
        } else {
            debug!("Authentication failed, wrong password for: {}", username);
            Ok(None)
        }
    }
}
