use thiserror::Error;

/// Error types for the model layer.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Error from hashing or parsing a password hash
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}
