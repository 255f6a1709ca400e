use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user registration operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a new user from a validated command.
    ///
    /// Hashes the password, then performs a single constrained insert.
    ///
    /// # Arguments
    /// * `command` - Command produced by the submission rule chain
    ///
    /// # Returns
    /// Created user record
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// User record
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for the user record.
///
/// The store is the only arbiter of username uniqueness: `create` is an
/// atomic constrained insert and its rejection decides the loser of any
/// duplicate race. No caller may pre-check and insert in two steps.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user under the unique-username constraint.
    ///
    /// # Arguments
    /// * `user` - User record to create
    ///
    /// # Returns
    /// Created user record
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Constraint rejected the insert
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by the unique username key.
    ///
    /// # Arguments
    /// * `username` - Username to search for
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Store operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
}
