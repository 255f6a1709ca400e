use std::sync::Arc;

use async_trait::async_trait;
use credentials::PasswordHasher;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user registration.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// The hasher is injected so its work factor can come from configuration.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Configured credential hasher
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let CreateUserCommand {
            username,
            password,
            fullname,
            email,
        } = command;

        // Hashing is CPU-bound and deliberately slow; run it on the
        // blocking pool so request intake threads stay free. The plaintext
        // moves into the closure and is dropped there once the hash exists.
        let hasher = self.password_hasher.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            username,
            password_hash,
            fullname,
            email,
        };

        // Single constrained insert; the store decides duplicate races
        self.repository.create(user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    // Define mocks in the test module using mockall
    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserError>;
        }
    }

    fn command() -> CreateUserCommand {
        CreateUserCommand {
            username: "exampleUser".to_string(),
            password: "examplePass".to_string(),
            fullname: Some("Example User".to_string()),
            email: "example@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_stores_hash_not_plaintext() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username == "exampleUser"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "examplePass"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let user = service.create_user(command()).await.unwrap();
        assert_eq!(user.username, "exampleUser");
        assert_eq!(user.fullname.as_deref(), Some("Example User"));
        assert_eq!(user.email, "example@example.com");

        // The stored hash round-trips against the original plaintext
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("examplePass", &user.password_hash).unwrap());
        assert!(!hasher.verify("wrong_password", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(user.username.clone()))
        });

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service.create_user(command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user_id = UserId::new();
        let expected_user = User {
            id: user_id,
            username: "exampleUser".to_string(),
            password_hash: "$argon2id$test_hash".to_string(),
            fullname: None,
            email: "example@example.com".to_string(),
        };

        let returned_user = expected_user.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let user = service.get_user(&user_id).await.unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "exampleUser");
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), PasswordHasher::new());

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
