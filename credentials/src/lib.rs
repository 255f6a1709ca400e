//! Credential hashing library
//!
//! Provides the one-way password transform used at registration time:
//! - Salted Argon2id hashing in PHC string format
//! - Fail-closed verification against a stored hash
//!
//! Hashing cost is intentional and tunable via the work factor.
//!
//! # Examples
//!
//! ## Hash and verify
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Custom work factor
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_params(19_456, 2, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod password;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
