//! Account registration for individuals and businesses, independent of any
//! particular HTTP server or database.

/// Accounts and the role-specific profiles attached to them.
pub mod account;
pub use account::{Account, PasswordHash, Profile, Role, UserId};

/// Request and response bodies for the registration endpoints.
pub mod api;

/// One-way password hashing.
pub mod hasher;
pub use hasher::{Argon2Hasher, PasswordHasher};

/// The registration workflow itself.
pub mod registration;
pub use registration::RegistrationService;

/// Where accounts and profiles are stored.
pub mod repository;
pub use repository::{InMemoryUserRepository, UserRepository};
