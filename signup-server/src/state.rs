use axum::extract::FromRef;
use signup_core::{PasswordHasher, RegistrationService, UserRepository};
use std::sync::Arc;

/// Shared state needed by requests.
#[derive(Clone, FromRef)]
pub struct State {
    /// Handles both kinds of registration.
    registrations: RegistrationService,
}

impl State {
    /// Create a new state.
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            registrations: RegistrationService::new(repository, hasher),
        }
    }
}
