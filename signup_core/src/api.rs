/// What went wrong, as seen by a client.
pub mod error;
pub use error::ErrorResp;

/// Register a company and its first admin.
pub mod business;

/// Register a person.
pub mod individual;
