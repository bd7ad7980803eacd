use serde::{Deserialize, Serialize};

/// The body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResp {
    /// A human-readable explanation. Never contains internal details.
    pub message: String,

    /// A stable, machine-readable code (see `Code`.)
    pub code: Code,
}

/// Machine-readable error codes.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    /// One or more required fields were absent or empty.
    MissingFields,

    /// Some account already uses this email.
    EmailAlreadyRegistered,

    /// The body wasn't JSON, or didn't have the right shape.
    InvalidBody,

    /// Something broke on our side.
    InternalError,
}
