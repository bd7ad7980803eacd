use serde::{Deserialize, Serialize};
use std::fmt;

/// The request to register an individual account.
///
/// Every field is optional at the JSON level so that missing required fields
/// are reported by the registration workflow rather than the JSON parser.
#[derive(Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Req {
    /// Login email. Required.
    pub email: Option<String>,

    /// Plaintext password. Required.
    pub password: Option<String>,

    /// Required.
    pub full_name: Option<String>,

    /// Free-form; stored as given.
    pub date_of_birth: Option<String>,

    /// Free-form; stored as given.
    pub gender: Option<String>,

    /// National identity card number. Required.
    pub national_id: Option<String>,

    /// Free-form; stored as given.
    pub occupation: Option<String>,

    /// Home address.
    pub address: Option<String>,

    /// Contact phone number.
    pub phone_number: Option<String>,
}

impl fmt::Debug for Req {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Req")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

/// Result of registering an individual account.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resp {
    /// A human-readable confirmation.
    pub message: String,

    /// The ID of the new account.
    pub user_id: String,

    /// Email that was successfully registered.
    pub email: String,
}

/// What we tell clients after a successful registration.
pub const SUCCESS_MESSAGE: &str = "Individual account registered successfully!";

/// Where the individual registration endpoint lives.
pub const PATH: &str = "/api/auth/register/individual";
