use serde::{Deserialize, Serialize};
use std::fmt;

/// The request to register a company along with its admin account.
///
/// As with individual registration, every field is optional at the JSON
/// level and required fields are checked by the registration workflow.
#[derive(Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Req {
    /// Login email for the company's admin. Required.
    pub admin_email: Option<String>,

    /// Plaintext password for the company's admin. Required.
    pub admin_password: Option<String>,

    /// Required.
    pub company_name: Option<String>,

    /// Required.
    pub tax_code: Option<String>,

    /// What the company does.
    pub industry: Option<String>,

    /// Business registration certificate number.
    pub registration_number: Option<String>,

    /// Required.
    pub company_address: Option<String>,

    /// Main company phone number.
    pub company_phone: Option<String>,

    /// The company's official email. May differ from `admin_email`.
    pub company_email: Option<String>,
}

impl fmt::Debug for Req {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Req")
            .field("admin_email", &self.admin_email)
            .field("company_name", &self.company_name)
            .finish_non_exhaustive()
    }
}

/// Result of registering a business.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resp {
    /// A human-readable confirmation.
    pub message: String,

    /// The ID of the new admin account.
    pub admin_user_id: String,

    /// The admin email that was successfully registered.
    pub admin_email: String,

    /// Name of the company, as stored.
    pub company_name: String,
}

/// What we tell clients after a successful registration.
pub const SUCCESS_MESSAGE: &str = "Business account registered successfully!";

/// Where the business registration endpoint lives.
pub const PATH: &str = "/api/auth/register/business";
