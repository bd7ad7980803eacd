use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for an account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a fresh, random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A unique identifier for a profile record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub Uuid);

impl ProfileId {
    /// Generate a fresh, random ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// What kind of account this is. Every role has exactly one kind of profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A person signing up for themselves.
    Individual,

    /// The first administrator of a company.
    BusinessAdmin,
}

impl Role {
    /// The name we use for this role in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::BusinessAdmin => "business_admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// We got a role name we don't know about.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(Self::Individual),
            "business_admin" => Ok(Self::BusinessAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// The output of a `PasswordHasher`, in PHC string format.
///
/// This is deliberately not `Serialize`, and its `Debug` output is redacted,
/// so that a hash can't end up in a response body or a log line by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already-computed hash (e.g. one read back from storage.)
    pub fn new(phc: String) -> Self {
        Self(phc)
    }

    /// The PHC string, for storage.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// The core identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Generated when the account is created. Never changes.
    pub user_id: UserId,

    /// Unique across all accounts, regardless of role. Compared exactly.
    pub email: String,

    /// Never equal to the plaintext password.
    pub password_hash: PasswordHash,

    /// Which kind of profile goes with this account.
    pub role: Role,

    /// Set once, when the account is created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a brand-new account with a fresh ID, created now.
    pub fn new(email: String, password_hash: PasswordHash, role: Role) -> Self {
        Self {
            user_id: UserId::generate(),
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Details about a person with an `individual` account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualProfile {
    /// ID of this profile record.
    pub detail_id: ProfileId,

    /// The owning account.
    pub user_id: UserId,

    /// Required at registration.
    pub full_name: String,

    /// Free-form; stored as given.
    pub date_of_birth: Option<String>,

    /// Free-form; stored as given.
    pub gender: Option<String>,

    /// National identity card number. Required at registration.
    pub national_id: String,

    /// Free-form; stored as given.
    pub occupation: Option<String>,

    /// Home address.
    pub address: Option<String>,

    /// Contact phone number.
    pub phone_number: Option<String>,
}

/// Details about the company owned by a `business_admin` account. There is no
/// separate business entity: the company hangs off its first admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    /// ID of this profile record.
    pub business_detail_id: ProfileId,

    /// The admin account that owns the company.
    pub user_id_associated: UserId,

    /// Required at registration.
    pub company_name: String,

    /// Required at registration.
    pub tax_code: String,

    /// What the company does.
    pub industry: Option<String>,

    /// Business registration certificate number.
    pub registration_number: Option<String>,

    /// Required at registration.
    pub company_address: String,

    /// Main company phone number.
    pub company_phone: Option<String>,

    /// The company's official contact address. May differ from the admin's
    /// login email and is not checked for uniqueness.
    pub company_email: Option<String>,
}

/// A role-specific profile, linked 1:1 with an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Profile {
    /// Goes with `Role::Individual`.
    Individual(IndividualProfile),

    /// Goes with `Role::BusinessAdmin`.
    Business(BusinessProfile),
}

impl Profile {
    /// The account this profile belongs to.
    pub fn user_id(&self) -> UserId {
        match self {
            Self::Individual(profile) => profile.user_id,
            Self::Business(profile) => profile.user_id_associated,
        }
    }

    /// The only role an account owning this profile may have.
    pub fn role(&self) -> Role {
        match self {
            Self::Individual(_) => Role::Individual,
            Self::Business(_) => Role::BusinessAdmin,
        }
    }
}
