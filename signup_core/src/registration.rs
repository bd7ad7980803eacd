use crate::account::{
    Account, BusinessProfile, IndividualProfile, Profile, ProfileId, Role, UserId,
};
use crate::api::{business, individual};
use crate::hasher::{HashError, PasswordHasher};
use crate::repository::{RepositoryError, UserRepository};
use std::sync::Arc;

/// Fields that must be present and non-empty to register an individual.
pub const INDIVIDUAL_REQUIRED: &[&str] = &["email", "password", "fullName", "nationalId"];

/// Fields that must be present and non-empty to register a business.
pub const BUSINESS_REQUIRED: &[&str] = &[
    "adminEmail",
    "adminPassword",
    "companyName",
    "taxCode",
    "companyAddress",
];

/// Why a registration didn't happen. None of these leave partial records
/// behind.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// At least one required field was absent or empty. Carries the full list
    /// of required fields, not just the missing ones.
    #[error("please provide all required fields: {}", .0.join(", "))]
    MissingFields(&'static [&'static str]),

    /// Some account (of any role) already uses this email.
    #[error("an account with this email already exists")]
    EmailAlreadyRegistered,

    /// Hashing or storage failed. The cause has already been logged.
    #[error("internal error")]
    Internal,
}

impl From<HashError> for Error {
    fn from(err: HashError) -> Self {
        tracing::error!(?err, "error while hashing password");
        Self::Internal
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EmailTaken => Self::EmailAlreadyRegistered,
            RepositoryError::Storage(_) => {
                tracing::error!(?err, "repository error");
                Self::Internal
            }
        }
    }
}

/// A successful individual registration.
#[derive(Debug, PartialEq, Eq)]
pub struct IndividualOutcome {
    /// The new account.
    pub user_id: UserId,

    /// As submitted.
    pub email: String,
}

impl From<IndividualOutcome> for individual::Resp {
    fn from(outcome: IndividualOutcome) -> Self {
        Self {
            message: individual::SUCCESS_MESSAGE.to_string(),
            user_id: outcome.user_id.to_string(),
            email: outcome.email,
        }
    }
}

/// A successful business registration.
#[derive(Debug, PartialEq, Eq)]
pub struct BusinessOutcome {
    /// The new admin account.
    pub admin_user_id: UserId,

    /// As submitted.
    pub admin_email: String,

    /// As submitted.
    pub company_name: String,
}

impl From<BusinessOutcome> for business::Resp {
    fn from(outcome: BusinessOutcome) -> Self {
        Self {
            message: business::SUCCESS_MESSAGE.to_string(),
            admin_user_id: outcome.admin_user_id.to_string(),
            admin_email: outcome.admin_email,
            company_name: outcome.company_name,
        }
    }
}

/// Validates registrations, hashes passwords, and stores new accounts with
/// their profiles.
#[derive(Clone)]
pub struct RegistrationService {
    /// Where accounts go.
    repository: Arc<dyn UserRepository>,

    /// How passwords get hashed.
    hasher: Arc<dyn PasswordHasher>,
}

impl RegistrationService {
    /// Construct a service over the given collaborators.
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a person.
    ///
    /// ## Errors
    ///
    /// - `Error::MissingFields` unless `email`, `password`, `fullName` and
    ///   `nationalId` are all present and non-empty
    /// - `Error::EmailAlreadyRegistered` if any account uses `email`
    /// - `Error::Internal` if hashing or storage fails
    #[tracing::instrument(skip_all, fields(email = req.email.as_deref()))]
    pub async fn register_individual(
        &self,
        req: individual::Req,
    ) -> Result<IndividualOutcome, Error> {
        let (Some(email), Some(password), Some(full_name), Some(national_id)) = (
            present(req.email),
            present(req.password),
            present(req.full_name),
            present(req.national_id),
        ) else {
            return Err(Error::MissingFields(INDIVIDUAL_REQUIRED));
        };

        let account = self
            .create(email, &password, Role::Individual, |user_id| {
                Profile::Individual(IndividualProfile {
                    detail_id: ProfileId::generate(),
                    user_id,
                    full_name,
                    date_of_birth: req.date_of_birth,
                    gender: req.gender,
                    national_id,
                    occupation: req.occupation,
                    address: req.address,
                    phone_number: req.phone_number,
                })
            })
            .await?;

        Ok(IndividualOutcome {
            user_id: account.user_id,
            email: account.email,
        })
    }

    /// Register a company along with its first admin account.
    ///
    /// ## Errors
    ///
    /// - `Error::MissingFields` unless `adminEmail`, `adminPassword`,
    ///   `companyName`, `taxCode` and `companyAddress` are all present and
    ///   non-empty
    /// - `Error::EmailAlreadyRegistered` if any account uses `adminEmail`
    /// - `Error::Internal` if hashing or storage fails
    #[tracing::instrument(skip_all, fields(email = req.admin_email.as_deref()))]
    pub async fn register_business(&self, req: business::Req) -> Result<BusinessOutcome, Error> {
        let (
            Some(admin_email),
            Some(admin_password),
            Some(company_name),
            Some(tax_code),
            Some(company_address),
        ) = (
            present(req.admin_email),
            present(req.admin_password),
            present(req.company_name),
            present(req.tax_code),
            present(req.company_address),
        )
        else {
            return Err(Error::MissingFields(BUSINESS_REQUIRED));
        };

        let stored_company_name = company_name.clone();
        let account = self
            .create(
                admin_email,
                &admin_password,
                Role::BusinessAdmin,
                |user_id| {
                    Profile::Business(BusinessProfile {
                        business_detail_id: ProfileId::generate(),
                        user_id_associated: user_id,
                        company_name: stored_company_name,
                        tax_code,
                        industry: req.industry,
                        registration_number: req.registration_number,
                        company_address,
                        company_phone: req.company_phone,
                        company_email: req.company_email,
                    })
                },
            )
            .await?;

        Ok(BusinessOutcome {
            admin_user_id: account.user_id,
            admin_email: account.email,
            company_name,
        })
    }

    /// The part both flows share: check the email, hash, then store the
    /// account and its profile in one atomic insert.
    async fn create<F>(
        &self,
        email: String,
        password: &str,
        role: Role,
        profile: F,
    ) -> Result<Account, Error>
    where
        F: FnOnce(UserId) -> Profile + Send,
    {
        // Fail fast on obvious duplicates so we don't pay for a hash. The
        // insert below is still the authority if two requests race.
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(Error::EmailAlreadyRegistered);
        }

        let password_hash = self.hasher.hash(password).await?;

        let account = Account::new(email, password_hash, role);
        let profile = profile(account.user_id);

        let account = self
            .repository
            .insert_account_and_profile(account, profile)
            .await?;

        tracing::info!(user_id = %account.user_id, %role, "registered account");

        Ok(account)
    }
}

/// Required fields count as missing when they're absent or empty. We don't
/// trim: whitespace-only values are present.
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
