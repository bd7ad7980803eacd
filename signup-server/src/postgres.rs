use async_trait::async_trait;
use signup_core::account::{BusinessProfile, IndividualProfile, ProfileId};
use signup_core::repository::RepositoryError;
use signup_core::{Account, PasswordHash, Profile, Role, UserId, UserRepository};
use sqlx::{migrate::Migrator, postgres::PgRow, PgPool, Row};

/// Creates the `accounts` and profile tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Stores accounts in Postgres. The `UNIQUE` constraint on `accounts.email`
/// decides races between concurrent registrations.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Wrap a pool. Run `MIGRATOR` against it first.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Callers of the repository log storage errors, so we just convert here.
fn storage(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

fn account_from_row(row: &PgRow) -> Result<Account, RepositoryError> {
    let role: String = row.try_get("role").map_err(storage)?;

    Ok(Account {
        user_id: UserId(row.try_get("user_id").map_err(storage)?),
        email: row.try_get("email").map_err(storage)?,
        password_hash: PasswordHash::new(row.try_get("password_hash").map_err(storage)?),
        role: role
            .parse::<Role>()
            .map_err(|err| RepositoryError::Storage(err.to_string()))?,
        created_at: row.try_get("created_at").map_err(storage)?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
        sqlx::query(
            "SELECT user_id, email, password_hash, role, created_at \
            FROM accounts WHERE email = $1 LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?
        .map(|row| account_from_row(&row))
        .transpose()
    }

    #[tracing::instrument(skip_all, fields(user_id = %account.user_id))]
    async fn insert_account_and_profile(
        &self,
        account: Account,
        profile: Profile,
    ) -> Result<Account, RepositoryError> {
        if profile.user_id() != account.user_id || profile.role() != account.role {
            return Err(RepositoryError::Storage(
                "profile does not belong to account".to_string(),
            ));
        }

        // Dropping `tx` without committing rolls everything back.
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let inserted = sqlx::query(
            "INSERT INTO accounts (user_id, email, password_hash, role, created_at) \
            VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(account.user_id.0)
        .bind(&account.email)
        .bind(account.password_hash.as_str())
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&mut *tx)
        .await;

        match inserted {
            Err(err) if is_unique_violation(&err) => return Err(RepositoryError::EmailTaken),
            Err(err) => return Err(storage(err)),
            Ok(_) => {}
        }

        match profile {
            Profile::Individual(profile) => {
                sqlx::query(
                    "INSERT INTO individual_profiles \
                    (detail_id, user_id, full_name, date_of_birth, gender, national_id, occupation, address, phone_number) \
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                )
                .bind(profile.detail_id.0)
                .bind(profile.user_id.0)
                .bind(profile.full_name)
                .bind(profile.date_of_birth)
                .bind(profile.gender)
                .bind(profile.national_id)
                .bind(profile.occupation)
                .bind(profile.address)
                .bind(profile.phone_number)
                .execute(&mut *tx)
                .await
                .map_err(storage)?;
            }
            Profile::Business(profile) => {
                sqlx::query(
                    "INSERT INTO business_profiles \
                    (business_detail_id, user_id_associated, company_name, tax_code, industry, registration_number, company_address, company_phone, company_email) \
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                )
                .bind(profile.business_detail_id.0)
                .bind(profile.user_id_associated.0)
                .bind(profile.company_name)
                .bind(profile.tax_code)
                .bind(profile.industry)
                .bind(profile.registration_number)
                .bind(profile.company_address)
                .bind(profile.company_phone)
                .bind(profile.company_email)
                .execute(&mut *tx)
                .await
                .map_err(storage)?;
            }
        }

        tx.commit().await.map_err(storage)?;

        Ok(account)
    }

    #[tracing::instrument(skip(self))]
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let individual = sqlx::query(
            "SELECT detail_id, user_id, full_name, date_of_birth, gender, national_id, occupation, address, phone_number \
            FROM individual_profiles WHERE user_id = $1",
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        if let Some(row) = individual {
            return Ok(Some(Profile::Individual(IndividualProfile {
                detail_id: ProfileId(row.try_get("detail_id").map_err(storage)?),
                user_id: UserId(row.try_get("user_id").map_err(storage)?),
                full_name: row.try_get("full_name").map_err(storage)?,
                date_of_birth: row.try_get("date_of_birth").map_err(storage)?,
                gender: row.try_get("gender").map_err(storage)?,
                national_id: row.try_get("national_id").map_err(storage)?,
                occupation: row.try_get("occupation").map_err(storage)?,
                address: row.try_get("address").map_err(storage)?,
                phone_number: row.try_get("phone_number").map_err(storage)?,
            })));
        }

        let business = sqlx::query(
            "SELECT business_detail_id, user_id_associated, company_name, tax_code, industry, registration_number, company_address, company_phone, company_email \
            FROM business_profiles WHERE user_id_associated = $1",
        )
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;

        business
            .map(|row| {
                Ok(Profile::Business(BusinessProfile {
                    business_detail_id: ProfileId(
                        row.try_get("business_detail_id").map_err(storage)?,
                    ),
                    user_id_associated: UserId(
                        row.try_get("user_id_associated").map_err(storage)?,
                    ),
                    company_name: row.try_get("company_name").map_err(storage)?,
                    tax_code: row.try_get("tax_code").map_err(storage)?,
                    industry: row.try_get("industry").map_err(storage)?,
                    registration_number: row.try_get("registration_number").map_err(storage)?,
                    company_address: row.try_get("company_address").map_err(storage)?,
                    company_phone: row.try_get("company_phone").map_err(storage)?,
                    company_email: row.try_get("company_email").map_err(storage)?,
                }))
            })
            .transpose()
    }
}
