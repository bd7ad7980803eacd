use crate::account::PasswordHash;
use argon2::password_hash::{self, rand_core::OsRng, SaltString};
use argon2::{
    Algorithm, Argon2, Params, ParamsBuilder, PasswordHasher as _, PasswordVerifier as _, Version,
};
use async_trait::async_trait;

/// Things that can go wrong while hashing or verifying a password.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    /// The hashing algorithm itself failed, or a stored hash was malformed.
    #[error("password hashing failed: {0}")]
    Hash(#[from] password_hash::Error),

    /// The configured cost parameters aren't valid for Argon2.
    #[error("invalid hashing parameters: {0}")]
    Params(#[from] argon2::Error),

    /// The blocking task we hashed on panicked or was cancelled.
    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// One-way, salted, adaptive password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    ///
    /// ## Errors
    ///
    /// Any failure of the underlying algorithm.
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashError>;

    /// Check a plaintext password against a hash we produced earlier.
    /// `Ok(false)` means the password simply didn't match.
    ///
    /// ## Errors
    ///
    /// If the stored hash can't be parsed or the algorithm fails.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, HashError>;
}

/// Overrides for Argon2's cost parameters. Anything left as `None` uses the
/// `argon2` crate's default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cost {
    /// Memory size, in KiB.
    pub memory_kib: Option<u32>,

    /// Number of passes over memory.
    pub iterations: Option<u32>,

    /// Degree of parallelism.
    pub parallelism: Option<u32>,
}

/// Argon2id hashing. The work happens on tokio's blocking pool so a slow hash
/// never stalls the executor.
#[derive(Debug, Default, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Construct a hasher with the given cost parameters.
    ///
    /// ## Errors
    ///
    /// If the parameters are out of range for Argon2 (for example, less
    /// memory than `8 * parallelism` KiB.)
    pub fn new(cost: Cost) -> Result<Self, HashError> {
        let mut builder = ParamsBuilder::new();

        if let Some(memory_kib) = cost.memory_kib {
            builder.m_cost(memory_kib);
        }
        if let Some(iterations) = cost.iterations {
            builder.t_cost(iterations);
        }
        if let Some(parallelism) = cost.parallelism {
            builder.p_cost(parallelism);
        }

        Ok(Self {
            params: builder.build()?,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashError> {
        let argon2 = self.argon2();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || -> Result<PasswordHash, HashError> {
            let salt = SaltString::generate(&mut OsRng);
            let hash = argon2.hash_password(plaintext.as_bytes(), &salt)?;

            Ok(PasswordHash::new(hash.to_string()))
        })
        .await?
    }

    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, HashError> {
        let argon2 = self.argon2();
        let plaintext = plaintext.to_owned();
        let hash = hash.as_str().to_owned();

        tokio::task::spawn_blocking(move || -> Result<bool, HashError> {
            let parsed = password_hash::PasswordHash::new(&hash)?;

            match argon2.verify_password(plaintext.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(err.into()),
            }
        })
        .await?
    }
}
