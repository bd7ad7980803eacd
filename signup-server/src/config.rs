use clap::Parser;
use signup_core::hasher::Cost;
use std::time::Duration;

/// A registration server for individual and business accounts
#[derive(Parser)]
#[clap(version)]
pub struct Config {
    /// Address to listen on
    #[clap(long, env, default_value = "127.0.0.1:3000")]
    pub address: String,

    /// Request body size limit, in bytes
    #[clap(long, env, default_value = "5242880")]
    pub body_limit: usize,

    /// Request timeout, in seconds
    #[clap(long, env, default_value = "5", value_parser = duration_parser)]
    pub request_timeout: Duration,

    /// Postgres connection string. Accounts are kept in memory (and lost on
    /// restart) if this isn't set.
    #[clap(long, env)]
    pub database_url: Option<String>,

    /// Argon2 memory cost, in KiB
    #[clap(long, env)]
    pub hash_memory_kib: Option<u32>,

    /// Argon2 iterations
    #[clap(long, env)]
    pub hash_iterations: Option<u32>,

    /// Argon2 parallelism
    #[clap(long, env)]
    pub hash_parallelism: Option<u32>,
}

impl Config {
    /// Cost overrides for password hashing.
    pub fn hash_cost(&self) -> Cost {
        Cost {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }
}

fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}
