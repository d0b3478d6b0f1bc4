//! Environment-backed configuration.
//!
//! Two settings are required: `DATABASE_URL` (sqlx connection string) and
//! `SECRET_KEY` (protects the session cookie). Everything else has a
//! default. Values come from the process environment; `main` loads `.env`
//! via dotenvy before the extraction runs.

use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;

/// Minimum `SECRET_KEY` length; the cookie key derivation requires 256-bit
/// master material.
const MIN_SECRET_LEN: usize = 32;

/// Cost factors bcrypt accepts; anything outside fails at hash time, so
/// catch it at load instead.
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Config {
    /// Extract the configuration from the process environment.
    pub fn from_env() -> Result<Self, figment::Error> {
        let cfg: Config = Figment::new().merge(Env::raw()).extract()?;
        cfg.validate()
    }

    fn validate(self) -> Result<Self, figment::Error> {
        if self.secret_key.len() < MIN_SECRET_LEN {
            return Err(figment::Error::from(format!(
                "SECRET_KEY must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(figment::Error::from(format!(
                "BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            secret_key: "0123456789abcdef0123456789abcdef".to_string(),
            bind_addr: default_bind_addr(),
            loglevel: default_loglevel(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }

    #[test]
    fn accepts_a_well_formed_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn rejects_a_short_secret() {
        let mut cfg = base_config();
        cfg.secret_key = "too short".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_an_out_of_range_bcrypt_cost() {
        let mut cfg = base_config();
        cfg.bcrypt_cost = MIN_BCRYPT_COST - 1;
        assert!(cfg.validate().is_err());

        let mut cfg = base_config();
        cfg.bcrypt_cost = MAX_BCRYPT_COST + 1;
        assert!(cfg.validate().is_err());
    }
}
