use billsplit_domain::{BalanceOptions, SharedSplitPolicy};
use std::{env, path::PathBuf};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

const SHARED_SPLIT_VAR: &str = "BILLSPLIT_SHARED_SPLIT";
const CURRENCY_VAR: &str = "BILLSPLIT_CURRENCY";
const PAYMENTS_VAR: &str = "BILLSPLIT_PAYMENTS";
const DEFAULT_CURRENCY: &str = "€";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BILLSPLIT_SHARED_SPLIT must be `equal` or `quantity` (got {0:?})")]
    InvalidSharedSplit(String),
    #[error("BILLSPLIT_CURRENCY must not be empty")]
    EmptyCurrency,
}

/// Application configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub options: BalanceOptions,
    pub currency: String,
    /// JSON file holding paid flags; payments live only for the run when unset.
    pub payments_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let shared_split = match lookup(SHARED_SPLIT_VAR).as_deref().map(str::trim) {
            None | Some("") | Some("equal") => SharedSplitPolicy::EqualShares,
            Some("quantity") => SharedSplitPolicy::ByClaimQuantity,
            Some(other) => return Err(ConfigError::InvalidSharedSplit(other.to_owned())),
        };

        let currency = match lookup(CURRENCY_VAR) {
            None => DEFAULT_CURRENCY.to_owned(),
            Some(value) if value.trim().is_empty() => return Err(ConfigError::EmptyCurrency),
            Some(value) => value.trim().to_owned(),
        };

        let payments_path = lookup(PAYMENTS_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            options: BalanceOptions { shared_split },
            currency,
            payments_path,
        })
    }
}

/// Initialize logging and tracing. Logs go to stderr so stdout stays
/// machine-readable under `--json`.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
