use crate::bootstrap::ConfigError;
use billsplit_application::{BillValidationError, SettlementServiceError};
use billsplit_infrastructure::SnapshotError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("--toggle needs exactly one bill (got {0})")]
    ToggleNeedsOneBill(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Invalid(#[from] BillValidationError),
    #[error(transparent)]
    Settlement(#[from] SettlementServiceError),
}

pub type CliResult<T> = Result<T, CliError>;
