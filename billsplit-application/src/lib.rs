#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod ports;
pub mod settlement_service;
pub mod validation;

pub use error::{PaymentStoreError, SettlementServiceError};
pub use ports::{ParticipantDirectory, PaymentRepository};
pub use settlement_service::{BillSettlement, CombinedSettlement, SettlementService};
pub use validation::{BillValidationError, validate_bill};
