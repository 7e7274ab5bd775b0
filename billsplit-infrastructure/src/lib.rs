#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod payment_store;
pub mod payments;
pub mod snapshot;

pub use error::SnapshotError;
pub use payment_store::InMemoryPaymentStore;
pub use payments::{PaymentRecordDto, load_payments, save_payments};
pub use snapshot::{BillDto, TransferDto, decode_bill, encode_transfers, load_bill};
