#![warn(clippy::uninlined_format_args)]

pub mod editing;
pub mod error;
pub mod model;
pub mod money;
pub mod readiness;
pub mod services;

pub use error::{BillEditError, ValidationError};
pub use model::{
    Balances, Bill, BillId, Claim, Color, ItemId, LineItem, Participant, ParticipantId,
    ParticipantKey, PersonId, Settlement, Transfer,
};
pub use money::{MAX_AMOUNT, Money, SETTLEMENT_EPSILON};
pub use readiness::{ClaimStatus, ReadinessIssue};
pub use services::{
    BalanceAccumulator, BalanceCalculator, BalanceOptions, CombinedParticipant, IdentityMerger,
    MergedBalances, PaymentOverlay, PaymentRecord, SettlementCalculator, SettlementLine,
    SharedSplitPolicy,
};
