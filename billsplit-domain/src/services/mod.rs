pub mod balance_calculator;
pub mod identity_merger;
pub mod payment_overlay;
pub mod settlement_calculator;

pub use balance_calculator::{
    BalanceAccumulator, BalanceCalculator, BalanceOptions, SharedSplitPolicy,
};
pub use identity_merger::{CombinedParticipant, IdentityMerger, MergedBalances};
pub use payment_overlay::{PaymentOverlay, PaymentRecord, SettlementLine};
pub use settlement_calculator::{SettlementCalculator, residual_balances};
