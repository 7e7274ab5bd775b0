use billsplit_domain::ParticipantId;

#[derive(Debug, thiserror::Error)]
pub enum PaymentStoreError {
    #[error("payment store is unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SettlementServiceError {
    #[error("no transfer from {from} to {to} in the current settlement")]
    TransferNotFound {
        from: ParticipantId,
        to: ParticipantId,
    },
    #[error(transparent)]
    Store(#[from] PaymentStoreError),
}
