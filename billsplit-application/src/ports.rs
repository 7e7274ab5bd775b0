use crate::error::PaymentStoreError;
use billsplit_domain::{
    Bill, BillId, MergedBalances, ParticipantId, ParticipantKey, PaymentRecord,
};
use std::{collections::HashMap, hash::Hash};

/// Storage for per-transfer paid flags.
pub trait PaymentRepository: Send + Sync {
    /// Records for `bill_id` in the order they were first written.
    fn payments_for_bill(&self, bill_id: &BillId) -> Result<Vec<PaymentRecord>, PaymentStoreError>;

    /// Inserts or replaces the record for `(record.bill_id, record.from, record.to)`.
    fn upsert_payment(&self, record: PaymentRecord) -> Result<(), PaymentStoreError>;
}

pub trait ParticipantDirectory<K> {
    fn display_name(&self, key: &K) -> Option<&str>;
}

impl ParticipantDirectory<ParticipantId> for Bill {
    fn display_name(&self, key: &ParticipantId) -> Option<&str> {
        self.participant(key).map(|participant| participant.name.as_str())
    }
}

impl ParticipantDirectory<ParticipantKey> for MergedBalances {
    fn display_name(&self, key: &ParticipantKey) -> Option<&str> {
        self.participants
            .get(key)
            .map(|participant| participant.name.as_str())
    }
}

impl<K> ParticipantDirectory<K> for HashMap<K, String>
where
    K: Eq + Hash,
{
    fn display_name(&self, key: &K) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}
