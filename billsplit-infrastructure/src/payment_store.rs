use billsplit_application::{PaymentRepository, PaymentStoreError};
use billsplit_domain::{BillId, ParticipantId, PaymentRecord};
use dashmap::DashMap;
use indexmap::IndexMap;

type PairKey = (ParticipantId, ParticipantId);

/// Payment rows held in memory, one insertion-ordered table per bill.
#[derive(Default)]
pub struct InMemoryPaymentStore {
    bills: DashMap<BillId, IndexMap<PairKey, PaymentRecord>>,
}

impl InMemoryPaymentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later rows for the same `(bill, from, to)` replace earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = PaymentRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Every stored row, grouped by bill.
    pub fn records(&self) -> Vec<PaymentRecord> {
        let mut bills: Vec<_> = self
            .bills
            .iter()
            .map(|entry| {
                let rows: Vec<_> = entry.value().values().cloned().collect();
                (entry.key().clone(), rows)
            })
            .collect();
        bills.sort_by(|(a, _), (b, _)| a.cmp(b));
        bills.into_iter().flat_map(|(_, rows)| rows).collect()
    }

    fn insert(&self, record: PaymentRecord) {
        let key = (record.from.clone(), record.to.clone());
        self.bills
            .entry(record.bill_id.clone())
            .or_default()
            .insert(key, record);
    }
}

impl PaymentRepository for InMemoryPaymentStore {
    fn payments_for_bill(&self, bill_id: &BillId) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
        Ok(self
            .bills
            .get(bill_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    fn upsert_payment(&self, record: PaymentRecord) -> Result<(), PaymentStoreError> {
        tracing::debug!(
            bill = %record.bill_id,
            from = %record.from,
            to = %record.to,
            is_paid = record.is_paid,
            "storing payment"
        );
        self.insert(record);
        Ok(())
    }
}
