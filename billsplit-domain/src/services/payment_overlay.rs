use crate::{
    model::{BillId, ParticipantId, Transfer},
    money::Money,
};
use chrono::{DateTime, Utc};
use fxhash::FxHashMap;

/// Persisted paid/unpaid state of one computed transfer, keyed by
/// `(bill_id, from, to)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentRecord {
    pub bill_id: BillId,
    pub from: ParticipantId,
    pub to: ParticipantId,
    /// Transfer amount at the time the record was last written.
    pub amount: Money,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    pub fn pair(&self) -> (&ParticipantId, &ParticipantId) {
        (&self.from, &self.to)
    }
}

/// A freshly computed transfer with whatever payment state is on file for
/// its pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementLine {
    pub transfer: Transfer,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Joins payment records onto solver output by exact `(from, to)` pair.
///
/// Amounts are never reconciled: a record written for an older amount still
/// marks the pair as paid after claims change.
pub struct PaymentOverlay;

impl PaymentOverlay {
    pub fn join(
        &self,
        transfers: Vec<Transfer>,
        records: &[PaymentRecord],
    ) -> Vec<SettlementLine> {
        let by_pair: FxHashMap<(&ParticipantId, &ParticipantId), &PaymentRecord> =
            records.iter().map(|record| (record.pair(), record)).collect();

        transfers
            .into_iter()
            .map(|transfer| {
                let record = by_pair.get(&(&transfer.from, &transfer.to));
                SettlementLine {
                    is_paid: record.is_some_and(|r| r.is_paid),
                    paid_at: record.and_then(|r| r.paid_at),
                    transfer,
                }
            })
            .collect()
    }

    /// Flips the paid flag for `transfer`, creating a paid record when none
    /// exists. The record always carries the transfer's current amount.
    pub fn toggle(
        &self,
        bill_id: &BillId,
        transfer: &Transfer,
        existing: Option<&PaymentRecord>,
        now: DateTime<Utc>,
    ) -> PaymentRecord {
        let is_paid = !existing.is_some_and(|record| record.is_paid);
        PaymentRecord {
            bill_id: bill_id.clone(),
            from: transfer.from.clone(),
            to: transfer.to.clone(),
            amount: transfer.amount,
            is_paid,
            paid_at: is_paid.then_some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn transfer(from: &str, to: &str, amount: i64) -> Transfer {
        Transfer {
            from: from.into(),
            to: to.into(),
            amount: Money::from_i64(amount),
        }
    }

    fn record(from: &str, to: &str, amount: i64, is_paid: bool) -> PaymentRecord {
        PaymentRecord {
            bill_id: "b1".into(),
            from: from.into(),
            to: to.into(),
            amount: Money::from_i64(amount),
            is_paid,
            paid_at: None,
        }
    }

    #[rstest]
    fn join_matches_exact_pairs_only() {
        let transfers = vec![transfer("p2", "p1", 2), transfer("p3", "p1", 2)];
        let records = vec![record("p2", "p1", 2, true), record("p1", "p3", 2, true)];

        let lines = PaymentOverlay.join(transfers, &records);

        assert_eq!(
            lines.iter().map(|l| l.is_paid).collect::<Vec<_>>(),
            vec![true, false]
        );
        assert_eq!(lines[1].transfer, transfer("p3", "p1", 2));
    }

    #[rstest]
    fn stale_amount_keeps_paid_flag() {
        let lines = PaymentOverlay.join(
            vec![transfer("p2", "p1", 9)],
            &[record("p2", "p1", 4, true)],
        );
        assert!(lines[0].is_paid);
        assert_eq!(lines[0].transfer.amount, Money::from_i64(9));
    }

    #[rstest]
    #[case::create(None, true)]
    #[case::mark_paid(Some(record("p2", "p1", 2, false)), true)]
    #[case::mark_unpaid(Some(record("p2", "p1", 2, true)), false)]
    fn toggle_flips_state(
        now: DateTime<Utc>,
        #[case] existing: Option<PaymentRecord>,
        #[case] expected_paid: bool,
    ) {
        let current = transfer("p2", "p1", 7);
        let toggled = PaymentOverlay.toggle(&"b1".into(), &current, existing.as_ref(), now);

        assert_eq!(toggled.is_paid, expected_paid);
        assert_eq!(toggled.amount, Money::from_i64(7));
        assert_eq!(toggled.paid_at, expected_paid.then_some(now));
        assert_eq!(
            toggled.pair(),
            (&ParticipantId::from("p2"), &ParticipantId::from("p1"))
        );
    }
}
