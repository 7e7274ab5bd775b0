use crate::{error::SettlementServiceError, ports::PaymentRepository};
use billsplit_domain::{
    Balances, BalanceCalculator, BalanceOptions, Bill, IdentityMerger, MergedBalances, Money,
    ParticipantId, ParticipantKey, PaymentOverlay, PaymentRecord, ReadinessIssue,
    SettlementCalculator, SettlementLine, Transfer,
};
use chrono::{DateTime, Utc};

/// Everything the single-bill settlement view shows.
#[derive(Clone, Debug, PartialEq)]
pub struct BillSettlement {
    pub balances: Balances<ParticipantId>,
    pub lines: Vec<SettlementLine>,
    /// Advisory; the settlement is computed regardless.
    pub issues: Vec<ReadinessIssue>,
}

impl BillSettlement {
    pub fn transfers(&self) -> impl Iterator<Item = &Transfer> {
        self.lines.iter().map(|line| &line.transfer)
    }

    pub fn is_ready(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn all_paid(&self) -> bool {
        self.lines.iter().all(|line| line.is_paid)
    }
}

/// Net position across several bills, keyed by merged identity.
#[derive(Clone, Debug, PartialEq)]
pub struct CombinedSettlement {
    pub bill_names: Vec<String>,
    pub participants: MergedBalances,
    pub transfers: Vec<Transfer<ParticipantKey>>,
    /// Sum of declared bill totals.
    pub total: Money,
}

impl CombinedSettlement {
    pub fn all_balanced(&self) -> bool {
        self.transfers.is_empty()
    }
}

#[derive(Clone, Copy)]
pub struct SettlementService<'a> {
    payments: &'a dyn PaymentRepository,
    options: BalanceOptions,
}

impl<'a> SettlementService<'a> {
    pub fn new(payments: &'a dyn PaymentRepository, options: BalanceOptions) -> Self {
        Self { payments, options }
    }

    pub fn settle_bill(&self, bill: &Bill) -> Result<BillSettlement, SettlementServiceError> {
        let balances = BalanceCalculator.calculate(bill, self.options);
        let transfers = SettlementCalculator.calculate(&balances);
        let records = self.payments.payments_for_bill(&bill.id)?;
        let lines = PaymentOverlay.join(transfers, &records);
        let issues = bill.readiness();

        tracing::debug!(
            bill = %bill.id,
            transfers = lines.len(),
            paid = lines.iter().filter(|line| line.is_paid).count(),
            ready = issues.is_empty(),
            "settled bill"
        );
        Ok(BillSettlement {
            balances,
            lines,
            issues,
        })
    }

    /// Flips the paid flag of the current `from -> to` transfer and persists it.
    pub fn toggle_payment(
        &self,
        bill: &Bill,
        from: &ParticipantId,
        to: &ParticipantId,
        now: DateTime<Utc>,
    ) -> Result<PaymentRecord, SettlementServiceError> {
        let balances = BalanceCalculator.calculate(bill, self.options);
        let transfer = SettlementCalculator
            .calculate(&balances)
            .into_iter()
            .find(|transfer| &transfer.from == from && &transfer.to == to)
            .ok_or_else(|| SettlementServiceError::TransferNotFound {
                from: from.clone(),
                to: to.clone(),
            })?;

        let records = self.payments.payments_for_bill(&bill.id)?;
        let existing = records
            .iter()
            .find(|record| record.pair() == (from, to));
        let record = PaymentOverlay.toggle(&bill.id, &transfer, existing, now);
        self.payments.upsert_payment(record.clone())?;

        tracing::info!(
            bill = %bill.id,
            from = %from,
            to = %to,
            is_paid = record.is_paid,
            "toggled payment"
        );
        Ok(record)
    }

    pub fn combine(&self, bills: &[Bill]) -> CombinedSettlement {
        let participants = IdentityMerger.merge(bills, self.options);
        let transfers = SettlementCalculator.calculate(&participants.balances());
        let total = bills.iter().map(|bill| bill.total).sum();

        CombinedSettlement {
            bill_names: bills.iter().map(|bill| bill.name.clone()).collect(),
            participants,
            transfers,
            total,
        }
    }
}
