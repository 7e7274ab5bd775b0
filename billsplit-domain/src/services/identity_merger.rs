use crate::{
    model::{Balances, Bill, Color, ParticipantKey},
    money::Money,
    services::{BalanceAccumulator, BalanceOptions},
};
use indexmap::IndexMap;

/// One real-world person as seen across several bills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinedParticipant {
    pub key: ParticipantKey,
    /// Name and color as first encountered.
    pub name: String,
    pub color: Color,
    pub balance: Money,
}

/// Unified balances across bills plus the directory needed to display them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedBalances {
    pub participants: IndexMap<ParticipantKey, CombinedParticipant>,
}

impl MergedBalances {
    pub fn balances(&self) -> Balances<ParticipantKey> {
        self.participants
            .iter()
            .map(|(key, participant)| (key.clone(), participant.balance))
            .collect()
    }
}

/// Joins participants of independently created bills by [`ParticipantKey`].
///
/// A saved-friend id wins when present; otherwise the lowercase name + color
/// heuristic applies, which merges distinct people who share both.
pub struct IdentityMerger;

impl IdentityMerger {
    pub fn merge(&self, bills: &[Bill], options: BalanceOptions) -> MergedBalances {
        let mut participants: IndexMap<ParticipantKey, CombinedParticipant> = IndexMap::new();
        let mut accumulator = BalanceAccumulator::new(options);

        for bill in bills {
            for participant in &bill.participants {
                let key = participant.key();
                participants
                    .entry(key.clone())
                    .or_insert_with(|| CombinedParticipant {
                        key,
                        name: participant.name.clone(),
                        color: participant.color.clone(),
                        balance: Money::ZERO,
                    });
            }
            accumulator.apply_bill(bill, |participant| participant.key());
        }

        for (key, balance) in accumulator.into_balances() {
            if let Some(participant) = participants.get_mut(&key) {
                participant.balance = balance;
            }
        }

        tracing::debug!(
            bills = bills.len(),
            identities = participants.len(),
            "merged participants across bills"
        );
        MergedBalances { participants }
    }
}
