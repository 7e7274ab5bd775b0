use crate::{
    model::{Balances, Bill, LineItem, Participant, ParticipantId},
    money::Money,
};
use fxhash::FxHashMap;
use rust_decimal::Decimal;
use std::hash::Hash;

/// How a shared item's price is divided among its pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SharedSplitPolicy {
    /// `totalPrice / |pool|` each, whatever the claim quantities say.
    #[default]
    EqualShares,
    /// Proportional to claim quantity; falls back to equal shares when every
    /// quantity in the pool is zero.
    ByClaimQuantity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BalanceOptions {
    pub shared_split: SharedSplitPolicy,
}

/// Accumulates net balances from one or more bills into a single map.
///
/// The key type decides identity: per-bill participant ids for a single bill,
/// [`crate::model::ParticipantKey`] when merging bills.
pub struct BalanceAccumulator<K> {
    balances: Balances<K>,
    options: BalanceOptions,
}

impl<K> BalanceAccumulator<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new(options: BalanceOptions) -> Self {
        Self {
            balances: Balances::default(),
            options,
        }
    }

    /// Ensures `key` is present, keeping its first-seen position.
    pub fn register(&mut self, key: K) {
        self.balances.entry(key).or_insert(Money::ZERO);
    }

    pub fn apply_bill<F>(&mut self, bill: &Bill, key_of: F)
    where
        F: Fn(&Participant) -> K,
    {
        let mut keys: FxHashMap<&ParticipantId, K> = FxHashMap::default();
        for participant in &bill.participants {
            let key = key_of(participant);
            self.register(key.clone());
            keys.insert(&participant.id, key);
        }

        for item in &bill.items {
            for (participant_id, cost) in self.item_costs(item) {
                match keys.get(participant_id) {
                    Some(key) => self.credit(key, cost),
                    None => tracing::warn!(
                        bill = %bill.id,
                        item = %item.id,
                        participant = %participant_id,
                        "ignoring claim held by unknown participant"
                    ),
                }
            }
        }

        let Some(payer_id) = &bill.payer_id else {
            return;
        };
        match keys.get(payer_id) {
            Some(key) => self.credit(key, -bill.total),
            None => tracing::warn!(
                bill = %bill.id,
                payer = %payer_id,
                "payer is not a participant; total not applied"
            ),
        }
    }

    pub fn balances(&self) -> &Balances<K> {
        &self.balances
    }

    pub fn into_balances(self) -> Balances<K> {
        self.balances
    }

    fn credit(&mut self, key: &K, amount: Money) {
        match self.balances.get_mut(key) {
            Some(balance) => *balance += amount,
            None => {
                self.balances.insert(key.clone(), amount);
            }
        }
    }

    fn item_costs<'i>(&self, item: &'i LineItem) -> Vec<(&'i ParticipantId, Money)> {
        if !item.is_shared {
            return item
                .claims
                .iter()
                .map(|claim| {
                    (
                        &claim.participant_id,
                        item.unit_price * Decimal::from(claim.quantity),
                    )
                })
                .collect();
        }

        let pool: Vec<_> = item.shared_pool().collect();
        if pool.is_empty() {
            return Vec::new();
        }

        let total_weight: u64 = pool.iter().map(|claim| u64::from(claim.quantity)).sum();
        match self.options.shared_split {
            SharedSplitPolicy::ByClaimQuantity if total_weight > 0 => pool
                .into_iter()
                .map(|claim| {
                    let share = item.total_price * Decimal::from(claim.quantity)
                        / Decimal::from(total_weight);
                    (&claim.participant_id, share)
                })
                .collect(),
            _ => {
                let per_person = item.total_price / Decimal::from(pool.len());
                pool.into_iter()
                    .map(|claim| (&claim.participant_id, per_person))
                    .collect()
            }
        }
    }
}

/// Net balances of a single bill, keyed by participant id in participant
/// order.
pub struct BalanceCalculator;

impl BalanceCalculator {
    pub fn calculate(&self, bill: &Bill, options: BalanceOptions) -> Balances<ParticipantId> {
        let mut accumulator = BalanceAccumulator::new(options);
        accumulator.apply_bill(bill, |participant| participant.id.clone());
        let balances = accumulator.into_balances();
        tracing::debug!(bill = %bill.id, participants = balances.len(), "computed bill balances");
        balances
    }
}
