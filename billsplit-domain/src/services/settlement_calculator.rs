use crate::{
    model::{Balances, Settlement, Transfer},
    money::{Money, SETTLEMENT_EPSILON},
};
use std::hash::Hash;

/// A creditor's credit still open while debtors are being matched.
struct CreditorLedger<'a, K> {
    key: &'a K,
    remaining: Money,
}

/// Greedy debtor/creditor matching.
///
/// Debtors are taken in balance-map order and each one fills creditors in
/// balance-map order. Nothing is sorted by amount, so the resulting
/// `(from, to)` pairs depend only on encounter order; persisted payment
/// flags rely on that.
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Emits transfers covering every matchable debt.
    ///
    /// Balances within [`SETTLEMENT_EPSILON`] of zero take no part. When the
    /// balances do not net to zero the unmatched remainder is left as is.
    pub fn calculate<K>(&self, balances: &Balances<K>) -> Vec<Transfer<K>>
    where
        K: Clone + Eq + Hash,
    {
        let mut creditors: Vec<CreditorLedger<'_, K>> = balances
            .iter()
            .filter(|(_, balance)| (-**balance).exceeds_epsilon())
            .map(|(key, balance)| CreditorLedger {
                key,
                remaining: balance.abs(),
            })
            .collect();
        let debtors = balances
            .iter()
            .filter(|(_, balance)| balance.exceeds_epsilon());

        let mut transfers = Vec::new();
        for (debtor, &debt) in debtors {
            let mut remaining_debt = debt;

            for creditor in creditors.iter_mut() {
                if remaining_debt.exceeds_epsilon() && creditor.remaining.exceeds_epsilon() {
                    let amount = remaining_debt.min(creditor.remaining);
                    transfers.push(Transfer {
                        from: debtor.clone(),
                        to: creditor.key.clone(),
                        amount: amount.round_to_cents(),
                    });
                    // Unrounded, so cents do not drift across many transfers.
                    remaining_debt -= amount;
                    creditor.remaining -= amount;
                }

                if remaining_debt <= SETTLEMENT_EPSILON {
                    break;
                }
            }
        }

        tracing::debug!(
            participants = balances.len(),
            transfers = transfers.len(),
            "greedy settlement complete"
        );
        transfers
    }

    /// Keeps the balances alongside the transfers derived from them.
    pub fn settle<K>(&self, balances: Balances<K>) -> Settlement<K>
    where
        K: Clone + Eq + Hash,
    {
        let transfers = self.calculate(&balances);
        Settlement {
            balances,
            transfers,
        }
    }
}

/// Applies every transfer to `balances`: the payer's balance drops by the
/// amount, the receiver's rises.
pub fn residual_balances<K>(balances: &Balances<K>, transfers: &[Transfer<K>]) -> Balances<K>
where
    K: Clone + Eq + Hash,
{
    let mut residual = balances.clone();
    for transfer in transfers {
        *residual.entry(transfer.from.clone()).or_insert(Money::ZERO) -= transfer.amount;
        *residual.entry(transfer.to.clone()).or_insert(Money::ZERO) += transfer.amount;
    }
    residual
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[fixture]
    fn calculator() -> SettlementCalculator {
        SettlementCalculator
    }

    fn balances(rows: &[(&'static str, Decimal)]) -> Balances<&'static str> {
        rows.iter()
            .map(|(key, amount)| (*key, Money::from_decimal(*amount)))
            .collect()
    }

    #[rstest]
    #[case::two_people(
        &[("p1", dec!(-15.50)), ("p2", dec!(15.50))],
        vec![("p2", "p1", dec!(15.50))]
    )]
    #[case::shared_item_three_ways(
        &[("p1", dec!(-4)), ("p2", dec!(2)), ("p3", dec!(2))],
        vec![("p2", "p1", dec!(2)), ("p3", "p1", dec!(2))]
    )]
    #[case::debtor_fills_creditors_in_order(
        &[("a", dec!(-30)), ("b", dec!(-20)), ("c", dec!(45)), ("d", dec!(5))],
        vec![("c", "a", dec!(30)), ("c", "b", dec!(15)), ("d", "b", dec!(5))]
    )]
    #[case::no_sorting_by_amount(
        &[("small", dec!(1)), ("creditor", dec!(-11)), ("large", dec!(10))],
        vec![("small", "creditor", dec!(1)), ("large", "creditor", dec!(10))]
    )]
    #[case::within_tolerance_is_balanced(
        &[("p1", dec!(0.01)), ("p2", dec!(-0.01))],
        vec![]
    )]
    #[case::all_zero(&[("p1", dec!(0)), ("p2", dec!(0))], vec![])]
    #[case::empty(&[], vec![])]
    #[case::unbalanced_leaves_creditor_open(
        &[("p1", dec!(-10)), ("p2", dec!(4))],
        vec![("p2", "p1", dec!(4))]
    )]
    #[case::unbalanced_leaves_debtor_open(
        &[("p1", dec!(-4)), ("p2", dec!(10))],
        vec![("p2", "p1", dec!(4))]
    )]
    fn greedy_cases(
        calculator: SettlementCalculator,
        #[case] rows: &[(&'static str, Decimal)],
        #[case] expected: Vec<(&'static str, &'static str, Decimal)>,
    ) {
        let transfers = calculator.calculate(&balances(rows));

        let expected: Vec<Transfer<&str>> = expected
            .into_iter()
            .map(|(from, to, amount)| Transfer {
                from,
                to,
                amount: Money::from_decimal(amount),
            })
            .collect();
        assert_eq!(transfers, expected);
    }

    #[rstest]
    fn thirds_round_each_transfer_but_not_the_ledger(calculator: SettlementCalculator) {
        let third = Money::from_i64(10) / Decimal::from(3);
        let mut input = Balances::default();
        input.insert("payer", third - Money::from_i64(10));
        input.insert("b", third);
        input.insert("c", third);

        let transfers = calculator.calculate(&input);

        assert_eq!(transfers.len(), 2);
        assert!(
            transfers
                .iter()
                .all(|t| t.amount == Money::new(333, 2) && t.to == "payer")
        );
        let residual = residual_balances(&input, &transfers);
        assert!(residual.values().all(|b| !b.abs().exceeds_epsilon()));
    }

    #[rstest]
    fn settle_keeps_input_balances(calculator: SettlementCalculator) {
        let input = balances(&[("p1", dec!(-6)), ("p2", dec!(6))]);
        let settlement = calculator.settle(input.clone());
        assert_eq!(settlement.balances, input);
        assert_eq!(settlement.transfers.len(), 1);
    }

    #[rstest]
    fn settle_is_repeatable(calculator: SettlementCalculator) {
        let input = balances(&[("p1", dec!(-4)), ("p2", dec!(1)), ("p3", dec!(3))]);
        assert_eq!(calculator.settle(input.clone()), calculator.settle(input));
    }

    #[test]
    fn residual_balances_applies_direction() {
        let input = balances(&[("p1", dec!(-5)), ("p2", dec!(5))]);
        let transfers = vec![Transfer {
            from: "p2",
            to: "p1",
            amount: Money::from_i64(5),
        }];
        let residual = residual_balances(&input, &transfers);
        assert!(residual.values().all(|b| b.is_zero()));
    }
}
