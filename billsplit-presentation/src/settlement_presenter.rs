use crate::text_table::{Column, TextTable};
use billsplit_application::{BillSettlement, CombinedSettlement, ParticipantDirectory};
use billsplit_domain::{Balances, Bill, Money, ReadinessIssue, Transfer};
use billsplit_i18n as i18n;
use std::{borrow::Cow, fmt::Display};

/// Turns computed settlements into the plain-text summary people share.
pub struct SettlementPresenter {
    currency: String,
}

impl SettlementPresenter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    /// Bill name, one line per transfer with its paid state, then any
    /// readiness warnings.
    pub fn render_bill(&self, bill: &Bill, settlement: &BillSettlement) -> String {
        let mut lines = vec![bill.name.clone(), String::new()];

        if settlement.lines.is_empty() {
            lines.push(i18n::NO_TRANSFERS.to_owned());
        }
        for line in &settlement.lines {
            let state = if line.is_paid {
                i18n::PAID
            } else {
                i18n::PENDING
            };
            lines.push(format!(
                "{} [{state}]",
                self.transfer_line(&line.transfer, bill)
            ));
        }

        if !settlement.issues.is_empty() {
            lines.push(String::new());
            lines.extend(
                settlement
                    .issues
                    .iter()
                    .map(|issue| format!("! {}", issue_message(issue, bill))),
            );
        }
        lines.join("\n")
    }

    pub fn render_combined(&self, combined: &CombinedSettlement) -> String {
        let mut lines = vec![i18n::combined_title(&combined.bill_names), String::new()];
        if combined.all_balanced() {
            lines.push(i18n::ALL_BALANCED.to_owned());
        }
        lines.extend(
            combined
                .transfers
                .iter()
                .map(|transfer| self.transfer_line(transfer, &combined.participants)),
        );
        lines.join("\n")
    }

    /// Signed balances per participant, positive meaning they still owe.
    pub fn balance_table<K: Display>(
        &self,
        balances: &Balances<K>,
        directory: &dyn ParticipantDirectory<K>,
    ) -> String {
        const COLUMNS: [Column<'static>; 2] =
            [Column::left(i18n::PARTICIPANT), Column::right(i18n::BALANCE)];
        TextTable::new(&COLUMNS).render(balances.iter().map(|(key, balance)| {
            [
                participant_label(key, directory),
                Cow::Owned(self.signed_amount(*balance)),
            ]
        }))
    }

    /// One row per transfer. Empty when nobody has to pay.
    pub fn transfer_table<'t, K: Display + 't>(
        &self,
        transfers: impl IntoIterator<Item = &'t Transfer<K>>,
        directory: &dyn ParticipantDirectory<K>,
    ) -> String {
        const COLUMNS: [Column<'static>; 3] = [
            Column::left(i18n::FROM),
            Column::left(i18n::TO),
            Column::right(i18n::AMOUNT),
        ];
        let rows: Vec<[Cow<'_, str>; 3]> = transfers
            .into_iter()
            .map(|transfer| {
                [
                    participant_label(&transfer.from, directory),
                    participant_label(&transfer.to, directory),
                    Cow::Owned(format!("{}{}", transfer.amount, self.currency)),
                ]
            })
            .collect();
        if rows.is_empty() {
            return String::new();
        }
        TextTable::new(&COLUMNS).render(rows)
    }

    pub fn transfer_line<K: Display>(
        &self,
        transfer: &Transfer<K>,
        directory: &dyn ParticipantDirectory<K>,
    ) -> String {
        let from = participant_label(&transfer.from, directory);
        let to = participant_label(&transfer.to, directory);
        i18n::owes(&from, &transfer.amount, &self.currency, &to).to_string()
    }

    fn signed_amount(&self, amount: Money) -> String {
        let sign = if amount > Money::ZERO { "+" } else { "" };
        format!("{sign}{amount}{}", self.currency)
    }
}

fn participant_label<'a, K: Display>(
    key: &K,
    directory: &'a dyn ParticipantDirectory<K>,
) -> Cow<'a, str> {
    match directory.display_name(key) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(key.to_string()),
    }
}

fn issue_message(issue: &ReadinessIssue, bill: &Bill) -> String {
    match issue {
        ReadinessIssue::MissingPayer => i18n::MISSING_PAYER.to_owned(),
        ReadinessIssue::NoItems => i18n::NO_ITEMS.to_owned(),
        ReadinessIssue::UnclaimedItem { item } => {
            let label = bill
                .item(item)
                .map(|line_item| line_item.description.as_str())
                .filter(|description| !description.is_empty())
                .unwrap_or(item.as_str());
            i18n::unclaimed_item(label)
        }
    }
}
