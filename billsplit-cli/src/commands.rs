use crate::{
    args::Args,
    bootstrap::AppConfig,
    error::{CliError, CliResult},
};
use billsplit_application::SettlementService;
use billsplit_domain::Bill;
use billsplit_infrastructure::{InMemoryPaymentStore, TransferDto, encode_transfers, save_payments};
use billsplit_presentation::SettlementPresenter;
use chrono::{DateTime, Utc};

/// Settles already-loaded bills and returns what belongs on stdout.
///
/// One bill gets a per-bill settlement with paid flags (after applying
/// `--toggle`); several bills are merged into one combined settlement.
pub fn execute(
    args: &Args,
    config: &AppConfig,
    store: &InMemoryPaymentStore,
    bills: &[Bill],
    now: DateTime<Utc>,
) -> CliResult<String> {
    let service = SettlementService::new(store, config.options);
    let presenter = SettlementPresenter::new(config.currency.as_str());

    match bills {
        [bill] => settle_single(args, config, store, &service, &presenter, bill, now),
        _ if args.toggle.is_some() => Err(CliError::ToggleNeedsOneBill(bills.len())),
        _ => settle_combined(args, &service, &presenter, bills),
    }
}

fn settle_single(
    args: &Args,
    config: &AppConfig,
    store: &InMemoryPaymentStore,
    service: &SettlementService<'_>,
    presenter: &SettlementPresenter,
    bill: &Bill,
    now: DateTime<Utc>,
) -> CliResult<String> {
    if let Some((from, to)) = &args.toggle {
        service.toggle_payment(bill, from, to, now)?;
        match &config.payments_path {
            Some(path) => save_payments(path, &store.records())?,
            None => tracing::warn!("BILLSPLIT_PAYMENTS is not set; payment state is not saved"),
        }
    }

    let settlement = service.settle_bill(bill)?;
    tracing::info!(
        bill = %bill.id,
        transfers = settlement.lines.len(),
        ready = settlement.is_ready(),
        "settlement computed"
    );

    if args.json {
        let rows: Vec<TransferDto> = settlement.lines.iter().map(TransferDto::from).collect();
        return Ok(format!("{}\n", encode_transfers(&rows)?));
    }
    Ok(with_tables(
        presenter.render_bill(bill, &settlement),
        presenter.balance_table(&settlement.balances, bill),
        presenter.transfer_table(settlement.transfers(), bill),
    ))
}

fn settle_combined(
    args: &Args,
    service: &SettlementService<'_>,
    presenter: &SettlementPresenter,
    bills: &[Bill],
) -> CliResult<String> {
    let combined = service.combine(bills);
    tracing::info!(
        bills = bills.len(),
        identities = combined.participants.participants.len(),
        transfers = combined.transfers.len(),
        "combined settlement computed"
    );

    if args.json {
        let rows: Vec<TransferDto> = combined.transfers.iter().map(TransferDto::from).collect();
        return Ok(format!("{}\n", encode_transfers(&rows)?));
    }
    Ok(with_tables(
        presenter.render_combined(&combined),
        presenter.balance_table(&combined.participants.balances(), &combined.participants),
        presenter.transfer_table(&combined.transfers, &combined.participants),
    ))
}

fn with_tables(summary: String, balances: String, transfers: String) -> String {
    let mut out = format!("{summary}\n\n{balances}");
    if !transfers.is_empty() {
        out.push('\n');
        out.push_str(&transfers);
    }
    out
}

#[cfg(all(test, not(feature = "es")))]
mod tests {
    use super::*;
    use billsplit_domain::BalanceOptions;
    use billsplit_infrastructure::{decode_bill, load_payments};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use std::path::PathBuf;

    const TAPAS: &str = r##"{
        "id": "tapas",
        "name": "Tapas",
        "payerId": "p1",
        "total": 6,
        "participants": [
            {"id": "p1", "name": "Ana", "color": "#3b82f6"},
            {"id": "p2", "name": "Carlos", "color": "#10b981"},
            {"id": "p3", "name": "María", "color": "#f59e0b"}
        ],
        "items": [{
            "id": "i1",
            "description": "Bravas",
            "quantity": 1,
            "unitPrice": 6,
            "isShared": true,
            "claims": [
                {"participantId": "p1", "quantity": 1, "isShared": true},
                {"participantId": "p2", "quantity": 1, "isShared": true},
                {"participantId": "p3", "quantity": 1, "isShared": true}
            ]
        }]
    }"##;

    #[fixture]
    fn tapas() -> Bill {
        decode_bill(TAPAS, "tapas").unwrap()
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 22, 0, 0).unwrap()
    }

    fn config(payments_path: Option<PathBuf>) -> AppConfig {
        AppConfig {
            options: BalanceOptions::default(),
            currency: "€".into(),
            payments_path,
        }
    }

    fn args(json: bool, toggle: Option<(&str, &str)>) -> Args {
        Args {
            json,
            toggle: toggle.map(|(from, to)| (from.into(), to.into())),
            paths: Vec::new(),
        }
    }

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("billsplit-cli-{}-{name}.json", std::process::id()))
    }

    #[rstest]
    fn toggle_writes_payments_back(tapas: Bill, now: DateTime<Utc>) {
        let path = scratch_file("toggle");
        let store = InMemoryPaymentStore::new();

        let output = execute(
            &args(true, Some(("p3", "p1"))),
            &config(Some(path.clone())),
            &store,
            std::slice::from_ref(&tapas),
            now,
        )
        .unwrap();

        let saved = load_payments(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].from.as_str(), "p3");
        assert_eq!(saved[0].to.as_str(), "p1");
        assert!(saved[0].is_paid);
        assert_eq!(saved[0].paid_at, Some(now));
        assert_eq!(output.matches("\"isPaid\": true").count(), 1);
        assert_eq!(output.matches("\"isPaid\": false").count(), 1);
    }

    #[rstest]
    fn toggle_without_payments_file_only_lasts_the_run(tapas: Bill, now: DateTime<Utc>) {
        let store = InMemoryPaymentStore::new();

        let output = execute(
            &args(false, Some(("p2", "p1"))),
            &config(None),
            &store,
            std::slice::from_ref(&tapas),
            now,
        )
        .unwrap();

        assert!(output.contains("Carlos owes 2.00€ to Ana [paid]"));
        assert!(output.contains("María owes 2.00€ to Ana [pending]"));
        assert_eq!(store.records().len(), 1);
    }

    #[rstest]
    #[case::two_bills(2)]
    #[case::three_bills(3)]
    fn toggle_needs_exactly_one_bill(
        tapas: Bill,
        now: DateTime<Utc>,
        #[case] copies: usize,
    ) {
        let path = scratch_file(&format!("rejected-{copies}"));
        let store = InMemoryPaymentStore::new();
        let bills = vec![tapas; copies];

        let result = execute(
            &args(false, Some(("p3", "p1"))),
            &config(Some(path.clone())),
            &store,
            &bills,
            now,
        );

        assert!(matches!(result, Err(CliError::ToggleNeedsOneBill(n)) if n == copies));
        assert!(store.records().is_empty());
        assert!(!path.exists());
    }

    #[rstest]
    fn unknown_toggle_pair_is_an_error(tapas: Bill, now: DateTime<Utc>) {
        let store = InMemoryPaymentStore::new();
        let result = execute(
            &args(false, Some(("p1", "p2"))),
            &config(None),
            &store,
            std::slice::from_ref(&tapas),
            now,
        );
        assert!(matches!(result, Err(CliError::Settlement(_))));
    }

    #[rstest]
    fn several_bills_render_combined_text(tapas: Bill, now: DateTime<Utc>) {
        let mut second = tapas.clone();
        second.id = "cañas".into();
        second.name = "Cañas".into();

        let output = execute(
            &args(false, None),
            &config(None),
            &InMemoryPaymentStore::new(),
            &[tapas, second],
            now,
        )
        .unwrap();

        assert!(output.starts_with("Combined split: Tapas, Cañas\n\n"));
        assert!(output.contains("Carlos owes 4.00€ to Ana"));
        assert!(output.contains("Participant  Balance"));
        assert!(output.contains("From    To   Amount"));
    }
}
