use billsplit_domain::ParticipantId;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(name = "billsplit")]
#[command(about = "Settle shared bills: balances, transfers and paid flags")]
pub struct Args {
    /// Print transfers as JSON instead of share text.
    #[arg(long)]
    pub json: bool,

    /// Flip the paid flag of the FROM:TO transfer before settling (one bill only).
    #[arg(long, value_name = "FROM:TO", value_parser = parse_pair)]
    pub toggle: Option<(ParticipantId, ParticipantId)>,

    /// Bill snapshot files; more than one settles them together.
    #[arg(required = true, value_name = "BILL")]
    pub paths: Vec<PathBuf>,
}

fn parse_pair(raw: &str) -> Result<(ParticipantId, ParticipantId), String> {
    match raw.split_once(':') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok((from.into(), to.into())),
        _ => Err(format!("expected FROM:TO (got `{raw}`)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("billsplit").chain(args.iter().copied()))
    }

    #[rstest]
    fn reads_flags_and_paths() {
        let args = parse(&["--json", "a.json", "--toggle", "p2:p1", "b.json"]).unwrap();
        assert_eq!(
            args,
            Args {
                json: true,
                toggle: Some(("p2".into(), "p1".into())),
                paths: vec!["a.json".into(), "b.json".into()],
            }
        );
    }

    #[rstest]
    fn toggle_accepts_equals_form() {
        let args = parse(&["--toggle=p3:p1", "a.json"]).unwrap();
        assert_eq!(args.toggle, Some(("p3".into(), "p1".into())));
        assert!(!args.json);
    }

    #[rstest]
    #[case::no_paths(&["--json"])]
    #[case::help(&["--help"])]
    #[case::unknown_flag(&["--verbose", "a.json"])]
    #[case::toggle_without_value(&["a.json", "--toggle"])]
    #[case::toggle_without_colon(&["--toggle", "p2", "a.json"])]
    #[case::toggle_empty_side(&["--toggle", ":p1", "a.json"])]
    fn rejects_bad_invocations(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }
}
