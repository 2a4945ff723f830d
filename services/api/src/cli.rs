use crate::demo::{run_demo, DemoArgs};
use crate::score::{run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Eligibility",
    about = "Score loan applications and run the eligibility service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single financial profile and print the factor breakdown
    Score(ScoreArgs),
    /// Walk sample applications through intake, scoring, and staff review
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["loan-eligibility-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_accepts_inline_profile_flags() {
        let cli = Cli::try_parse_from([
            "loan-eligibility-api",
            "score",
            "--applicant-income",
            "8000",
            "--loan-amount",
            "200000",
            "--loan-term-months",
            "360",
            "--property-value",
            "400000",
            "--married",
            "Yes",
            "--education",
            "Graduate",
            "--employment-type",
            "Salaried",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert!(args.file.is_none());
                assert_eq!(args.profile.loan_term_months, Some(360));
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn score_requires_profile_source() {
        assert!(Cli::try_parse_from(["loan-eligibility-api", "score"]).is_err());
    }

    #[test]
    fn annual_rate_overrides_are_range_checked() {
        for raw in ["--annual-rate=-1", "--annual-rate=5"] {
            let score = Cli::try_parse_from([
                "loan-eligibility-api",
                "score",
                "--file",
                "profile.json",
                raw,
            ]);
            assert!(score.is_err(), "score accepted {raw}");

            let demo = Cli::try_parse_from(["loan-eligibility-api", "demo", raw]);
            assert!(demo.is_err(), "demo accepted {raw}");
        }

        let cli = Cli::try_parse_from([
            "loan-eligibility-api",
            "score",
            "--file",
            "profile.json",
            "--annual-rate",
            "0.065",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Score(args)) => assert_eq!(args.annual_rate, Some(0.065)),
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn file_conflicts_with_inline_profile_flags() {
        let cli = Cli::try_parse_from([
            "loan-eligibility-api",
            "score",
            "--file",
            "profile.json",
            "--loan-amount",
            "200000",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn demo_parses_status_policy() {
        let cli = Cli::try_parse_from(["loan-eligibility-api", "demo", "--policy", "preserve_review"])
            .expect("parses");
        assert!(matches!(cli.command, Some(Command::Demo(_))));
    }
}
