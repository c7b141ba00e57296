use clap::{Parser, Subcommand};
use kinoprobe::config::{ApiArgs, UiArgs};
use kinoprobe::scenarios::{self, Outcome};

/// kinoprobe: end-to-end and API probes for a movie database's advanced search
#[derive(Parser)]
#[command(name = "kinoprobe", version, about)]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    #[command(flatten)]
    ui: UiArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the search API scenarios
    Api {
        /// Run only the scenario with this name
        #[arg(long)]
        only: Option<String>,
    },
    /// Run the advanced search UI scenarios in Chrome
    Ui {
        /// Run only the scenario with this name
        #[arg(long)]
        only: Option<String>,
    },
    /// Run both suites
    All,
    /// Print scenario names
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr only, stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let outcomes = match cli.command {
        Command::List => {
            for name in scenarios::catalogue() {
                println!("{}", name);
            }
            return Ok(());
        }
        Command::Api { only } => {
            let config = cli.api.to_config()?;
            scenarios::run_api_suite(&config, only.as_deref()).await
        }
        Command::Ui { only } => {
            scenarios::run_ui_suite(&cli.ui.launch_options(), &cli.ui.site_url, only.as_deref())
                .await
        }
        Command::All => {
            let config = cli.api.to_config()?;
            let mut outcomes = scenarios::run_api_suite(&config, None).await;
            outcomes.extend(
                scenarios::run_ui_suite(&cli.ui.launch_options(), &cli.ui.site_url, None).await,
            );
            outcomes
        }
    };

    report(&outcomes)
}

fn report(outcomes: &[Outcome]) -> anyhow::Result<()> {
    for outcome in outcomes {
        println!("{}", outcome);
    }
    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    println!("{} passed, {} failed", outcomes.len() - failed, failed);

    if outcomes.is_empty() {
        anyhow::bail!("No scenario matched");
    }
    if failed > 0 {
        anyhow::bail!("{} scenario(s) failed", failed);
    }
    Ok(())
}
