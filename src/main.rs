use chrono::Utc;
use clap::Parser;
use rss_digest::{
    load_config, Deliver, DigestRunner, FetchConfig, Fetcher, MailConfig, Result, RunSummary,
    SmtpMailer, StdoutMailer,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rss-digest", about = "Fetches RSS feeds and emails an HTML digest")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "rss_sources.json")]
    config: PathBuf,

    /// Print the rendered digest to stdout instead of sending mail
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(summary) => {
            info!(
                "Run complete: {} feeds attempted, {} failed, {} articles fetched, {} delivered",
                summary.feeds_attempted,
                summary.feeds_failed,
                summary.articles_fetched,
                summary.articles_selected,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Digest run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<RunSummary> {
    let config = load_config(&cli.config)?;
    let fetcher = Fetcher::new(FetchConfig::default())?;

    let mailer: Box<dyn Deliver> = if cli.dry_run {
        Box::new(StdoutMailer)
    } else {
        Box::new(SmtpMailer::new(MailConfig::from_env()?))
    };

    let runner = DigestRunner::new(config, fetcher, mailer.as_ref());
    runner.run(Utc::now()).await
}
