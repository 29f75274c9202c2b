mod browser;
mod config;
mod errors;
mod job;
mod server;
mod variants;

use std::process::ExitCode;

use anyhow::Result;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::browser::ChromeLauncher;
use crate::config::Config;
use crate::job::RunOutcome;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Malformed configuration aborts with status 1 before anything is touched.
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume PDF export v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Pages from {}, sources from {}, PDFs to {} ({} format)",
        config.dist_dir.display(),
        config.resumes_dir.display(),
        config.output_dir.display(),
        config.page_format
    );

    let launcher = ChromeLauncher::new(config.chrome_executable.clone());

    match job::run(&config, &launcher).await {
        Ok(RunOutcome::UpToDate { skipped }) => {
            info!("Nothing to do ({skipped} PDFs up to date)");
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::Generated { generated, skipped }) => {
            info!("Generated {} PDFs, {skipped} up to date", generated.len());
            Ok(ExitCode::SUCCESS)
        }
        Ok(RunOutcome::BrowserUnavailable { pending }) => {
            warn!("PDF generation skipped; {pending} PDFs remain stale");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("Error generating PDFs: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}
