//! Incremental PDF export run.
//!
//! Scan → plan → (nothing stale? done) → server + browser → export each stale
//! variant in discovery order → release browser → release server.
//!
//! The server and browser are only acquired once at least one variant is stale,
//! and both are released on every path out of the export loop.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::browser::{BrowserLauncher, BrowserSession, ExportSettings};
use crate::config::Config;
use crate::errors::JobError;
use crate::server::StaticServer;
use crate::variants::{
    discover_variants, freshness, partition, timestamps, FilenameResolver, Partition,
    ResumeVariant, VariantPlan,
};

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No variant was stale; no server or browser was started.
    UpToDate { skipped: usize },
    /// Every stale variant was exported, in discovery order.
    Generated {
        generated: Vec<PathBuf>,
        skipped: usize,
    },
    /// The browser could not be launched; nothing was written.
    BrowserUnavailable { pending: usize },
}

/// Runs the whole job against `config`, acquiring browsers through `launcher`.
pub async fn run(
    config: &Config,
    launcher: &dyn BrowserLauncher,
) -> Result<RunOutcome, JobError> {
    let variants = discover_variants(&config.dist_dir)?;
    info!("Found {} resume drafts", variants.len());

    let resolver = FilenameResolver::new(&config.resumes_dir, &config.fallback_slug);
    let plans = plan_variants(variants, &resolver, &config.output_dir, config.force)?;
    let Partition { stale, fresh } = partition(plans);

    for plan in &fresh {
        info!("Skipping {}: {} is up to date", plan.variant.key, plan.output_filename());
    }
    let skipped = fresh.len();

    if stale.is_empty() {
        info!("All PDFs are up to date.");
        return Ok(RunOutcome::UpToDate { skipped });
    }
    info!("{} of {} PDFs need regeneration", stale.len(), stale.len() + skipped);

    let server = StaticServer::start(&config.dist_dir, config.port).await?;
    let result = export_with_browser(
        launcher,
        &server.base_url(),
        &stale,
        &config.output_dir,
        &config.export_settings(),
    )
    .await;
    server.shutdown().await;

    match result? {
        Some(generated) => {
            info!("All PDFs generated successfully!");
            Ok(RunOutcome::Generated { generated, skipped })
        }
        None => Ok(RunOutcome::BrowserUnavailable {
            pending: stale.len(),
        }),
    }
}

/// Resolves source, output path and freshness for every variant.
pub fn plan_variants(
    variants: Vec<ResumeVariant>,
    resolver: &FilenameResolver,
    output_dir: &Path,
    force: bool,
) -> Result<Vec<VariantPlan>, JobError> {
    variants
        .into_iter()
        .map(|variant| {
            let source = resolver.source_path(&variant.key)?;
            let slug = resolver.resolve_slug(source.as_deref());
            let output = output_dir.join(resolver.output_filename(&slug, &variant.key));
            let decision = freshness::evaluate(source.as_deref(), &output, force)?;
            debug!("{}: {decision:?}", variant.key);
            Ok(VariantPlan {
                variant,
                source,
                output,
                decision,
            })
        })
        .collect()
}

/// Returns `Ok(None)` when the browser cannot be launched.
async fn export_with_browser(
    launcher: &dyn BrowserLauncher,
    base_url: &str,
    stale: &[VariantPlan],
    output_dir: &Path,
    settings: &ExportSettings,
) -> Result<Option<Vec<PathBuf>>, JobError> {
    info!("Launching browser...");
    let mut session = match launcher.launch().await {
        Ok(session) => session,
        Err(err) => {
            warn!("Could not launch headless browser. Skipping PDF generation.");
            warn!(
                "This is expected in environments that lack Chrome system dependencies, \
                 such as static hosting build images."
            );
            warn!("{err}");
            return Ok(None);
        }
    };

    let result = export_all(session.as_mut(), base_url, stale, output_dir, settings).await;
    session.close().await;
    result.map(Some)
}

/// Exports each stale variant in order. The first failure aborts the rest.
async fn export_all(
    session: &mut dyn BrowserSession,
    base_url: &str,
    stale: &[VariantPlan],
    output_dir: &Path,
    settings: &ExportSettings,
) -> Result<Vec<PathBuf>, JobError> {
    fs::create_dir_all(output_dir).map_err(|e| JobError::io(output_dir, e))?;

    let mut generated = Vec::with_capacity(stale.len());
    for plan in stale {
        let variant = &plan.variant;
        info!("Generating PDF for {} ({})...", variant.label(), variant.key);

        let url = format!("{base_url}{}", variant.page_path());
        debug!("Navigating to {url} (served from {})", variant.page_dir.display());
        session
            .export_pdf(&url, &plan.output, settings)
            .await
            .map_err(|source| JobError::Export {
                variant: variant.key.clone(),
                source,
            })?;

        if let Some(source) = &plan.source {
            timestamps::sync_to_source(source, &plan.output)?;
        }

        info!("✓ Saved {}", plan.output_filename());
        generated.push(plan.output.clone());
    }
    Ok(generated)
}
