//! Freshness evaluation.
//!
//! A variant is stale when its PDF is missing or its source document was
//! modified strictly after the PDF. Variants without a source document have no
//! reference time and are always stale.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::VariantPlan;
use crate::errors::JobError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    MissingArtifact,
    SourceNewer,
    NoSourceDocument,
    Forced,
}

/// Per-variant decision, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Regenerate(StaleReason),
    Skip,
}

impl Freshness {
    pub fn is_stale(&self) -> bool {
        matches!(self, Freshness::Regenerate(_))
    }
}

/// Decides whether `artifact` must be regenerated from `source`.
///
/// Only a missing artifact is tolerated; every other metadata error is fatal
/// because the decision would be based on a guess.
pub fn evaluate(
    source: Option<&Path>,
    artifact: &Path,
    force: bool,
) -> Result<Freshness, JobError> {
    if force {
        return Ok(Freshness::Regenerate(StaleReason::Forced));
    }

    let artifact_mtime = match fs::metadata(artifact) {
        Ok(metadata) => modified(&metadata, artifact)?,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Ok(Freshness::Regenerate(StaleReason::MissingArtifact))
        }
        Err(err) => return Err(JobError::io(artifact, err)),
    };

    let Some(source) = source else {
        return Ok(Freshness::Regenerate(StaleReason::NoSourceDocument));
    };

    let metadata = fs::metadata(source).map_err(|e| JobError::io(source, e))?;
    let source_mtime = modified(&metadata, source)?;

    debug!(
        "{}: source {} / artifact {}",
        artifact.display(),
        DateTime::<Utc>::from(source_mtime).to_rfc3339(),
        DateTime::<Utc>::from(artifact_mtime).to_rfc3339()
    );

    if source_mtime > artifact_mtime {
        Ok(Freshness::Regenerate(StaleReason::SourceNewer))
    } else {
        Ok(Freshness::Skip)
    }
}

fn modified(metadata: &fs::Metadata, path: &Path) -> Result<SystemTime, JobError> {
    metadata.modified().map_err(|e| JobError::io(path, e))
}

/// Variant plans split by decision, each side in discovery order.
#[derive(Debug, Default)]
pub struct Partition {
    pub stale: Vec<VariantPlan>,
    pub fresh: Vec<VariantPlan>,
}

pub fn partition(plans: Vec<VariantPlan>) -> Partition {
    let (stale, fresh): (Vec<_>, Vec<_>) =
        plans.into_iter().partition(|plan| plan.decision.is_stale());
    Partition { stale, fresh }
}
