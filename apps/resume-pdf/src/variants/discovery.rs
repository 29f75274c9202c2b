use std::fs;
use std::path::Path;

use tracing::warn;

use super::ResumeVariant;
use crate::errors::JobError;

/// Subdirectory of the build output holding one directory per variant.
pub const RESUME_PDF_DIR: &str = "resume-pdf";

/// Lists the rendered variants under `<dist_dir>/resume-pdf`, sorted by key.
///
/// A missing `resume-pdf` directory means the site build did not run and is fatal.
/// Plain files are ignored; symlinked directories are followed.
pub fn discover_variants(dist_dir: &Path) -> Result<Vec<ResumeVariant>, JobError> {
    let root = dist_dir.join(RESUME_PDF_DIR);
    if !root.is_dir() {
        return Err(JobError::MissingRenderedOutput(root));
    }

    let mut variants = Vec::new();
    for entry in fs::read_dir(&root).map_err(|e| JobError::io(&root, e))? {
        let entry = entry.map_err(|e| JobError::io(&root, e))?;
        let path = entry.path();

        let metadata = fs::metadata(&path).map_err(|e| JobError::io(&path, e))?;
        if !metadata.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(key) => variants.push(ResumeVariant {
                key,
                page_dir: path,
            }),
            Err(name) => warn!("Skipping non-UTF-8 variant directory {name:?}"),
        }
    }

    variants.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(variants)
}
