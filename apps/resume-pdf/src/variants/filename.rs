//! Output filename resolution.
//!
//! `<slug>-resume-<key>.pdf`, where the slug comes from `basics.name` in the
//! variant's source document. Any problem with the document falls back to a
//! fixed slug; a bad document never fails the run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::JobError;

/// Slug used when no display name can be read.
pub const DEFAULT_SLUG: &str = "jack-stehn";

/// Lowercases `name` and replaces each run of chars outside `[a-z0-9]` with a
/// single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug
}

/// Extracts the slug from raw document bytes.
/// Returns `None` when the bytes are not JSON, `basics.name` is missing or not a
/// string, or the name is empty. Duplicate keys resolve to the last value.
pub fn slug_from_document(bytes: &[u8]) -> Option<String> {
    let document: Value = serde_json::from_slice(bytes).ok()?;
    let name = document.pointer("/basics/name")?.as_str()?;
    let slug = slugify(name);
    (!slug.is_empty()).then_some(slug)
}

/// Maps variant keys to source documents and output filenames.
#[derive(Debug, Clone)]
pub struct FilenameResolver {
    resumes_dir: PathBuf,
    fallback_slug: String,
}

impl FilenameResolver {
    pub fn new(resumes_dir: impl Into<PathBuf>, fallback_slug: impl Into<String>) -> Self {
        Self {
            resumes_dir: resumes_dir.into(),
            fallback_slug: fallback_slug.into(),
        }
    }

    /// Returns `<resumes_dir>/<key>.json` if it exists as a file.
    /// Only absence is tolerated; any other metadata error is fatal.
    pub fn source_path(&self, key: &str) -> Result<Option<PathBuf>, JobError> {
        let path = self.resumes_dir.join(format!("{key}.json"));
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(Some(path)),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(JobError::io(&path, err)),
        }
    }

    /// Resolves the slug for a variant, falling back on any document problem.
    pub fn resolve_slug(&self, source: Option<&Path>) -> String {
        let Some(source) = source else {
            debug!("No source document, using fallback slug '{}'", self.fallback_slug);
            return self.fallback_slug.clone();
        };

        match fs::read(source) {
            Ok(bytes) => slug_from_document(&bytes).unwrap_or_else(|| {
                warn!(
                    "No usable basics.name in {}, using fallback slug '{}'",
                    source.display(),
                    self.fallback_slug
                );
                self.fallback_slug.clone()
            }),
            Err(err) => {
                warn!(
                    "Could not read {}: {err}; using fallback slug '{}'",
                    source.display(),
                    self.fallback_slug
                );
                self.fallback_slug.clone()
            }
        }
    }

    pub fn output_filename(&self, slug: &str, key: &str) -> String {
        format!("{slug}-resume-{key}.pdf")
    }
}
