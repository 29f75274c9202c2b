// Resume variants: discovery, output naming, freshness, and timestamp sync.
// Everything here is synchronous filesystem work; the export driver in `job`
// is the only consumer.

pub mod discovery;
pub mod drafts;
pub mod filename;
pub mod freshness;
pub mod timestamps;

use std::path::PathBuf;

pub use discovery::{discover_variants, RESUME_PDF_DIR};
pub use filename::FilenameResolver;
pub use freshness::{partition, Freshness, Partition};

/// A rendered resume page found under `<dist>/resume-pdf/<key>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeVariant {
    pub key: String,
    pub page_dir: PathBuf,
}

impl ResumeVariant {
    /// URL path of the rendered page, relative to the static server root.
    pub fn page_path(&self) -> String {
        format!("/{RESUME_PDF_DIR}/{}/", self.key)
    }

    /// Human label from the draft catalog, falling back to the key.
    pub fn label(&self) -> &str {
        drafts::label_for(&self.key).unwrap_or(&self.key)
    }
}

/// Everything the export driver needs to know about one variant for this run.
#[derive(Debug, Clone)]
pub struct VariantPlan {
    pub variant: ResumeVariant,
    /// `<resumes_dir>/<key>.json`, if it exists.
    pub source: Option<PathBuf>,
    pub output: PathBuf,
    pub decision: Freshness,
}

impl VariantPlan {
    pub fn output_filename(&self) -> String {
        self.output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
