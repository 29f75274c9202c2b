use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::browser::{ExportSettings, PageFormat};
use crate::variants::filename::DEFAULT_SLUG;

const DEFAULT_PORT: u16 = 3000;

/// Job configuration loaded from environment variables.
/// Every setting has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site build output; must contain `resume-pdf/<key>/`.
    pub dist_dir: PathBuf,
    /// Source documents, one `<key>.json` per variant.
    pub resumes_dir: PathBuf,
    /// Where PDFs are written.
    pub output_dir: PathBuf,
    pub port: u16,
    pub page_format: PageFormat,
    pub fallback_slug: String,
    /// Regenerate every variant regardless of timestamps.
    pub force: bool,
    pub chrome_executable: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let root = PathBuf::from(lookup("PDF_PROJECT_ROOT").unwrap_or_else(|| ".".to_string()));
        let dir = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        Ok(Config {
            dist_dir: dir("PDF_DIST_DIR", root.join("dist")),
            resumes_dir: dir("PDF_RESUMES_DIR", root.join("src").join("data").join("resumes")),
            output_dir: dir("PDF_OUTPUT_DIR", root.join("public").join("resumes")),
            port: match lookup("PDF_SERVER_PORT") {
                Some(port) => port
                    .parse::<u16>()
                    .context("PDF_SERVER_PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            page_format: match lookup("PDF_PAGE_FORMAT") {
                Some(format) => format
                    .parse::<PageFormat>()
                    .map_err(anyhow::Error::msg)
                    .context("PDF_PAGE_FORMAT is invalid")?,
                None => PageFormat::default(),
            },
            fallback_slug: lookup("PDF_FALLBACK_SLUG")
                .filter(|slug| !slug.is_empty())
                .unwrap_or_else(|| DEFAULT_SLUG.to_string()),
            force: match lookup("PDF_FORCE") {
                Some(flag) => parse_flag(&flag).context("PDF_FORCE must be true or false")?,
                None => false,
            },
            chrome_executable: lookup("CHROME_EXECUTABLE").map(PathBuf::from),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings::full_bleed(self.page_format)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        other => anyhow::bail!("unrecognized flag value '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.dist_dir, Path::new(".").join("dist"));
        assert_eq!(config.resumes_dir, Path::new("./src/data/resumes"));
        assert_eq!(config.output_dir, Path::new("./public/resumes"));
        assert_eq!(config.port, 3000);
        assert_eq!(config.page_format, PageFormat::Letter);
        assert_eq!(config.fallback_slug, "jack-stehn");
        assert!(!config.force);
        assert!(config.chrome_executable.is_none());
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_project_root_moves_all_directories() {
        let config = config_from(&[("PDF_PROJECT_ROOT", "/srv/site")]).unwrap();
        assert_eq!(config.dist_dir, Path::new("/srv/site/dist"));
        assert_eq!(config.resumes_dir, Path::new("/srv/site/src/data/resumes"));
        assert_eq!(config.output_dir, Path::new("/srv/site/public/resumes"));
    }

    #[test]
    fn test_explicit_overrides() {
        let config = config_from(&[
            ("PDF_PROJECT_ROOT", "/srv/site"),
            ("PDF_OUTPUT_DIR", "/tmp/pdfs"),
            ("PDF_SERVER_PORT", "4321"),
            ("PDF_PAGE_FORMAT", "A4"),
            ("PDF_FALLBACK_SLUG", "resume"),
            ("PDF_FORCE", "true"),
            ("CHROME_EXECUTABLE", "/usr/bin/chromium"),
        ])
        .unwrap();
        assert_eq!(config.dist_dir, Path::new("/srv/site/dist"));
        assert_eq!(config.output_dir, Path::new("/tmp/pdfs"));
        assert_eq!(config.port, 4321);
        assert_eq!(config.page_format, PageFormat::A4);
        assert_eq!(config.fallback_slug, "resume");
        assert!(config.force);
        assert_eq!(
            config.chrome_executable.as_deref(),
            Some(Path::new("/usr/bin/chromium"))
        );
    }

    #[test]
    fn test_empty_fallback_slug_uses_default() {
        let config = config_from(&[("PDF_FALLBACK_SLUG", "")]).unwrap();
        assert_eq!(config.fallback_slug, DEFAULT_SLUG);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PDF_SERVER_PORT", "http")]).is_err());
        assert!(config_from(&[("PDF_SERVER_PORT", "70000")]).is_err());
        assert!(config_from(&[("PDF_PAGE_FORMAT", "folio")]).is_err());
        assert!(config_from(&[("PDF_FORCE", "sometimes")]).is_err());
    }

    #[test]
    fn test_export_settings_are_full_bleed() {
        let config = config_from(&[("PDF_PAGE_FORMAT", "legal")]).unwrap();
        let settings = config.export_settings();
        assert_eq!(settings.format, PageFormat::Legal);
        assert_eq!(settings.margin_in, 0.0);
        assert!(settings.print_background);
    }
}
