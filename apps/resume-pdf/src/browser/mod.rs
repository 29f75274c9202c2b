//! Headless browser seam.
//!
//! The export driver only talks to `BrowserLauncher` / `BrowserSession`, so the
//! Chrome-backed implementation can be swapped for a fake in tests.

pub mod chrome;
pub mod page_format;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use chrome::ChromeLauncher;
pub use page_format::PageFormat;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("invalid browser configuration: {0}")]
    Config(String),

    #[error("browser failed to start: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("page event stream closed before the network went idle")]
    EventStreamClosed,

    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Print settings applied to every exported PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    pub format: PageFormat,
    pub print_background: bool,
    /// Uniform margin on all four sides, in inches.
    pub margin_in: f64,
}

impl ExportSettings {
    /// Edge-to-edge export with background graphics.
    pub fn full_bleed(format: PageFormat) -> Self {
        Self {
            format,
            print_background: true,
            margin_in: 0.0,
        }
    }
}

/// Acquires a browser session. Failure here is an environment limitation, not a
/// job failure: the caller degrades to a no-op run.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, LaunchError>;
}

/// A live browser with one page used for every export.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates to `url`, waits until network activity is idle, and writes the
    /// page as a PDF to `output`.
    async fn export_pdf(
        &mut self,
        url: &str,
        output: &Path,
        settings: &ExportSettings,
    ) -> Result<(), RenderError>;

    /// Releases the browser. Errors are logged, never returned.
    async fn close(self: Box<Self>);
}
