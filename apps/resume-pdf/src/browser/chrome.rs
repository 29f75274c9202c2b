//! Chrome DevTools Protocol implementation of the browser seam.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::LoaderId;
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, NavigateParams, PrintToPdfParams, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::listeners::EventStream;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{BrowserLauncher, BrowserSession, ExportSettings, LaunchError, RenderError};

/// CDP lifecycle event emitted once a frame has had no network connections for 500ms.
const NETWORK_IDLE: &str = "networkIdle";

/// Launches a sandbox-less headless Chrome/Chromium.
pub struct ChromeLauncher {
    executable: Option<PathBuf>,
}

impl ChromeLauncher {
    /// `executable` overrides Chrome auto-detection.
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self { executable }
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, LaunchError> {
        let mut builder = BrowserConfig::builder().no_sandbox();
        if let Some(executable) = &self.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(LaunchError::Config)?;

        let (mut browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        match open_page(&browser).await {
            Ok(page) => Ok(Box::new(ChromeSession {
                browser,
                page,
                handler,
            })),
            Err(err) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after launch error: {close_err}");
                }
                handler.abort();
                Err(err.into())
            }
        }
    }
}

async fn open_page(browser: &Browser) -> Result<Page, chromiumoxide::error::CdpError> {
    let page = browser.new_page("about:blank").await?;
    page.execute(SetLifecycleEventsEnabledParams::new(true)).await?;
    Ok(page)
}

pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn export_pdf(
        &mut self,
        url: &str,
        output: &Path,
        settings: &ExportSettings,
    ) -> Result<(), RenderError> {
        // Subscribe before navigating so the idle event cannot be missed.
        let mut lifecycle = self.page.event_listener::<EventLifecycleEvent>().await?;

        let navigation = self.page.execute(NavigateParams::new(url)).await?;
        if let Some(reason) = navigation.result.error_text.clone() {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                reason,
            });
        }

        wait_for_network_idle(&mut lifecycle, navigation.result.loader_id.as_ref()).await?;
        debug!("Network idle for {url}");

        let pdf = self.page.pdf(print_params(settings)).await?;
        tokio::fs::write(output, pdf).await?;
        Ok(())
    }

    async fn close(self: Box<Self>) {
        let ChromeSession {
            mut browser,
            page,
            handler,
        } = *self;
        drop(page);

        if let Err(err) = browser.close().await {
            warn!("Failed to close browser: {err}");
        }
        if let Err(err) = browser.wait().await {
            warn!("Failed to wait for browser exit: {err}");
        }
        handler.abort();
    }
}

/// Suspends until the navigation identified by `loader` reports `networkIdle`.
/// No timeout: a page that never settles blocks the run.
async fn wait_for_network_idle(
    events: &mut EventStream<EventLifecycleEvent>,
    loader: Option<&LoaderId>,
) -> Result<(), RenderError> {
    while let Some(event) = events.next().await {
        if event.name != NETWORK_IDLE {
            continue;
        }
        if loader.map_or(true, |id| &event.loader_id == id) {
            return Ok(());
        }
    }
    Err(RenderError::EventStreamClosed)
}

fn print_params(settings: &ExportSettings) -> PrintToPdfParams {
    let (width, height) = settings.format.dimensions_in();
    PrintToPdfParams {
        print_background: Some(settings.print_background),
        paper_width: Some(width),
        paper_height: Some(height),
        margin_top: Some(settings.margin_in),
        margin_right: Some(settings.margin_in),
        margin_bottom: Some(settings.margin_in),
        margin_left: Some(settings.margin_in),
        prefer_css_page_size: Some(false),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::PageFormat;

    #[test]
    fn test_print_params_full_bleed_letter() {
        let params = print_params(&ExportSettings::full_bleed(PageFormat::Letter));
        assert_eq!(params.paper_width, Some(8.5));
        assert_eq!(params.paper_height, Some(11.0));
        assert_eq!(params.print_background, Some(true));
        for margin in [
            params.margin_top,
            params.margin_right,
            params.margin_bottom,
            params.margin_left,
        ] {
            assert_eq!(margin, Some(0.0));
        }
    }

    #[test]
    fn test_print_params_follow_format() {
        let params = print_params(&ExportSettings::full_bleed(PageFormat::A4));
        assert_eq!(params.paper_width, Some(8.27));
        assert_eq!(params.paper_height, Some(11.7));
    }
}
