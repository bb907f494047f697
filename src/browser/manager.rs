use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpConfig, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::browser::CloseParams;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::chromium::ChromiumContext;
use super::{Automation, BrowserError, BrowsingContext, Result};

const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub headless: bool,
    pub executable: Option<PathBuf>,
}

/// A launched browser with the task driving its devtools connection.
struct Launched<B> {
    browser: Arc<B>,
    handler: JoinHandle<()>,
}

impl<B> Launched<B> {
    /// The browser, unless its connection handler has stopped.
    fn live(&self) -> Option<Arc<B>> {
        (!self.handler.is_finished()).then(|| Arc::clone(&self.browser))
    }
}

/// The browser process shared by every request.
///
/// Launched on first use and reused while its connection is up; a browser whose
/// connection dropped is relaunched on the next request. Each request still gets its own
/// browser context through [`Automation::new_context`].
pub struct BrowserManager {
    settings: BrowserSettings,
    browser: Mutex<Option<Launched<Browser>>>,
}

impl BrowserManager {
    pub fn new(settings: BrowserSettings) -> Self {
        Self {
            settings,
            browser: Mutex::new(None),
        }
    }

    async fn browser(&self) -> Result<Arc<Browser>> {
        let mut guard = self.browser.lock().await;
        if let Some(launched) = guard.as_ref() {
            if let Some(browser) = launched.live() {
                return Ok(browser);
            }
            warn!("browser connection lost, relaunching");
        }

        info!("Launching browser");
        let mut builder = CdpConfig::builder().no_sandbox();
        builder = if self.settings.headless {
            builder.headless_mode(HeadlessMode::New)
        } else {
            builder.with_head()
        };
        if let Some(path) = &self.settings.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler event failed");
                }
            }
            debug!("browser handler finished");
        });

        let browser = Arc::new(browser);
        *guard = Some(Launched {
            browser: Arc::clone(&browser),
            handler: handler_task,
        });
        Ok(browser)
    }

    /// Closes the browser process if it was launched and is still connected.
    pub async fn shutdown(&self) {
        let Some(launched) = self.browser.lock().await.take() else {
            return;
        };
        let Some(browser) = launched.live() else {
            return;
        };

        info!("Stopping browser");
        match tokio::time::timeout(CLOSE_TIMEOUT, browser.execute(CloseParams::default())).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(error = %e, "browser did not close cleanly"),
            Err(_) => warn!("timed out closing browser"),
        }
    }
}

#[async_trait]
impl Automation for BrowserManager {
    async fn new_context(&self) -> Result<Box<dyn BrowsingContext>> {
        let browser = self.browser().await?;

        let context_id = browser
            .execute(CreateBrowserContextParams::default())
            .await?
            .result
            .browser_context_id;

        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(BrowserError::Launch)?;

        let page = match browser.new_page(target).await {
            Ok(page) => page,
            Err(e) => {
                // dispose the orphaned context
                let dispose = DisposeBrowserContextParams::new(context_id);
                if let Err(dispose_err) = browser.execute(dispose).await {
                    warn!(error = %dispose_err, "failed to dispose browser context");
                }
                return Err(e.into());
            }
        };

        debug!("browser context created");
        Ok(Box::new(ChromiumContext::new(browser, context_id, page)))
    }
}
