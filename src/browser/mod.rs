//! Headless browser capability consumed by the portal pipeline.
//!
//! The pipeline only speaks in terms of [`Automation`] and [`BrowsingContext`]; the
//! chromium-backed implementation lives in [`chromium`] and the shared browser process
//! in [`manager`].

pub mod chromium;
pub mod error;
pub mod manager;

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep};

pub use error::{BrowserError, Result};
pub use manager::BrowserManager;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A document inside a page, named by the chain of frame-element selectors leading to it
/// from the top-level document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    path: Vec<String>,
}

impl Frame {
    /// The page's own document.
    pub fn top() -> Self {
        Self::default()
    }

    /// The document nested in the frame element matched by `selector` inside this one.
    pub fn child(&self, selector: &str) -> Self {
        let mut path = self.path.clone();
        path.push(selector.to_string());
        Self { path }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}

/// Outcome of a bounded wait for a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Found,
    TimedOut,
}

/// Source of isolated browsing contexts. Contexts never share cookies or storage.
#[async_trait]
pub trait Automation: Send + Sync {
    async fn new_context(&self) -> Result<Box<dyn BrowsingContext>>;
}

/// One isolated browsing context holding a single page.
#[async_trait]
pub trait BrowsingContext: Send + Sync {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Whether `selector` currently matches inside `frame`. A frame chain that cannot be
    /// resolved yet counts as "no match".
    async fn exists(&self, frame: &Frame, selector: &str) -> Result<bool>;

    async fn text(&self, frame: &Frame, selector: &str) -> Result<Option<String>>;

    async fn attribute(&self, frame: &Frame, selector: &str, name: &str)
    -> Result<Option<String>>;

    async fn click(&self, frame: &Frame, selector: &str) -> Result<()>;

    async fn type_text(&self, frame: &Frame, selector: &str, text: &str) -> Result<()>;

    /// Resolves the document nested in the frame element matched by `selector`.
    async fn content_frame(&self, frame: &Frame, selector: &str) -> Result<Frame>;

    /// Text content of every cell of every row matching `row_selector`, in document order.
    async fn row_cells(&self, frame: &Frame, row_selector: &str) -> Result<Vec<Vec<String>>>;

    /// Disposes the page and its browsing context.
    async fn close(self: Box<Self>) -> Result<()>;

    async fn wait_for_selector(
        &self,
        frame: &Frame,
        selector: &str,
        timeout: Duration,
    ) -> Result<Presence> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.exists(frame, selector).await? {
                return Ok(Presence::Found);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(Presence::TimedOut);
            }
            sleep(POLL_INTERVAL.min(deadline - now)).await;
        }
    }
}
