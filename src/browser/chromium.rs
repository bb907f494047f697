use std::sync::Arc;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::target::DisposeBrowserContextParams;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{BrowserError, BrowsingContext, Frame, Result};

/// A chromium browser context with its single page.
///
/// Every element operation is an evaluated script that first walks the frame chain through
/// `contentDocument`, so frames are re-resolved on each call and never cached.
pub struct ChromiumContext {
    browser: Arc<Browser>,
    context_id: BrowserContextId,
    page: Page,
}

impl ChromiumContext {
    pub fn new(browser: Arc<Browser>, context_id: BrowserContextId, page: Page) -> Self {
        Self {
            browser,
            context_id,
            page,
        }
    }

    async fn eval<T: DeserializeOwned>(&self, script: String) -> Result<T> {
        let result = self.page.evaluate(script).await?;
        let value = result.value().cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|e| BrowserError::Script(e.to_string()))
    }
}

/// Quotes `s` as a JavaScript string literal.
fn js_str(s: &str) -> String {
    Value::from(s).to_string()
}

/// Wraps `body` so that it runs with `doc` bound to the document `frame` names.
/// `unresolved` is evaluated instead when a link of the chain has no document yet.
fn in_frame(frame: &Frame, unresolved: &str, body: &str) -> String {
    let path = Value::from(frame.path().to_vec());
    format!(
        r#"(() => {{
    let doc = document;
    for (const sel of {path}) {{
        const host = doc.querySelector(sel);
        const next = host && host.contentDocument;
        if (!next) {{ {unresolved} }}
        doc = next;
    }}
    {body}
}})()"#
    )
}

const THROW_UNRESOLVED: &str = "throw new Error('frame not resolved: ' + sel);";

#[async_trait]
impl BrowsingContext for ChromiumContext {
    async fn goto(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page.goto(url).await?;
        Ok(())
    }

    async fn exists(&self, frame: &Frame, selector: &str) -> Result<bool> {
        let body = format!("return doc.querySelector({}) !== null;", js_str(selector));
        self.eval(in_frame(frame, "return false;", &body)).await
    }

    async fn text(&self, frame: &Frame, selector: &str) -> Result<Option<String>> {
        let body = format!(
            "const el = doc.querySelector({}); return el ? el.textContent : null;",
            js_str(selector)
        );
        self.eval(in_frame(frame, THROW_UNRESOLVED, &body)).await
    }

    async fn attribute(
        &self,
        frame: &Frame,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>> {
        let body = format!(
            "const el = doc.querySelector({}); return el ? el.getAttribute({}) : null;",
            js_str(selector),
            js_str(name)
        );
        self.eval(in_frame(frame, THROW_UNRESOLVED, &body)).await
    }

    async fn click(&self, frame: &Frame, selector: &str) -> Result<()> {
        let body = format!(
            r#"const el = doc.querySelector({});
    if (!el) return false;
    for (const type of ['mousedown', 'mouseup', 'click']) {{
        el.dispatchEvent(new MouseEvent(type, {{ bubbles: true, cancelable: true, view: doc.defaultView }}));
    }}
    return true;"#,
            js_str(selector)
        );
        let clicked: bool = self.eval(in_frame(frame, THROW_UNRESOLVED, &body)).await?;
        if !clicked {
            return Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn type_text(&self, frame: &Frame, selector: &str, text: &str) -> Result<()> {
        let body = format!(
            r#"const el = doc.querySelector({});
    if (!el) return false;
    el.focus();
    el.value = (el.value || '') + {};
    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
    return true;"#,
            js_str(selector),
            js_str(text)
        );
        let typed: bool = self.eval(in_frame(frame, THROW_UNRESOLVED, &body)).await?;
        if !typed {
            return Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        Ok(())
    }

    async fn content_frame(&self, frame: &Frame, selector: &str) -> Result<Frame> {
        let body = format!(
            "const el = doc.querySelector({}); return !!(el && el.contentDocument);",
            js_str(selector)
        );
        let resolved: bool = self.eval(in_frame(frame, "return false;", &body)).await?;
        if !resolved {
            return Err(BrowserError::NotAFrame {
                selector: selector.to_string(),
            });
        }
        Ok(frame.child(selector))
    }

    async fn row_cells(&self, frame: &Frame, row_selector: &str) -> Result<Vec<Vec<String>>> {
        let body = format!(
            r#"return Array.from(doc.querySelectorAll({})).map(row =>
        Array.from(row.cells || []).map(cell => cell.textContent ?? ''));"#,
            js_str(row_selector)
        );
        self.eval(in_frame(frame, THROW_UNRESOLVED, &body)).await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let ChromiumContext {
            browser,
            context_id,
            page,
        } = *self;

        let closed_page = page.close().await;
        if let Err(e) = &closed_page {
            warn!(error = %e, "failed to close page, disposing its context anyway");
        }
        browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await?;
        closed_page.map_err(BrowserError::from)
    }
}
