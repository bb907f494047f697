use tracing::info;

use super::{PortalError, PortalSettings, Result, require, selectors};
use crate::browser::{BrowsingContext, Frame, Presence};

/// Resolves the portal shell frame that appears once the login went through.
///
/// If the shell never shows up while the login form is still on the page, the login is
/// reported as rejected rather than as a timeout.
pub async fn shell_frame(ctx: &dyn BrowsingContext, settings: &PortalSettings) -> Result<Frame> {
    let top = Frame::top();

    info!("waiting for portal shell frame");
    let presence = ctx
        .wait_for_selector(&top, selectors::SHELL_FRAME, settings.selector_timeout)
        .await?;

    if presence == Presence::TimedOut {
        if ctx.exists(&top, selectors::LOGIN_USERNAME).await? {
            return Err(PortalError::LoginRejected);
        }
        return Err(PortalError::Timeout {
            selector: selectors::SHELL_FRAME.to_string(),
        });
    }

    Ok(ctx.content_frame(&top, selectors::SHELL_FRAME).await?)
}

/// Clicks the shell navigation link titled `title`.
pub async fn navigate_to(
    ctx: &dyn BrowsingContext,
    shell: &Frame,
    title: &str,
    settings: &PortalSettings,
) -> Result<()> {
    info!(page = title, "navigating inside portal");
    let link = selectors::nav_link(title);
    require(ctx, shell, &link, settings.selector_timeout).await?;
    ctx.click(shell, &link).await?;
    Ok(())
}

/// Resolves the isolated work area nested in the shell, where the report lives.
pub async fn work_area_frame(
    ctx: &dyn BrowsingContext,
    shell: &Frame,
    settings: &PortalSettings,
) -> Result<Frame> {
    info!("waiting for work area frame");
    require(ctx, shell, selectors::WORK_AREA_FRAME, settings.selector_timeout).await?;
    Ok(ctx.content_frame(shell, selectors::WORK_AREA_FRAME).await?)
}
