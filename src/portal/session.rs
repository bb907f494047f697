use tracing::info;

use super::{Credentials, PortalSettings, Result, require, selectors};
use crate::browser::{Automation, BrowsingContext, Frame};

/// Opens a fresh, isolated browsing context for one run. The caller owns closing it.
pub async fn open_context(automation: &dyn Automation) -> Result<Box<dyn BrowsingContext>> {
    info!("opening isolated browsing context");
    Ok(automation.new_context().await?)
}

/// Loads the portal and submits the login form.
///
/// Success is not checked here: a rejected login shows up when the portal shell never
/// appears (see [`super::frames::shell_frame`]).
pub async fn sign_in(
    ctx: &dyn BrowsingContext,
    settings: &PortalSettings,
    credentials: Credentials,
) -> Result<()> {
    let top = Frame::top();

    info!(url = %settings.url, "navigating to portal");
    ctx.goto(&settings.url).await?;

    info!("entering login details");
    require(ctx, &top, selectors::LOGIN_USERNAME, settings.selector_timeout).await?;
    ctx.type_text(&top, selectors::LOGIN_USERNAME, &credentials.username)
        .await?;
    ctx.type_text(&top, selectors::LOGIN_PASSWORD, &credentials.password)
        .await?;
    ctx.click(&top, selectors::LOGIN_SUBMIT).await?;

    Ok(())
}
