use tracing::info;

use super::{PortalSettings, Result, require, selectors};
use crate::browser::{BrowsingContext, Frame};
use crate::model::report_filter::ReportFilter;

/// Picks the academic year and session in the report form and submits it.
///
/// An option that is not rendered for the chosen value surfaces as a timeout.
pub async fn submit_filter(
    ctx: &dyn BrowsingContext,
    frame: &Frame,
    filter: ReportFilter,
    settings: &PortalSettings,
) -> Result<()> {
    let timeout = settings.selector_timeout;

    require(ctx, frame, selectors::YEAR_DROPDOWN, timeout).await?;
    require(ctx, frame, selectors::SESSION_DROPDOWN, timeout).await?;
    require(ctx, frame, selectors::REPORT_SUBMIT, timeout).await?;

    info!(year = filter.year.label(), "selecting academic year");
    ctx.click(frame, selectors::YEAR_DROPDOWN).await?;
    let year = filter.year.selector_token();
    require(ctx, frame, year, timeout).await?;
    ctx.click(frame, year).await?;

    info!(session = filter.session.as_ref(), "selecting session");
    ctx.click(frame, selectors::SESSION_DROPDOWN).await?;
    let session = filter.session.selector_token();
    require(ctx, frame, session, timeout).await?;
    ctx.click(frame, session).await?;

    ctx.click(frame, selectors::REPORT_SUBMIT).await?;
    Ok(())
}
