//! Automation of the student portal: login, frame traversal, report selection and
//! scraping of the attendance table.

pub mod columns;
pub mod frames;
pub mod profile;
pub mod report;
pub mod selectors;
pub mod session;
pub mod table;

#[cfg(test)]
pub(crate) mod fake;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use actix_web::rt;
use derive_more::{Display, From};
use tracing::{Instrument, info, instrument, warn};
use uuid::Uuid;

use crate::browser::{Automation, BrowserError, BrowsingContext, Frame, Presence};
use crate::model::attendance::StudentAttendance;
use crate::model::report_filter::ReportFilter;

#[derive(Debug, Clone)]
pub struct PortalSettings {
    pub url: String,
    /// Bound for every wait on a selector.
    pub selector_timeout: Duration,
    /// Bound for the attendance rows to show up before the table counts as empty.
    pub rows_timeout: Duration,
}

/// Portal login. Lives only until the login form has been submitted.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"<redacted>")
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Display, From)]
pub enum PortalError {
    #[display(fmt = "timed out waiting for '{}'", selector)]
    #[from(ignore)]
    Timeout { selector: String },

    #[display(fmt = "the portal rejected the credentials")]
    #[from(ignore)]
    LoginRejected,

    #[display(fmt = "unknown attendance column {} '{}'", position, header)]
    #[from(ignore)]
    UnknownColumn { position: usize, header: String },

    #[display(fmt = "attendance table has no '{}' column", field)]
    #[from(ignore)]
    MissingColumn { field: &'static str },

    #[display(fmt = "attendance table has more than one '{}' column", field)]
    #[from(ignore)]
    DuplicateColumn { field: &'static str },

    #[display(fmt = "attendance header has {} cells", found)]
    #[from(ignore)]
    HeaderTooShort { found: usize },

    #[display(fmt = "attendance run aborted: {}", _0)]
    #[from(ignore)]
    Aborted(String),

    #[display(fmt = "{}", _0)]
    Browser(BrowserError),
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortalError::Browser(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;

/// Waits for `selector` inside `frame`, failing once `timeout` elapses.
pub(crate) async fn require(
    ctx: &dyn BrowsingContext,
    frame: &Frame,
    selector: &str,
    timeout: Duration,
) -> Result<()> {
    match ctx.wait_for_selector(frame, selector, timeout).await? {
        Presence::Found => Ok(()),
        Presence::TimedOut => Err(PortalError::Timeout {
            selector: selector.to_string(),
        }),
    }
}

/// Logs into the portal with `credentials` and scrapes the attendance report selected by
/// `filter`.
///
/// The run happens on its own task together with closing its browsing context, so the
/// context is released even when the caller stops waiting. A failure at any step aborts
/// the run; nothing partial is returned.
#[instrument(
    name = "attendance_run",
    skip_all,
    fields(
        run_id = %Uuid::new_v4(),
        year = filter.year.as_ref(),
        session = filter.session.as_ref(),
    )
)]
pub async fn fetch_attendance(
    automation: Arc<dyn Automation>,
    settings: PortalSettings,
    credentials: Credentials,
    filter: ReportFilter,
) -> Result<StudentAttendance> {
    let task = async move {
        let context = session::open_context(automation.as_ref()).await?;

        let outcome = run(context.as_ref(), &settings, credentials, filter).await;

        if let Err(e) = context.close().await {
            warn!(error = %e, "failed to close browsing context");
        }
        outcome
    };

    let outcome = match rt::spawn(task.in_current_span()).await {
        Ok(outcome) => outcome,
        Err(e) => Err(PortalError::Aborted(e.to_string())),
    };

    match &outcome {
        Ok(attendance) => info!(records = attendance.attendances.len(), "attendance fetched"),
        Err(e) => warn!(error = %e, "attendance run failed"),
    }
    outcome
}

async fn run(
    ctx: &dyn BrowsingContext,
    settings: &PortalSettings,
    credentials: Credentials,
    filter: ReportFilter,
) -> Result<StudentAttendance> {
    session::sign_in(ctx, settings, credentials).await?;

    let shell = frames::shell_frame(ctx, settings).await?;
    frames::navigate_to(ctx, &shell, selectors::ATTENDANCE_LINK_TITLE, settings).await?;
    let work_area = frames::work_area_frame(ctx, &shell, settings).await?;

    let student = profile::extract_profile(ctx, &work_area, settings).await?;

    report::submit_filter(ctx, &work_area, filter, settings).await?;

    let mapping = columns::resolve_columns(ctx, &work_area, settings).await?;
    let attendances = table::extract_records(ctx, &work_area, &mapping, settings).await?;

    Ok(StudentAttendance {
        student,
        attendances,
    })
}
