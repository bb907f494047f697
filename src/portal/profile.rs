use futures::future::try_join_all;
use tracing::info;

use super::{PortalSettings, Result, require, selectors};
use crate::browser::{BrowserError, BrowsingContext, Frame};
use crate::model::student::StudentProfile;

const PROFILE_FIELDS: [&str; 7] = [
    selectors::STUDENT_NAME,
    selectors::STUDENT_SCHOOL,
    selectors::STUDENT_PROGRAM,
    selectors::STUDENT_SEMESTER,
    selectors::STUDENT_ROLL,
    selectors::STUDENT_REGISTRATION,
    selectors::STUDENT_PHOTO,
];

/// Reads the student's identity block from the work area.
///
/// Every field is awaited before the first read, so a slow page fails on one timeout
/// instead of yielding a half-read profile.
pub async fn extract_profile(
    ctx: &dyn BrowsingContext,
    frame: &Frame,
    settings: &PortalSettings,
) -> Result<StudentProfile> {
    info!("extracting student details");

    try_join_all(
        PROFILE_FIELDS
            .iter()
            .map(|selector| require(ctx, frame, selector, settings.selector_timeout)),
    )
    .await?;

    let photo_reference = ctx
        .attribute(frame, selectors::STUDENT_PHOTO, "src")
        .await?
        .unwrap_or_default();

    Ok(StudentProfile {
        name: read_text(ctx, frame, selectors::STUDENT_NAME).await?,
        school: read_text(ctx, frame, selectors::STUDENT_SCHOOL).await?,
        program: read_text(ctx, frame, selectors::STUDENT_PROGRAM).await?,
        semester: read_text(ctx, frame, selectors::STUDENT_SEMESTER).await?,
        roll_number: read_text(ctx, frame, selectors::STUDENT_ROLL).await?,
        registration_number: read_text(ctx, frame, selectors::STUDENT_REGISTRATION).await?,
        photo_reference,
    })
}

async fn read_text(ctx: &dyn BrowsingContext, frame: &Frame, selector: &str) -> Result<String> {
    let text = ctx.text(frame, selector).await?;
    text.ok_or_else(|| {
        BrowserError::ElementNotFound {
            selector: selector.to_string(),
        }
        .into()
    })
}
