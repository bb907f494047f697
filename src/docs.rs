use crate::model::attendance::{AttendanceRecord, StudentAttendance};
use crate::model::report_filter::{Session, Year};
use crate::model::student::StudentProfile;
use crate::models::{AttendanceOptions, AttendanceReqDto, OptionDto};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portal Attendance API",
        version = "0.1.0",
        description = r#"
## Student Portal Attendance

The university portal has no programmatic API, only a frame-nested, server-rendered UI.
This service logs into the portal with a headless browser on the student's behalf, opens
the **Student Attendance Details** report for the chosen academic year and session, and
returns the student's profile with one record per subject.

### Notes
- Credentials are used for one login and never stored or logged.
- Every request runs in its own isolated browser context.
- An empty `attendances` list means the portal has no attendance data yet for the
  selected period; it is not an error.
- Failures are reported as `{"error": "..."}`.
"#,
    ),
    paths(
        crate::api::attendance::get_attendance,
        crate::api::attendance::attendance_options,
    ),
    components(
        schemas(
            AttendanceReqDto,
            StudentAttendance,
            StudentProfile,
            AttendanceRecord,
            AttendanceOptions,
            OptionDto,
            Year,
            Session
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance report scraping"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_both_attendance_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/attendance"));
        assert!(doc.paths.paths.contains_key("/attendance/options"));
    }
}
