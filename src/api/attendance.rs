use actix_web::{HttpResponse, Responder, web};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use crate::browser::Automation;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::report_filter::{Session, Year};
use crate::models::{AttendanceOptions, AttendanceReqDto, OptionDto};
use crate::portal;

/// Fetch a student's attendance report from the portal
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = AttendanceReqDto,
    responses(
        (status = 200, description = "Profile and attendance records", body = crate::model::attendance::StudentAttendance),
        (status = 400, description = "Missing field or unknown year/session code", body = Object, example = json!({
            "error": "invalid request"
        })),
        (status = 401, description = "The portal rejected the credentials", body = Object, example = json!({
            "error": "the portal rejected the credentials"
        })),
        (status = 429, description = "Too many requests"),
        (status = 502, description = "Portal automation failed", body = Object, example = json!({
            "error": "timed out waiting for '#WD2E'"
        })),
        (status = 503, description = "Browser unavailable")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_request", skip_all)]
pub async fn get_attendance(
    payload: web::Either<web::Json<AttendanceReqDto>, web::Form<AttendanceReqDto>>,
    automation: web::Data<dyn Automation>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let payload = match payload {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    let (credentials, filter) = payload.validate()?;
    info!(year = filter.year.as_ref(), session = filter.session.as_ref(), "attendance requested");

    let attendance = portal::fetch_attendance(
        automation.into_inner(),
        config.portal_settings(),
        credentials,
        filter,
    )
    .await?;

    Ok(HttpResponse::Ok().json(attendance))
}

/// List the accepted academic year and session codes
#[utoipa::path(
    get,
    path = "/attendance/options",
    responses(
        (status = 200, description = "Year and session codes with labels", body = AttendanceOptions)
    ),
    tag = "Attendance"
)]
pub async fn attendance_options() -> impl Responder {
    let years = Year::iter()
        .map(|year| OptionDto {
            code: year.as_ref().to_string(),
            label: year.label().to_string(),
        })
        .collect();
    let sessions = Session::iter()
        .map(|session| OptionDto {
            code: session.as_ref().to_string(),
            label: session.as_ref().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(AttendanceOptions { years, sessions })
}
