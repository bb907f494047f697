use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::model::report_filter::{ReportFilter, Session, Year};
use crate::portal::Credentials;

/// Body of `POST /attendance`, as JSON or as a URL-encoded form.
#[derive(Deserialize, ToSchema)]
pub struct AttendanceReqDto {
    #[schema(example = "2105123")]
    pub username: Option<String>,
    #[schema(example = "secret", format = "password")]
    pub password: Option<String>,
    #[schema(example = "Y22_23")]
    pub year: Option<String>,
    #[schema(example = "Autumn")]
    pub session: Option<String>,
}

impl AttendanceReqDto {
    /// Checks the request before any automation starts.
    pub fn validate(self) -> Result<(Credentials, ReportFilter), ApiError> {
        let (Some(username), Some(password), Some(year), Some(session)) =
            (self.username, self.password, self.year, self.session)
        else {
            return Err(ApiError::invalid_request());
        };
        if username.trim().is_empty()
            || password.is_empty()
            || year.trim().is_empty()
            || session.trim().is_empty()
        {
            return Err(ApiError::invalid_request());
        }

        let year = Year::from_str(year.trim())
            .map_err(|_| ApiError::InvalidRequest(format!("unknown academic year '{year}'")))?;
        let session = Session::from_str(session.trim())
            .map_err(|_| ApiError::InvalidRequest(format!("unknown session '{session}'")))?;

        Ok((
            Credentials { username, password },
            ReportFilter { year, session },
        ))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionDto {
    #[schema(example = "Y22_23")]
    pub code: String,
    #[schema(example = "2022-2023")]
    pub label: String,
}

/// Codes accepted by `POST /attendance`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceOptions {
    pub years: Vec<OptionDto>,
    pub sessions: Vec<OptionDto>,
}
