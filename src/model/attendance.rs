use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::student::StudentProfile;

/// One subject row of the attendance report.
///
/// Numeric fields are `None` when the cell did not hold a parsable number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = "CS301")]
    pub subject: String,
    #[schema(example = "Dr. A. Sharma")]
    pub faculty_name: String,
    #[schema(example = "1234")]
    pub faculty_code: String,
    #[schema(example = 20)]
    pub total_classes: Option<u32>,
    #[schema(example = 2)]
    pub absents: Option<u32>,
    #[schema(example = 0)]
    pub excuses: Option<u32>,
    #[schema(example = 18)]
    pub presents: Option<u32>,
    #[schema(example = 90.0)]
    pub percentage: Option<f64>,
    #[schema(example = 90.0)]
    pub percentage_with_excuses: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentAttendance {
    pub student: StudentProfile,
    pub attendances: Vec<AttendanceRecord>,
}
