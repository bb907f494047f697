//! Element selectors of the portal's server-rendered UI.

pub const LOGIN_USERNAME: &str = "#logonuidfield";
pub const LOGIN_PASSWORD: &str = "#logonpassfield";
pub const LOGIN_SUBMIT: &str = "input[name='uidPasswordLogon']";

pub const SHELL_FRAME: &str = "#ivuFrm_page0ivu4";
pub const WORK_AREA_FRAME: &str = "#isolatedWorkArea";

pub const ATTENDANCE_LINK_TITLE: &str = "Student Attendance Details";

pub const STUDENT_NAME: &str = "#WD2E";
pub const STUDENT_SCHOOL: &str = "#WD22";
pub const STUDENT_PROGRAM: &str = "#WD3A";
pub const STUDENT_SEMESTER: &str = "#WD3F";
pub const STUDENT_ROLL: &str = "#WD29";
pub const STUDENT_REGISTRATION: &str = "#WD35";
pub const STUDENT_PHOTO: &str = "#WD4F";

pub const YEAR_DROPDOWN: &str = "#WD5C-btn";
pub const SESSION_DROPDOWN: &str = "#WD74-btn";
pub const REPORT_SUBMIT: &str = "#WD81";

/// Header row of the attendance table (row type 2).
pub const HEADER_ROW: &str = "#WD84 tr[rt='2']";
/// Rows with `rr='0'` are placeholders the portal renders while loading or when empty.
pub const DATA_ROWS: &str = "#WD84 tr[rr]:not([rr='0'])";

/// Navigation link with the given title inside the portal shell.
pub fn nav_link(title: &str) -> String {
    format!(".urLnkDragRelate[title='{title}']")
}
