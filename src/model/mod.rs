pub mod attendance;
pub mod report_filter;
pub mod student;
