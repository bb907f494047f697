use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};
use utoipa::ToSchema;

/// Academic years the report dropdown offers.
#[allow(non_camel_case_types)]
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, AsRefStr, EnumIter, Serialize, Deserialize, ToSchema,
)]
pub enum Year {
    Y20_21,
    Y21_22,
    Y22_23,
    Y23_24,
}

impl Year {
    /// Selector of this year's option in the opened year dropdown.
    pub fn selector_token(self) -> &'static str {
        match self {
            Year::Y20_21 => "#WD6C",
            Year::Y21_22 => "#WD6D",
            Year::Y22_23 => "#WD6E",
            Year::Y23_24 => "#WD6F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Year::Y20_21 => "2020-2021",
            Year::Y21_22 => "2021-2022",
            Year::Y22_23 => "2022-2023",
            Year::Y23_24 => "2023-2024",
        }
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, AsRefStr, EnumIter, Serialize, Deserialize, ToSchema,
)]
pub enum Session {
    Spring,
    Autumn,
}

impl Session {
    /// Selector of this session's option in the opened session dropdown.
    pub fn selector_token(self) -> &'static str {
        match self {
            Session::Spring => "#WD77",
            Session::Autumn => "#WD76",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ReportFilter {
    pub year: Year,
    pub session: Session,
}
