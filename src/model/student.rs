use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity fields as the portal renders them. Values are passed through untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StudentProfile {
    #[schema(example = "ANANYA ROY")]
    pub name: String,

    #[schema(example = "School of Computer Engineering")]
    pub school: String,

    #[schema(example = "B.Tech")]
    pub program: String,

    #[schema(example = "5")]
    pub semester: String,

    #[serde(rename = "rollno")]
    #[schema(example = "2105123")]
    pub roll_number: String,

    /// Empty when the portal has not assigned one yet.
    #[serde(rename = "regno")]
    #[schema(example = "")]
    pub registration_number: String,

    #[serde(rename = "img")]
    #[schema(example = "/webdynpro/resources/photo/2105123.jpg")]
    pub photo_reference: String,
}
