use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Ratings File
// ============================================================================

/// One instructor's rating snapshot as stored in the ratings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    #[serde(default)]
    pub avg_rating: f64,
    #[serde(default)]
    pub num_ratings: u32,
    #[serde(deserialize_with = "string_or_number")]
    pub legacy_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Opaque GraphQL node id
    pub id: String,
}

impl RatingRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Instructor display name -> rating, keyed by the exact catalog string.
///
/// A `BTreeMap` keeps the written file stable between runs.
pub type RatingsMapping = BTreeMap<String, RatingRecord>;

// ============================================================================
// Course Catalog
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseCatalog {
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructors: Option<Vec<String>>,
}

// ============================================================================
// GraphQL Wire Format
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NodeData {
    pub node: Option<TeacherNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub new_search: Option<NewSearch>,
}

#[derive(Debug, Deserialize)]
pub struct NewSearch {
    pub teachers: Option<TeacherConnection>,
}

#[derive(Debug, Deserialize)]
pub struct TeacherConnection {
    #[serde(default)]
    pub edges: Vec<TeacherEdge>,
}

#[derive(Debug, Deserialize)]
pub struct TeacherEdge {
    pub node: Option<TeacherNode>,
}

/// Teacher fields as the service returns them; most may be null
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherNode {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "legacy_id")]
    pub legacy_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avg_rating: Option<f64>,
    pub num_ratings: Option<u32>,
}

impl From<TeacherNode> for RatingRecord {
    fn from(node: TeacherNode) -> Self {
        RatingRecord {
            avg_rating: node.avg_rating.unwrap_or(0.0),
            num_ratings: node.num_ratings.unwrap_or(0),
            legacy_id: node.legacy_id.unwrap_or_default(),
            first_name: node.first_name.unwrap_or_default(),
            last_name: node.last_name.unwrap_or_default(),
            id: node.id.unwrap_or_default(),
        }
    }
}

/// The service reports legacy ids as numbers; the ratings file keeps strings
fn legacy_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    legacy_id(deserializer).map(Option::unwrap_or_default)
}
