use std::time::Duration;

// ============================================================================
// Ratings Service
// ============================================================================

/// GraphQL endpoint of the ratings service
pub const DEFAULT_ENDPOINT: &str = "https://www.ratemyprofessors.com/graphql";

/// Encoded institution id that scopes name searches ("School-1247")
pub const DEFAULT_SCHOOL_ID: &str = "U2Nob29sLTEyNDc=";

/// Authorization header accepted by the public GraphQL endpoint
pub const DEFAULT_AUTH: &str = "Basic dGVzdDp0ZXN0";

/// Pause between successive instructor lookups
pub const POLITENESS_DELAY: Duration = Duration::from_millis(500);

/// Public profile page for a teacher, suffixed with the legacy id
pub const PROFILE_URL_BASE: &str = "https://www.ratemyprofessors.com/professor/";

pub const SEARCH_QUERY: &str = r#"
  query NewSearchTeachersPS($query: TeacherSearchQuery!) {
    newSearch {
      teachers(query: $query) {
        edges {
          node {
            id
            legacyId
            firstName
            lastName
            avgRating
            numRatings
            department
            school {
              id
              name
            }
          }
        }
      }
    }
  }
"#;

pub const TEACHER_QUERY: &str = r#"
  query TeacherNode($id: ID!) {
    node(id: $id) {
      ... on Teacher {
        id
        legacyId
        firstName
        lastName
        avgRating
        numRatings
        department
        school {
          id
          name
        }
      }
    }
  }
"#;

// ============================================================================
// Override Tables
// ============================================================================

/// Catalog spelling -> spelling the ratings service knows
pub const NAME_OVERRIDES: &[(&str, &str)] =
    &[("Nadine v. F. u. Ludwigsdorff", "Nadine von Frankenberg")];

/// Catalog spelling -> legacy teacher id, bypassing search
pub const ID_OVERRIDES: &[(&str, &str)] = &[("Donald Bonidie", "141380")];

// ============================================================================
// Site
// ============================================================================

pub const SITE_NAME: &str = "Pitt CS Wiki";

/// Title used when a guide has no frontmatter title or cannot be read
pub fn fallback_guide_title() -> String {
    format!("Guide | {}", SITE_NAME)
}

/// Descriptions longer than this are cut down for the quick view
pub const DESCRIPTION_LIMIT: usize = 850;

/// Number of characters kept when a description is cut
pub const DESCRIPTION_KEEP: usize = 800;
