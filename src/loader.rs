use crate::error::{Error, Result};
use crate::models::{Course, CourseCatalog, RatingsMapping};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Load the course catalog JSON
pub fn load_catalog(path: &Path) -> Result<CourseCatalog> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Look up a course by its catalog id
pub fn find_course<'a>(catalog: &'a CourseCatalog, course_id: &str) -> Result<&'a Course> {
    catalog
        .courses
        .iter()
        .find(|c| c.id == course_id)
        .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))
}

/// Unique instructor names across every course, sorted
pub fn collect_instructors(catalog: &CourseCatalog) -> BTreeSet<String> {
    catalog
        .courses
        .iter()
        .filter_map(|c| c.instructors.as_ref())
        .flatten()
        .cloned()
        .collect()
}

/// Load a previously written ratings file; a missing file is an empty mapping
pub fn load_ratings(path: &Path) -> Result<RatingsMapping> {
    if !path.exists() {
        return Ok(RatingsMapping::new());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replace the ratings file with `mapping`, pretty-printed
pub fn write_ratings(path: &Path, mapping: &RatingsMapping) -> Result<()> {
    let json = serde_json::to_string_pretty(mapping)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingRecord;

    fn catalog(json: &str) -> CourseCatalog {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_collect_instructors_dedupes() {
        let catalog = catalog(
            r#"{"courses":[
                {"id":"CS 0401","instructors":["Jane Doe","Ann Lee"]},
                {"id":"CS 0441"},
                {"id":"CS 0445","instructors":["Ann Lee","Donald Bonidie"]}
            ]}"#,
        );
        let names: Vec<_> = collect_instructors(&catalog).into_iter().collect();
        assert_eq!(names, vec!["Ann Lee", "Donald Bonidie", "Jane Doe"]);
    }

    #[test]
    fn test_find_course() {
        let catalog = catalog(r#"{"courses":[{"id":"CS 0401","title":"Intermediate Programming"}]}"#);
        let course = find_course(&catalog, "CS 0401").unwrap();
        assert_eq!(course.title.as_deref(), Some("Intermediate Programming"));

        let err = find_course(&catalog, "CS 9999").unwrap_err();
        assert!(matches!(err, Error::CourseNotFound(ref id) if id == "CS 9999"));
    }

    #[test]
    fn test_missing_ratings_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = load_ratings(&dir.path().join("rmp-ratings.json")).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_write_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("rmp-ratings.json");

        let mut first = RatingsMapping::new();
        first.insert(
            "Old Name".to_string(),
            RatingRecord {
                avg_rating: 1.5,
                num_ratings: 2,
                legacy_id: "9".to_string(),
                first_name: "Old".to_string(),
                last_name: "Name".to_string(),
                id: "x".to_string(),
            },
        );
        write_ratings(&path, &first).unwrap();

        let mut second = RatingsMapping::new();
        second.insert(
            "Jane Doe".to_string(),
            RatingRecord {
                avg_rating: 2.5,
                num_ratings: 4,
                legacy_id: "1".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                id: "y".to_string(),
            },
        );
        write_ratings(&path, &second).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"Jane Doe\": {"));
        assert_eq!(load_ratings(&path).unwrap(), second);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the output file
        let err = write_ratings(dir.path(), &RatingsMapping::new()).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
