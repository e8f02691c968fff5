use crate::color::{color_for, RatingColor};
use crate::constants::{DESCRIPTION_KEEP, DESCRIPTION_LIMIT, PROFILE_URL_BASE};
use crate::models::{RatingRecord, RatingsMapping};
use std::cmp::Ordering;

/// An instructor as shown on a course's quick view
#[derive(Debug, Clone, PartialEq)]
pub struct InstructorLink<'a> {
    pub name: &'a str,
    pub rating: Option<&'a RatingRecord>,
    /// Only set for instructors with a positive average
    pub color: Option<RatingColor>,
}

impl InstructorLink<'_> {
    /// Link text, e.g. `Jane Doe (2.5)`
    pub fn label(&self) -> String {
        match self.rating {
            Some(r) => format!("{} ({})", self.name, r.avg_rating),
            None => self.name.to_string(),
        }
    }

    /// Hover text, e.g. `30 ratings`
    pub fn title(&self) -> Option<String> {
        self.rating.map(|r| format!("{} ratings", r.num_ratings))
    }

    pub fn profile_url(&self) -> Option<String> {
        self.rating.map(|r| profile_url(&r.legacy_id))
    }
}

pub fn profile_url(legacy_id: &str) -> String {
    format!("{}{}", PROFILE_URL_BASE, legacy_id)
}

/// Order instructors best-rated first; unrated ones keep their order at the end
pub fn rank_instructors<'a>(
    names: &'a [String],
    ratings: &'a RatingsMapping,
) -> Vec<InstructorLink<'a>> {
    let score = |name: &str| ratings.get(name).map_or(-1.0, |r| r.avg_rating);

    let mut ordered: Vec<&String> = names.iter().collect();
    ordered.sort_by(|a, b| {
        score(b.as_str())
            .partial_cmp(&score(a.as_str()))
            .unwrap_or(Ordering::Equal)
    });

    ordered
        .into_iter()
        .map(|name| {
            let rating = ratings.get(name.as_str());
            InstructorLink {
                name: name.as_str(),
                rating,
                color: rating
                    .filter(|r| r.avg_rating > 0.0)
                    .map(|r| color_for(r.avg_rating)),
            }
        })
        .collect()
}

/// Shorten long course descriptions for the quick view
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let kept: String = text.chars().take(DESCRIPTION_KEEP).collect();
        format!("{}…", kept)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(avg: f64, num: u32, legacy_id: &str) -> RatingRecord {
        RatingRecord {
            avg_rating: avg,
            num_ratings: num,
            legacy_id: legacy_id.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            id: String::new(),
        }
    }

    #[test]
    fn test_rank_best_first_unrated_last() {
        let mut ratings = RatingsMapping::new();
        ratings.insert("Low".to_string(), rated(2.1, 5, "1"));
        ratings.insert("High".to_string(), rated(4.8, 50, "2"));
        let names: Vec<String> = ["Unrated A", "Low", "Unrated B", "High"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let ranked = rank_instructors(&names, &ratings);
        let order: Vec<_> = ranked.iter().map(|l| l.name).collect();
        assert_eq!(order, vec!["High", "Low", "Unrated A", "Unrated B"]);
    }

    #[test]
    fn test_link_details() {
        let mut ratings = RatingsMapping::new();
        ratings.insert("Donald Bonidie".to_string(), rated(4.2, 30, "141380"));
        let names = vec!["Donald Bonidie".to_string(), "Jane Doe".to_string()];

        let ranked = rank_instructors(&names, &ratings);
        assert_eq!(ranked[0].label(), "Donald Bonidie (4.2)");
        assert_eq!(ranked[0].title().as_deref(), Some("30 ratings"));
        assert_eq!(
            ranked[0].profile_url().as_deref(),
            Some("https://www.ratemyprofessors.com/professor/141380")
        );
        assert_eq!(ranked[0].color, Some(color_for(4.2)));

        assert_eq!(ranked[1].label(), "Jane Doe");
        assert!(ranked[1].profile_url().is_none());
        assert!(ranked[1].color.is_none());
    }

    #[test]
    fn test_zero_rating_has_no_color() {
        let mut ratings = RatingsMapping::new();
        ratings.insert("New Prof".to_string(), rated(0.0, 0, "9"));
        let names = vec!["New Prof".to_string()];

        let ranked = rank_instructors(&names, &ratings);
        assert!(ranked[0].rating.is_some());
        assert!(ranked[0].color.is_none());
    }

    #[test]
    fn test_truncate_description() {
        let short = "a".repeat(850);
        assert_eq!(truncate_description(&short), short);

        let long = "b".repeat(851);
        let cut = truncate_description(&long);
        assert_eq!(cut.chars().count(), 801);
        assert!(cut.ends_with('…'));
    }
}
