use crate::entities::*;

/// Case-insensitive substring match against the name, the location,
/// the description or any of the tags.
///
/// The search term must already be lowercase.
pub fn matches_text(spot: &Spot, lowercase_term: &str) -> bool {
    debug_assert_eq!(lowercase_term, lowercase_term.to_lowercase());
    if lowercase_term.is_empty() {
        return true;
    }
    let contains = |s: &str| s.to_lowercase().contains(lowercase_term);
    contains(&spot.name)
        || contains(&spot.location)
        || contains(&spot.description)
        || spot.tags.iter().any(|t| contains(t))
}

pub fn matches_category(spot: &Spot, category: Option<Category>) -> bool {
    category.map(|c| spot.category == c).unwrap_or(true)
}

pub fn meets_min_rating(spot: &Spot, min_rating: f64) -> bool {
    if min_rating <= 0.0 {
        return true;
    }
    f64::from(spot.rating) >= min_rating
}
