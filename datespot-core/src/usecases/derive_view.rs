use crate::{
    entities::*,
    util::{filter, sort::*},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Rating,
    Name,
    CreatedAt,
    Distance,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewParams {
    pub search_term: String,
    pub category: Option<Category>,
    pub min_rating: f64,
    pub sort_by: SortBy,
    pub user_location: Option<MapPoint>,
}

/// Filters and sorts all spots for display.
///
/// Sorting is stable. Sorting by distance without a user location
/// keeps the filtered order.
pub fn derive_view(spots: &[Spot], params: &ViewParams) -> Vec<Spot> {
    let ViewParams {
        search_term,
        category,
        min_rating,
        sort_by,
        user_location,
    } = params;
    let search_term = search_term.to_lowercase();
    let mut view: Vec<_> = spots
        .iter()
        .filter(|s| filter::matches_text(s, &search_term))
        .filter(|s| filter::matches_category(s, *category))
        .filter(|s| filter::meets_min_rating(s, *min_rating))
        .cloned()
        .collect();
    match sort_by {
        SortBy::Rating => view.sort_by_rating(),
        SortBy::Name => view.sort_by_name(),
        SortBy::CreatedAt => view.sort_by_created_at(),
        SortBy::Distance => {
            if let Some(pos) = user_location {
                view.sort_by_distance_to(*pos);
            }
        }
    }
    view
}
