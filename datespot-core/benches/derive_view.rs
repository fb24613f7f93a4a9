use brunch::{Bench, Benches};
use datespot_core::usecases::{derive_view, SortBy, ViewParams};
use datespot_entities::{builders::*, category::*, geo::*, spot::*};

fn main() {
    let mut benches = Benches::default();

    let spots = create_spots(1000);

    let by_name = ViewParams {
        sort_by: SortBy::Name,
        ..Default::default()
    };
    benches.push(
        Bench::new("Sort 1000 spots by name").run(|| derive_view(&spots, &by_name)),
    );

    let by_distance = ViewParams {
        sort_by: SortBy::Distance,
        user_location: Some(MapPoint::from_lat_lng_deg(57.7089, 11.9746)),
        ..Default::default()
    };
    benches.push(
        Bench::new("Sort 1000 spots by distance")
            .run(|| derive_view(&spots, &by_distance)),
    );

    let search = ViewParams {
        search_term: "garden".into(),
        category: Some(Category::Outdoor),
        min_rating: 3.0,
        ..Default::default()
    };
    benches.push(
        Bench::new("Search and filter 1000 spots").run(|| derive_view(&spots, &search)),
    );
    benches.finish();
}

fn create_spots(n: usize) -> Vec<Spot> {
    let categories: Vec<_> = Category::all().collect();
    (0..n)
        .map(|i| {
            let offset = i as f64 / n as f64;
            Spot::build()
                .name(&format!("Spot {}", n - i))
                .description(if i % 7 == 0 { "A quiet garden" } else { "A busy street" })
                .category(categories[i % categories.len()])
                .rating(5.0 * offset)
                .pos(MapPoint::from_lat_lng_deg(57.0 + offset, 11.0 + offset))
                .finish()
        })
        .collect()
}
