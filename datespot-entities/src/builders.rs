pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::spot_builder::*;

pub mod spot_builder {

    use super::*;
    use crate::{category::*, geo::*, id::*, rating::*, spot::*, time::*};

    #[derive(Debug)]
    pub struct SpotBuild {
        spot: Spot,
    }

    impl SpotBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.spot.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.spot.name = name.into();
            self
        }
        pub fn location(mut self, location: &str) -> Self {
            self.spot.location = location.into();
            self
        }
        pub fn description(mut self, desc: &str) -> Self {
            self.spot.description = desc.into();
            self
        }
        pub fn category(mut self, category: Category) -> Self {
            self.spot.category = category;
            self
        }
        pub fn rating(mut self, rating: f64) -> Self {
            self.spot.rating = AvgRatingValue::from(rating);
            self
        }
        pub fn total_votes(mut self, total_votes: u32) -> Self {
            self.spot.total_votes = total_votes;
            self
        }
        pub fn votes(mut self, upvotes: u32, downvotes: u32) -> Self {
            self.spot.upvotes = upvotes;
            self.spot.downvotes = downvotes;
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.spot.coordinates = Some(pos);
            self
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.spot.tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.spot.created_at = created_at;
            self
        }
        pub fn created_by(mut self, user_id: &str) -> Self {
            self.spot.created_by = Some(Creator {
                user_id: user_id.into(),
                display_name: None,
                photo_url: None,
            });
            self
        }
        pub fn finish(self) -> Spot {
            self.spot
        }
    }

    impl Builder for Spot {
        type Build = SpotBuild;
        fn build() -> SpotBuild {
            SpotBuild {
                spot: Spot {
                    id: Id::new(),
                    name: "".into(),
                    location: "".into(),
                    category: Category::default(),
                    price_level: PriceLevel::default(),
                    description: "".into(),
                    rating: AvgRatingValue::default(),
                    total_votes: 0,
                    upvotes: 0,
                    downvotes: 0,
                    tags: Spot::default_tags(),
                    image_url: None,
                    coordinates: None,
                    pet_friendly: false,
                    created_at: Timestamp::now(),
                    created_by: None,
                },
            }
        }
    }
}
