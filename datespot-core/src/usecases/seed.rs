use super::prelude::*;

#[rustfmt::skip]
struct SampleSpot {
    id           : &'static str,
    name         : &'static str,
    location     : &'static str,
    category     : Category,
    price_level  : i64,
    description  : &'static str,
    rating       : f64,
    tags         : [&'static str; 3],
    image_url    : &'static str,
    pet_friendly : bool,
    pos          : (f64, f64),
}

// 2024-01-15T00:00:00Z
const SAMPLE_CREATED_AT_MILLIS: i64 = 1_705_276_800_000;

const SAMPLE_SPOTS: &[SampleSpot] = &[
    SampleSpot {
        id: "1",
        name: "Liseberg",
        location: "Örgrytevägen 5, Göteborg",
        category: Category::Entertainment,
        price_level: 3,
        description: "Scandinavia's largest amusement park with thrilling roller coasters and beautiful gardens. Pro tip: Download their app for virtual queues!",
        rating: 4.0,
        tags: ["Amusement Park", "Rides", "Family-Friendly"],
        image_url: "https://t3.ftcdn.net/jpg/05/00/57/98/360_F_500579853_iUtfSMCiOp2dgaTmgGyZbzIMHfUWvC4r.jpg",
        pet_friendly: false,
        pos: (57.69538532530327, 11.992507026982514),
    },
    SampleSpot {
        id: "2",
        name: "Slottsskogen",
        location: "Linnéstaden, Göteborg",
        category: Category::Outdoor,
        price_level: 1,
        description: "Beautiful park perfect for picnics, walking, and visiting the free zoo with Nordic animals. A former deer-hunting ground transformed into a picturesque urban oasis.",
        rating: 4.5,
        tags: ["Park", "Zoo", "Nature"],
        image_url: "https://cms.goteborg.com/uploads/2020/12/slottsskogen-promenad-43.jpg",
        pet_friendly: true,
        pos: (57.68459262015389, 11.944461376143918),
    },
    SampleSpot {
        id: "3",
        name: "Haga Nygata",
        location: "Haga, Göteborg",
        category: Category::Romantic,
        price_level: 2,
        description: "Charming cobblestone street with historic wooden houses, cozy cafés, and boutique shops. Perfect for a romantic stroll.",
        rating: 4.2,
        tags: ["Historic Walking Area", "Shopping", "Cafes"],
        image_url: "https://cms.goteborg.com/uploads/2020/12/Haga_House-of-Vision_2309_04-scaled.jpg",
        pet_friendly: true,
        pos: (57.6985384, 11.9519311),
    },
    SampleSpot {
        id: "4",
        name: "The Garden Society (Trädgårdsföreningen)",
        location: "Centrum, Göteborg",
        category: Category::Outdoor,
        price_level: 1,
        description: "Historic garden park with palm house, rose garden, and peaceful walking paths. One of Europe's larger botanical gardens.",
        rating: 4.5,
        tags: ["Gardens", "Botanical", "Relaxing"],
        image_url: "https://dynamic-media-cdn.tripadvisor.com/media/photo-o/18/3e/55/91/ett-maste-nar-man-ar.jpg?w=1200&h=-1&s=1",
        pet_friendly: true,
        pos: (57.706466354857305, 11.976423265038605),
    },
    SampleSpot {
        id: "5",
        name: "Paddan Canal Tours",
        location: "Stenpiren, Göteborg",
        category: Category::Water,
        price_level: 2,
        description: "Guided boat tours through the canals and under bridges of Gothenburg. Great way to see the city from a different perspective!",
        rating: 4.6,
        tags: ["Boat Tour", "Canal", "Sightseeing"],
        image_url: "https://cms.goteborg.com/uploads/2020/11/paddan-43-1-2048x1536.jpg",
        pet_friendly: false,
        pos: (57.70377425750224, 11.970010467511406),
    },
    SampleSpot {
        id: "6",
        name: "Upper House Spa",
        location: "Brunnsparken, Göteborg",
        category: Category::Romantic,
        price_level: 4,
        description: "Luxury spa with panoramic views from the top of Gothia Towers. Perfect for a special occasion or treat yourself moment.",
        rating: 4.5,
        tags: ["Spa", "Luxury", "Relaxation"],
        image_url: "https://en.upperhouse.se/uploads/sites/79/2018/11/1920-1080-upper-house-winter.jpg",
        pet_friendly: false,
        pos: (57.69747828433729, 11.988963013621454),
    },
    SampleSpot {
        id: "7",
        name: "Gothenburg Botanical Garden",
        location: "Änggårdsbergen, Göteborg",
        category: Category::Outdoor,
        price_level: 2,
        description: "One of Europe's larger botanical gardens with 16,000 plant species. Beautiful any time of year!",
        rating: 4.3,
        tags: ["Botanical Garden", "Nature", "Plants"],
        image_url: "https://swedishgardens.se/wp-content/uploads/2019/10/botaniska-1.jpg",
        pet_friendly: true,
        pos: (57.682950855202265, 11.950344819768201),
    },
    SampleSpot {
        id: "8",
        name: "Sjömanstornet",
        location: "Majorna, Göteborg",
        category: Category::View,
        price_level: 1,
        description: "Observation tower offering panoramic views over Gothenburg and the archipelago. Great for sunset views!",
        rating: 4.6,
        tags: ["Observation Tower", "Viewpoint", "Panoramic"],
        image_url: "https://www.mikaelsvensson.com/photo/wp-content/uploads/2022/11/221118108.jpg",
        pet_friendly: true,
        pos: (57.69956727968238, 11.932173515992389),
    },
    SampleSpot {
        id: "10",
        name: "Bord 27",
        location: "Göteborg City",
        category: Category::Food,
        price_level: 3,
        description: "European and Swedish cuisine with a modern twist. Cozy atmosphere for intimate conversations.",
        rating: 4.8,
        tags: ["European", "Swedish", "Modern"],
        image_url: "https://www.gp.se/images/og/75c1a12c-8b54-47d2-a6f3-0f6133be6c95/images/103lOifgX6rIR9F4bkeWlLIPqgdqM.jpg?width=1200&quality=75",
        pet_friendly: false,
        pos: (57.697285283550336, 11.962909268748772),
    },
    SampleSpot {
        id: "11",
        name: "Heaven 23",
        location: "Gothia Towers, Göteborg",
        category: Category::Food,
        price_level: 4,
        description: "Restaurant with panoramic views from the 23rd floor. Perfect for a romantic evening with a view!",
        rating: 4.1,
        tags: ["View Restaurant", "Panoramic", "Fine Dining"],
        image_url: "https://en.heaven23.se/uploads/sites/34/2016/12/dce4728c-e260-469c-bbc6-e2dce4dfa0ce-1280x800.jpg",
        pet_friendly: false,
        pos: (57.69762375015898, 11.988522435896453),
    },
    SampleSpot {
        id: "13",
        name: "Avenyn",
        location: "Göteborg City",
        category: Category::Romantic,
        price_level: 2,
        description: "Göteborg's most famous boulevard, lined with shops, restaurants, and cultural venues. Great for an evening stroll.",
        rating: 4.2,
        tags: ["Boulevard", "Shopping", "Dining"],
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRzjEhv1ihvHMoPXiVQgXrKnD6sPju3caI1ow&s",
        pet_friendly: true,
        pos: (57.70073940412776, 11.974809208891156),
    },
    SampleSpot {
        id: "14",
        name: "Vinga",
        location: "Gothenburg Archipelago",
        category: Category::Outdoor,
        price_level: 2,
        description: "Beautiful island in the archipelago, birthplace of Swedish poet Evert Taube. Take a ferry for a day trip adventure!",
        rating: 4.6,
        tags: ["Island", "Archipelago", "Nature"],
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcR1UptU8LJNmy8Qqp-MYRFANZDBSY9xUpZS0g&s",
        pet_friendly: true,
        pos: (57.635100343961405, 11.607401414737499),
    },
    SampleSpot {
        id: "15",
        name: "Champagnebaren",
        location: "Göteborg City",
        category: Category::Romantic,
        price_level: 3,
        description: "Elegant champagne bar perfect for a romantic evening. Great for celebrations or just because!",
        rating: 4.2,
        tags: ["Bar", "European", "Romantic"],
        image_url: "https://res.cloudinary.com/foodfriends/image/upload/w_1200,h_600,c_fill,f_auto,q_auto/restaurant/b587306034d7a8bd9610288998a54f26.jpg",
        pet_friendly: false,
        pos: (57.704437493052176, 11.96301539434193),
    },
];

impl SampleSpot {
    fn to_spot(&self) -> Spot {
        let (lat, lng) = self.pos;
        Spot {
            id: self.id.into(),
            name: self.name.into(),
            location: self.location.into(),
            category: self.category,
            price_level: PriceLevel::try_from(self.price_level).unwrap_or(PriceLevel::default()),
            description: self.description.into(),
            rating: AvgRatingValue::from(self.rating),
            total_votes: 0,
            upvotes: 0,
            downvotes: 0,
            tags: self.tags.iter().map(|t| (*t).to_owned()).collect(),
            image_url: Some(self.image_url.into()),
            coordinates: MapPoint::try_from_lat_lng_deg(lat, lng),
            pet_friendly: self.pet_friendly,
            created_at: Timestamp::from_millis(SAMPLE_CREATED_AT_MILLIS)
                .unwrap_or_else(Timestamp::epoch),
            created_by: None,
        }
    }
}

/// The sample spots around Gothenburg.
pub fn sample_spots() -> Vec<Spot> {
    SAMPLE_SPOTS.iter().map(SampleSpot::to_spot).collect()
}

/// Populates an empty store with the sample spots.
///
/// Returns the number of created spots, which is 0 if the store
/// already contains spots.
pub async fn seed_sample_spots<R>(repo: &R) -> Result<usize>
where
    R: SpotRepo + ?Sized,
{
    let count = repo.count_spots().await?;
    if count > 0 {
        log::info!("Skipping sample data: the store already contains {count} spots");
        return Ok(0);
    }
    let spots = sample_spots();
    let total = spots.len();
    for spot in spots {
        repo.create_spot(spot).await?;
    }
    log::info!("Created {total} sample spots");
    Ok(total)
}
