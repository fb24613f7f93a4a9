use super::{prelude::*, NewSpot};

/// Turns an accepted submission into a spot owned by `creator`.
///
/// An uploaded image replaces the image URL of the submission.
pub fn prepare_new_spot(
    new_spot: NewSpot,
    creator: &User,
    uploaded_image_url: Option<String>,
) -> Spot {
    let NewSpot {
        name,
        location,
        description,
        category,
        price_level,
        tags,
        image_url,
        coordinates,
        pet_friendly,
        initial_rating,
    } = new_spot;
    let RatingSummary {
        rating,
        total_votes,
    } = RatingSummary::initial(initial_rating);
    Spot {
        id: Id::new(),
        name,
        location,
        category,
        price_level,
        description,
        rating,
        total_votes,
        upvotes: 0,
        downvotes: 0,
        tags: super::prepare_tag_list(tags.iter().map(String::as_str)),
        image_url: uploaded_image_url
            .or(image_url)
            .filter(|url| !url.trim().is_empty()),
        coordinates,
        pet_friendly,
        created_at: Timestamp::now(),
        created_by: Some(Creator {
            user_id: creator.id.clone(),
            display_name: Some(creator.display_name_or_anonymous().to_owned()),
            photo_url: creator.photo_url.clone(),
        }),
    }
}

pub async fn store_new_spot<R>(repo: &R, spot: Spot) -> Result<Spot>
where
    R: SpotRepo + ?Sized,
{
    log::debug!("Storing new spot {} '{}'", spot.id, spot.name);
    repo.create_spot(spot.clone()).await?;
    log::info!("Created spot {} '{}'", spot.id, spot.name);
    Ok(spot)
}
