use crate::entities::*;

mod cast_vote;
mod create_new_spot;
mod derive_view;
mod error;
mod rate_spot;
mod seed;
mod validate_new_spot;

#[cfg(test)]
pub mod tests;

pub use self::{
    cast_vote::*, create_new_spot::*, derive_view::*, error::Error, rate_spot::*, seed::*,
    validate_new_spot::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{entities::*, repositories::*};
    pub use crate::repositories::Error as RepoError;
}

/// Splits a comma separated tag input.
///
/// Each tag is trimmed and empty tags are dropped.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Trims all tags, drops the empty ones and falls back to the
/// default tag if nothing remains.
pub fn prepare_tag_list<'a>(tags: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let tags: Vec<_> = tags
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if tags.is_empty() {
        return Spot::default_tags();
    }
    tags
}
