#[macro_use]
extern crate log;

mod cast_vote;
mod create_spot;
mod feed;
mod rate_spot;
mod remote;
mod seed;
mod session;

pub mod prelude {
    pub use super::{
        cast_vote::*,
        create_spot::*,
        feed::*,
        rate_spot::*,
        remote::{FlowConfig, DEFAULT_TIMEOUT},
        seed::*,
        session::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use datespot_core::{
    entities::*,
    gateways::{geocode::*, sentiment::*, upload::*},
    repositories::{SnapshotEvent, SpotRepo, Subscription, VoteRepo},
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;
