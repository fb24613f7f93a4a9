pub mod entities {
    pub use datespot_entities::{
        category::*, geo::*, id::*, rating::*, spot::*, time::*, user::*, vote::*,
    };
}

pub mod gateways;
pub mod repositories;
pub mod usecases;
pub mod util;
