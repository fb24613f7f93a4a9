use super::*;
use async_trait::async_trait;
use datespot_core::repositories::{Error, Result, SpotRepo, Subscription, VoteCommit, VoteRepo};

mod spot;
mod vote;
