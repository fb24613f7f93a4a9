use datespot_boundary::{SpotDocument, VoteRecord};
use serde::{Deserialize, Serialize};

/// Contents of the snapshot file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub spots: Vec<SpotDocument>,
    #[serde(default)]
    pub votes: Vec<VoteRecord>,
}
