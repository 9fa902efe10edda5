use serde::{Deserialize, Serialize};

pub type CategoryId = u64;

/// Grouping label for samples; read-only on the client
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
