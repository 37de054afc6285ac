use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `study` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Study {
    /// Assigned by the store on first save
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
}

impl Study {
    /// An unsaved study; `id` stays empty until the repository assigns one
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
        }
    }
}
