use serde::{Deserialize, Serialize};

/// Body for creating or updating an artist name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistNameRequest {
    pub artist_name: String,
    pub original_artist_name: String,
}

/// Body for updating an anime name (only the original name is editable)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeNameRequest {
    pub original_anime_name: String,
}

/// Artist name row as returned by the server (link_artist_name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistName {
    pub id: i64,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub original_artist_name: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Client-side projection of a localized/original name pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedEntity {
    pub id: i64,
    pub display_name: String,
    pub original_name: String,
    /// Dense 1-based rank within the parent
    pub order: u32,
}

impl NamedEntity {
    /// Project a server row, placing it at `order`
    pub fn from_row(row: &ArtistName, order: u32) -> Self {
        Self {
            id: row.id,
            display_name: row.artist_name.clone().unwrap_or_default(),
            original_name: row.original_artist_name.clone().unwrap_or_default(),
            order,
        }
    }
}

/// One entry of a reorder submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOrder {
    pub id: i64,
    pub order: u32,
}

/// Complete ranking submitted in one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<NameOrder>,
}
