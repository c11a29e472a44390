//! Artist types

use serde::{Deserialize, Serialize};

pub type ArtistId = i64;

/// An artist, unique by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub first_year_active: Option<i32>,
}

/// Data for creating a new artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateArtist {
    pub name: String,
    pub first_year_active: Option<i32>,
}

/// Partial update of an artist.
///
/// `first_year_active: Some(None)` clears the year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateArtist {
    pub name: Option<String>,
    pub first_year_active: Option<Option<i32>>,
}

impl UpdateArtist {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.first_year_active.is_none()
    }
}
