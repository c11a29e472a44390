//! Album types

use super::ArtistId;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album, owned by exactly one artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub year: Option<i32>,
    pub artist_id: ArtistId,
}

/// Data for creating a new album with an already resolved artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub name: String,
    pub year: i32,
    pub artist_id: ArtistId,
}
