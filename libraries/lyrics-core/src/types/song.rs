//! Song types

use super::AlbumId;
use serde::{Deserialize, Serialize};

pub type SongId = i64;

/// A song. The album column is nullable in storage, but every write path
/// requires one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub name: String,
    pub album_id: Option<AlbumId>,
}

/// Data for creating a new song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSong {
    pub name: String,
    pub album_id: AlbumId,
}
