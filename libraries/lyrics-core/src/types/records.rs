//! Entities joined with the parents reachable by traversal

use super::{Album, Artist, Lyric, Song};

/// An album with its owning artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRecord {
    pub album: Album,
    pub artist: Artist,
}

/// A song with its album and the album's artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRecord {
    pub song: Song,
    pub album: Option<Album>,
    pub artist: Option<Artist>,
}

/// A lyric with its song, the song's album and the album's artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricRecord {
    pub lyric: Lyric,
    pub song: Song,
    pub album: Option<Album>,
    pub artist: Option<Artist>,
}
