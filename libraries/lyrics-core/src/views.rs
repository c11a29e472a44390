//! Response shapes.
//!
//! Each endpoint picks an explicit view; list and detail views expose
//! different attribute subsets.

use crate::types::{
    Album, AlbumId, AlbumRecord, Artist, ArtistId, Lyric, LyricId, LyricRecord, Song, SongId,
    SongRecord,
};
use serde::Serialize;

/// Artist without nested albums (artist list, nested artist)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistView {
    pub id: ArtistId,
    pub name: String,
    pub first_year_active: Option<i32>,
}

/// Artist detail with its albums
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: ArtistId,
    pub name: String,
    pub first_year_active: Option<i32>,
    pub albums: Vec<AlbumSummary>,
}

/// Album without relations (album list, nested album)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub name: String,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumDetail {
    pub id: AlbumId,
    pub name: String,
    pub year: Option<i32>,
    pub artist: ArtistView,
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongSummary {
    pub id: SongId,
    pub name: String,
}

/// Song list item with its album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongListItem {
    pub id: SongId,
    pub name: String,
    pub album: Option<AlbumSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongDetail {
    pub id: SongId,
    pub name: String,
    pub album: Option<AlbumSummary>,
    pub artist: Option<ArtistView>,
    pub lyrics: Vec<LyricSummary>,
}

/// Lyric nested under a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricSummary {
    pub id: LyricId,
    pub text: String,
    pub votes: i64,
}

/// Lyric with counters and the song, album and artist above it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricDetail {
    pub id: LyricId,
    pub text: String,
    pub votes: i64,
    pub upvotes: i64,
    pub downvotes: i64,
    pub song: SongSummary,
    pub album: Option<AlbumSummary>,
    pub artist: Option<ArtistView>,
}

impl From<Artist> for ArtistView {
    fn from(artist: Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            first_year_active: artist.first_year_active,
        }
    }
}

impl ArtistDetail {
    pub fn new(artist: Artist, albums: Vec<Album>) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            first_year_active: artist.first_year_active,
            albums: albums.into_iter().map(AlbumSummary::from).collect(),
        }
    }
}

impl From<Album> for AlbumSummary {
    fn from(album: Album) -> Self {
        Self {
            id: album.id,
            name: album.name,
            year: album.year,
        }
    }
}

impl AlbumDetail {
    pub fn new(record: AlbumRecord, songs: Vec<Song>) -> Self {
        Self {
            id: record.album.id,
            name: record.album.name,
            year: record.album.year,
            artist: record.artist.into(),
            songs: songs.into_iter().map(SongSummary::from).collect(),
        }
    }
}

impl From<Song> for SongSummary {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            name: song.name,
        }
    }
}

impl From<SongRecord> for SongListItem {
    fn from(record: SongRecord) -> Self {
        Self {
            id: record.song.id,
            name: record.song.name,
            album: record.album.map(AlbumSummary::from),
        }
    }
}

impl SongDetail {
    pub fn new(record: SongRecord, lyrics: Vec<Lyric>) -> Self {
        Self {
            id: record.song.id,
            name: record.song.name,
            album: record.album.map(AlbumSummary::from),
            artist: record.artist.map(ArtistView::from),
            lyrics: lyrics.into_iter().map(LyricSummary::from).collect(),
        }
    }
}

impl From<Lyric> for LyricSummary {
    fn from(lyric: Lyric) -> Self {
        Self {
            id: lyric.id,
            text: lyric.text,
            votes: lyric.votes,
        }
    }
}

impl From<LyricRecord> for LyricDetail {
    fn from(record: LyricRecord) -> Self {
        Self {
            id: record.lyric.id,
            text: record.lyric.text,
            votes: record.lyric.votes,
            upvotes: record.lyric.upvotes,
            downvotes: record.lyric.downvotes,
            song: record.song.into(),
            album: record.album.map(AlbumSummary::from),
            artist: record.artist.map(ArtistView::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist() -> Artist {
        Artist {
            id: 1,
            name: "Taylor Swift".to_string(),
            first_year_active: Some(2004),
        }
    }

    fn album() -> Album {
        Album {
            id: 2,
            name: "1989".to_string(),
            year: Some(2014),
            artist_id: 1,
        }
    }

    fn song() -> Song {
        Song {
            id: 3,
            name: "Shake It Off".to_string(),
            album_id: Some(2),
        }
    }

    #[test]
    fn artist_list_view_has_no_albums() {
        let json = serde_json::to_value(ArtistView::from(artist())).unwrap();
        assert_eq!(json["name"], "Taylor Swift");
        assert!(json.get("albums").is_none());

        let json = serde_json::to_value(ArtistDetail::new(artist(), vec![album()])).unwrap();
        assert_eq!(json["albums"][0]["name"], "1989");
        assert!(json["albums"][0].get("artist_id").is_none());
    }

    #[test]
    fn lyric_detail_nests_song_album_artist() {
        let record = LyricRecord {
            lyric: Lyric {
                id: 4,
                text: "players gonna play".to_string(),
                song_id: 3,
                votes: 5,
                upvotes: 3,
                downvotes: 2,
            },
            song: song(),
            album: Some(album()),
            artist: Some(artist()),
        };

        let json = serde_json::to_value(LyricDetail::from(record)).unwrap();
        assert_eq!(json["song"], serde_json::json!({"id": 3, "name": "Shake It Off"}));
        assert_eq!(
            json["album"],
            serde_json::json!({"id": 2, "name": "1989", "year": 2014})
        );
        assert_eq!(json["artist"]["first_year_active"], 2004);
        assert_eq!(json["upvotes"], 3);
    }

    #[test]
    fn album_detail_lists_songs() {
        let detail = AlbumDetail::new(
            AlbumRecord {
                album: album(),
                artist: artist(),
            },
            vec![song()],
        );
        let json = serde_json::to_value(detail).unwrap();
        assert_eq!(json["artist"]["id"], 1);
        assert_eq!(json["songs"], serde_json::json!([{"id": 3, "name": "Shake It Off"}]));
    }
}
