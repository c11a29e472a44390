//! Repository traits, one per entity.
//!
//! Implementations own the datastore connection; handlers receive them
//! through application state and pass the request context explicitly.

use crate::error::Result;
use crate::filters::{ArtistFilter, LyricFilter, RandomLyricFilter};
use crate::pagination::{Page, PageRequest};
use crate::payload::NewAlbum;
use crate::types::{
    Album, AlbumId, AlbumRecord, Artist, ArtistId, CreateArtist, CreateLyric, CreateUser, Lyric,
    LyricId, LyricRecord, Song, SongId, SongRecord, UpdateArtist, UpdateLyric, User, UserId,
};
use crate::votes::Vote;
use async_trait::async_trait;

/// Per-request caller identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    user_id: Option<UserId>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }
}

#[async_trait]
pub trait ArtistRepository: Send + Sync {
    /// Filtered, ordered page of artists
    async fn list_artists(&self, filter: &ArtistFilter, page: PageRequest) -> Result<Page<Artist>>;

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>>;

    /// Fails with a `name` validation error when the name is taken
    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist>;

    /// Partial update; fails with `NotFound` for an unknown id
    async fn update_artist(&self, id: ArtistId, update: UpdateArtist) -> Result<Artist>;

    /// Deletes the artist with its albums, songs and lyrics
    async fn delete_artist(&self, id: ArtistId) -> Result<()>;
}

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn list_albums(&self, page: PageRequest) -> Result<Page<Album>>;

    async fn get_album(&self, id: AlbumId) -> Result<Option<AlbumRecord>>;

    async fn albums_by_artist(&self, artist_id: ArtistId) -> Result<Vec<Album>>;

    /// Resolves or creates the artist, then inserts the album, atomically
    async fn create_album(&self, album: NewAlbum) -> Result<AlbumRecord>;

    async fn delete_album(&self, id: AlbumId) -> Result<()>;
}

#[async_trait]
pub trait SongRepository: Send + Sync {
    async fn list_songs(&self, page: PageRequest) -> Result<Page<SongRecord>>;

    async fn get_song(&self, id: SongId) -> Result<Option<SongRecord>>;

    async fn songs_by_album(&self, album_id: AlbumId) -> Result<Vec<Song>>;

    async fn delete_song(&self, id: SongId) -> Result<()>;
}

#[async_trait]
pub trait LyricRepository: Send + Sync {
    async fn list_lyrics(&self, filter: &LyricFilter, page: PageRequest) -> Result<Page<LyricRecord>>;

    async fn get_lyric(&self, id: LyricId) -> Result<Option<LyricRecord>>;

    async fn lyrics_by_song(&self, song_id: SongId) -> Result<Vec<Lyric>>;

    /// Resolves or creates the song, then inserts the lyric, atomically
    async fn create_lyric(&self, lyric: CreateLyric) -> Result<LyricRecord>;

    async fn update_lyric(&self, id: LyricId, update: UpdateLyric) -> Result<LyricRecord>;

    async fn delete_lyric(&self, id: LyricId) -> Result<()>;

    /// Applies a vote for an authenticated caller and returns the new state
    async fn vote_lyric(&self, ctx: &RequestContext, id: LyricId, vote: Vote)
        -> Result<LyricRecord>;

    /// Uniformly random lyric among those matching the filter
    async fn random_lyric(&self, filter: &RandomLyricFilter) -> Result<Option<LyricRecord>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// User id and password hash for a login name
    async fn find_credentials(&self, username: &str) -> Result<Option<(UserId, String)>>;
}

/// Everything the HTTP layer needs from a datastore
pub trait Catalog:
    ArtistRepository + AlbumRepository + SongRepository + LyricRepository + UserRepository
{
}

impl<T> Catalog for T where
    T: ArtistRepository + AlbumRepository + SongRepository + LyricRepository + UserRepository
{
}
