use crate::{albums, artists, lyrics, songs, users};
use async_trait::async_trait;
use lyrics_core::{
    error::Result,
    filters::{ArtistFilter, LyricFilter, RandomLyricFilter},
    pagination::{Page, PageRequest},
    payload::NewAlbum,
    storage::{
        AlbumRepository, ArtistRepository, LyricRepository, RequestContext, SongRepository,
        UserRepository,
    },
    types::*,
    votes::{DownvoteScoring, Vote},
    CatalogError,
};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Catalog backed by `SQLite`
pub struct SqliteCatalog {
    pool: SqlitePool,
    downvote_scoring: DownvoteScoring,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            downvote_scoring: DownvoteScoring::default(),
        }
    }

    pub fn with_downvote_scoring(mut self, scoring: DownvoteScoring) -> Self {
        self.downvote_scoring = scoring;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Transaction holding the write lock from `BEGIN`.
    ///
    /// Concurrent writers queue on the busy timeout, so a resolution read
    /// never has to upgrade to a write lock mid-transaction.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }
}

#[async_trait]
impl ArtistRepository for SqliteCatalog {
    async fn list_artists(&self, filter: &ArtistFilter, page: PageRequest) -> Result<Page<Artist>> {
        let mut conn = self.pool.acquire().await?;
        artists::list(&mut conn, filter, page).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        let mut conn = self.pool.acquire().await?;
        artists::get_by_id(&mut conn, id).await
    }

    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist> {
        let mut conn = self.pool.acquire().await?;
        artists::create(&mut conn, artist).await
    }

    async fn update_artist(&self, id: ArtistId, update: UpdateArtist) -> Result<Artist> {
        let mut tx = self.begin_write().await?;
        let artist = artists::update(&mut tx, id, update).await?;
        tx.commit().await?;
        Ok(artist)
    }

    async fn delete_artist(&self, id: ArtistId) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        artists::delete(&mut conn, id).await
    }
}

#[async_trait]
impl AlbumRepository for SqliteCatalog {
    async fn list_albums(&self, page: PageRequest) -> Result<Page<Album>> {
        let mut conn = self.pool.acquire().await?;
        albums::list(&mut conn, page).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<AlbumRecord>> {
        let mut conn = self.pool.acquire().await?;
        albums::get_record(&mut conn, id).await
    }

    async fn albums_by_artist(&self, artist_id: ArtistId) -> Result<Vec<Album>> {
        let mut conn = self.pool.acquire().await?;
        albums::get_by_artist(&mut conn, artist_id).await
    }

    async fn create_album(&self, album: NewAlbum) -> Result<AlbumRecord> {
        let mut tx = self.begin_write().await?;
        let record = albums::create(&mut tx, album).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn delete_album(&self, id: AlbumId) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        albums::delete(&mut conn, id).await
    }
}

#[async_trait]
impl SongRepository for SqliteCatalog {
    async fn list_songs(&self, page: PageRequest) -> Result<Page<SongRecord>> {
        let mut conn = self.pool.acquire().await?;
        songs::list(&mut conn, page).await
    }

    async fn get_song(&self, id: SongId) -> Result<Option<SongRecord>> {
        let mut conn = self.pool.acquire().await?;
        songs::get_record(&mut conn, id).await
    }

    async fn songs_by_album(&self, album_id: AlbumId) -> Result<Vec<Song>> {
        let mut conn = self.pool.acquire().await?;
        songs::get_by_album(&mut conn, album_id).await
    }

    async fn delete_song(&self, id: SongId) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        songs::delete(&mut conn, id).await
    }
}

#[async_trait]
impl LyricRepository for SqliteCatalog {
    async fn list_lyrics(&self, filter: &LyricFilter, page: PageRequest) -> Result<Page<LyricRecord>> {
        let mut conn = self.pool.acquire().await?;
        lyrics::list(&mut conn, filter, page).await
    }

    async fn get_lyric(&self, id: LyricId) -> Result<Option<LyricRecord>> {
        let mut conn = self.pool.acquire().await?;
        lyrics::get_record(&mut conn, id).await
    }

    async fn lyrics_by_song(&self, song_id: SongId) -> Result<Vec<Lyric>> {
        let mut conn = self.pool.acquire().await?;
        lyrics::get_by_song(&mut conn, song_id).await
    }

    async fn create_lyric(&self, lyric: CreateLyric) -> Result<LyricRecord> {
        let mut tx = self.begin_write().await?;
        let record = lyrics::create(&mut tx, lyric).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn update_lyric(&self, id: LyricId, update: UpdateLyric) -> Result<LyricRecord> {
        let mut tx = self.begin_write().await?;
        let record = lyrics::update(&mut tx, id, update).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn delete_lyric(&self, id: LyricId) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        lyrics::delete(&mut conn, id).await
    }

    async fn vote_lyric(
        &self,
        ctx: &RequestContext,
        id: LyricId,
        vote: Vote,
    ) -> Result<LyricRecord> {
        let Some(user_id) = ctx.user_id() else {
            return Err(CatalogError::permission_denied(
                "Authentication credentials were not provided.",
            ));
        };

        let mut conn = self.pool.acquire().await?;
        lyrics::apply_vote(&mut conn, id, vote.delta(self.downvote_scoring)).await?;
        tracing::debug!(lyric_id = id, user_id, vote = vote.as_str(), "Vote applied");

        lyrics::get_record(&mut conn, id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Lyric", id))
    }

    async fn random_lyric(&self, filter: &RandomLyricFilter) -> Result<Option<LyricRecord>> {
        let mut conn = self.pool.acquire().await?;
        lyrics::random(&mut conn, filter).await
    }
}

#[async_trait]
impl UserRepository for SqliteCatalog {
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        let mut conn = self.pool.acquire().await?;
        users::create(&mut conn, user).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        let mut conn = self.pool.acquire().await?;
        users::get_all(&mut conn).await
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<(UserId, String)>> {
        let mut conn = self.pool.acquire().await?;
        users::find_credentials(&mut conn, username).await
    }
}
