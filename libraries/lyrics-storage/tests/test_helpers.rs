//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so every pooled connection sees the same schema, constraints and cascades.

#![allow(dead_code)]

use lyrics_core::payload::{ArtistRef, NewAlbum, SongRef};
use lyrics_core::types::*;
use lyrics_core::{AlbumRepository, ArtistRepository, LyricRepository};
use lyrics_storage::SqliteCatalog;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub catalog: SqliteCatalog,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = lyrics_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        lyrics_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            catalog: SqliteCatalog::new(pool),
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.catalog.pool()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.pool())
            .await
            .expect("Failed to count rows")
    }
}

/// Test fixture: Create an artist
pub async fn create_test_artist(db: &TestDb, name: &str, first_year_active: i32) -> Artist {
    db.catalog
        .create_artist(CreateArtist {
            name: name.to_string(),
            first_year_active: Some(first_year_active),
        })
        .await
        .expect("Failed to create test artist")
}

/// Test fixture: Create an album for an existing artist
pub async fn create_test_album(db: &TestDb, name: &str, year: i32, artist_id: ArtistId) -> Album {
    db.catalog
        .create_album(NewAlbum {
            name: name.to_string(),
            year,
            artist: ArtistRef::Id(artist_id),
        })
        .await
        .expect("Failed to create test album")
        .album
}

/// Test fixture: Create a lyric, creating its song inside `album_id` if needed
pub async fn create_test_lyric(db: &TestDb, text: &str, song: &str, album_id: AlbumId) -> LyricRecord {
    db.catalog
        .create_lyric(CreateLyric {
            text: text.to_string(),
            song: SongRef::Inline {
                name: song.to_string(),
                album_id,
            },
        })
        .await
        .expect("Failed to create test lyric")
}

/// Test fixture: One artist, one album, one song with one lyric
pub async fn seed_catalog(db: &TestDb) -> LyricRecord {
    let artist = create_test_artist(db, "Taylor Swift", 2004).await;
    let album = create_test_album(db, "1989", 2014, artist.id).await;
    create_test_lyric(db, "Cause the players gonna play", "Shake It Off", album.id).await
}
