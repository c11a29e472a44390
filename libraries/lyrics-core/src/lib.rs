//! Lyrics Catalog Core
//!
//! Datastore-agnostic domain types, validation and presentation for the
//! lyrics catalog: artists, albums, songs and community-voted lyrics.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Artist`, `Album`, `Song`, `Lyric`, `User`
//! - **Payloads**: request bodies parsed into id-or-inline references
//! - **Repository Traits**: one per entity, implemented by storage crates
//! - **Views**: explicit list/detail response shapes
//! - **Error Handling**: unified `CatalogError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lyrics_core::payload::{LyricPayload, SongRef};
//! use lyrics_core::types::CreateLyric;
//!
//! let payload: LyricPayload = serde_json::from_str(
//!     r#"{"text": "la la la", "song": {"name": "Blank Space", "album": 1}}"#,
//! ).unwrap();
//! let lyric = CreateLyric::try_from(payload).unwrap();
//! assert!(matches!(lyric.song, SongRef::Inline { album_id: 1, .. }));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod filters;
pub mod pagination;
pub mod payload;
pub mod storage;
pub mod types;
pub mod views;
pub mod votes;

// Re-export commonly used types
pub use error::{CatalogError, FieldErrors, Result};
pub use pagination::{Page, PageRequest};
pub use storage::{
    AlbumRepository, ArtistRepository, Catalog, LyricRepository, RequestContext, SongRepository,
    UserRepository,
};
pub use types::{
    Album, AlbumId, AlbumRecord, Artist, ArtistId, CreateAlbum, CreateArtist, CreateLyric,
    CreateSong, CreateUser, Lyric, LyricId, LyricRecord, Song, SongId, SongRecord, UpdateArtist,
    UpdateLyric, User, UserId,
};
pub use votes::{DownvoteScoring, Vote};
