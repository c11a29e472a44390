//! Id-or-inline reference resolution.
//!
//! Inline references are matched on their natural key (artist name, song
//! name within an album) and created only when nothing matches. The unique
//! constraints decide concurrent creations: the losing insert re-runs the
//! lookup and reuses the winner's row, or reports a conflict.
//!
//! Callers run these inside the transaction that inserts the dependent row.

use crate::{albums, artists, songs};
use lyrics_core::{
    error::Result,
    payload::{ArtistRef, SongRef, REQUIRED},
    types::*,
    CatalogError,
};
use sqlx::SqliteConnection;

/// Resolve the `artist` of an album payload
pub async fn artist(conn: &mut SqliteConnection, reference: &ArtistRef) -> Result<Artist> {
    match reference {
        ArtistRef::Id(id) => artists::get_by_id(conn, *id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Artist", id)),
        ArtistRef::Inline {
            name,
            first_year_active,
        } => {
            if let Some(existing) = artists::find_by_name(conn, name).await? {
                tracing::debug!(artist_id = existing.id, "Reusing artist by name");
                return Ok(existing);
            }

            // Only a new artist needs its first year
            let Some(first_year_active) = first_year_active else {
                return Err(CatalogError::field("artist.first_year_active", REQUIRED));
            };

            let create = CreateArtist {
                name: name.clone(),
                first_year_active: Some(*first_year_active),
            };
            match artists::insert(conn, &create).await {
                Ok(created) => {
                    tracing::info!(artist_id = created.id, "Artist created from album payload");
                    Ok(created)
                }
                Err(CatalogError::Conflict(_)) => artists::find_by_name(conn, name)
                    .await?
                    .ok_or_else(|| {
                        CatalogError::conflict(format!("artist '{name}' was created concurrently"))
                    }),
                Err(e) => Err(e),
            }
        }
    }
}

/// Resolve the `song` of a lyric payload
pub async fn song(conn: &mut SqliteConnection, reference: &SongRef) -> Result<Song> {
    match reference {
        SongRef::Id(id) => songs::get_by_id(conn, *id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Song", id)),
        SongRef::Inline { name, album_id } => {
            if albums::get_by_id(conn, *album_id).await?.is_none() {
                return Err(CatalogError::field(
                    "song.album",
                    format!("Invalid pk \"{album_id}\" - object does not exist."),
                ));
            }

            if let Some(existing) = songs::find_in_album(conn, name, *album_id).await? {
                tracing::debug!(song_id = existing.id, "Reusing song by name and album");
                return Ok(existing);
            }

            let create = CreateSong {
                name: name.clone(),
                album_id: *album_id,
            };
            match songs::insert(conn, &create).await {
                Ok(created) => {
                    tracing::info!(song_id = created.id, "Song created from lyric payload");
                    Ok(created)
                }
                Err(CatalogError::Conflict(_)) => songs::find_in_album(conn, name, *album_id)
                    .await?
                    .ok_or_else(|| {
                        CatalogError::conflict(format!(
                            "a song named '{name}' already exists in another album"
                        ))
                    }),
                Err(e) => Err(e),
            }
        }
    }
}
