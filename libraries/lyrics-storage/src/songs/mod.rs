use crate::{albums, artists};
use lyrics_core::{
    error::Result,
    pagination::{Page, PageRequest},
    types::*,
    CatalogError,
};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

pub(crate) const COLUMNS: &str = "s.id AS song_id, s.name AS song_name, s.album_id AS song_album_id";

/// Song with its album and artist, if any
const RECORD_QUERY: &str = "FROM songs s
     LEFT JOIN albums al ON s.album_id = al.id
     LEFT JOIN artists ar ON al.artist_id = ar.id";

/// Map the `song_*` columns of a row
pub(crate) fn from_row(row: &SqliteRow) -> std::result::Result<Song, sqlx::Error> {
    Ok(Song {
        id: row.try_get("song_id")?,
        name: row.try_get("song_name")?,
        album_id: row.try_get("song_album_id")?,
    })
}

fn record_from_row(row: &SqliteRow) -> std::result::Result<SongRecord, sqlx::Error> {
    Ok(SongRecord {
        song: from_row(row)?,
        album: albums::from_row_optional(row)?,
        artist: artists::from_row_optional(row)?,
    })
}

fn select_record() -> String {
    format!(
        "SELECT {}, {}, {} {}",
        COLUMNS,
        albums::COLUMNS,
        artists::COLUMNS,
        RECORD_QUERY
    )
}

pub async fn list(conn: &mut SqliteConnection, page: PageRequest) -> Result<Page<SongRecord>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&mut *conn)
        .await?;

    let rows = sqlx::query(&format!("{} ORDER BY s.id LIMIT ? OFFSET ?", select_record()))
        .bind(page.size)
        .bind(page.offset(total))
        .fetch_all(&mut *conn)
        .await?;

    let results = rows
        .iter()
        .map(record_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Page {
        count: total,
        results,
    })
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: SongId) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM songs s WHERE s.id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

pub async fn get_record(conn: &mut SqliteConnection, id: SongId) -> Result<Option<SongRecord>> {
    let row = sqlx::query(&format!("{} WHERE s.id = ?", select_record()))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(record_from_row).transpose()?)
}

/// Song identified by its natural key within an album
pub async fn find_in_album(
    conn: &mut SqliteConnection,
    name: &str,
    album_id: AlbumId,
) -> Result<Option<Song>> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM songs s WHERE s.name = ? AND s.album_id = ?"
    ))
    .bind(name)
    .bind(album_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

pub async fn get_by_album(conn: &mut SqliteConnection, album_id: AlbumId) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM songs s WHERE s.album_id = ? ORDER BY s.id"
    ))
    .bind(album_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Insert without a prior name check. A taken name surfaces as `Conflict`.
pub(crate) async fn insert(conn: &mut SqliteConnection, song: &CreateSong) -> Result<Song> {
    let result = sqlx::query("INSERT INTO songs (name, album_id) VALUES (?, ?)")
        .bind(&song.name)
        .bind(song.album_id)
        .execute(&mut *conn)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(conn, id)
        .await?
        .ok_or_else(|| CatalogError::Database("Failed to retrieve created song".to_string()))
}

/// Delete a song. Its lyrics cascade.
pub async fn delete(conn: &mut SqliteConnection, id: SongId) -> Result<()> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Song", id));
    }
    Ok(())
}
