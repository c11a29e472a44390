use crate::{artists, resolve};
use lyrics_core::{
    error::Result,
    pagination::{Page, PageRequest},
    payload::NewAlbum,
    types::*,
    CatalogError,
};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

pub(crate) const COLUMNS: &str = "al.id AS album_id, al.name AS album_name, \
                                  al.year AS album_year, al.artist_id AS album_artist_id";

/// Map the `album_*` columns of a row
pub(crate) fn from_row(row: &SqliteRow) -> std::result::Result<Album, sqlx::Error> {
    Ok(Album {
        id: row.try_get("album_id")?,
        name: row.try_get("album_name")?,
        year: row.try_get("album_year")?,
        artist_id: row.try_get("album_artist_id")?,
    })
}

pub(crate) fn from_row_optional(row: &SqliteRow) -> std::result::Result<Option<Album>, sqlx::Error> {
    match row.try_get::<Option<AlbumId>, _>("album_id")? {
        Some(_) => from_row(row).map(Some),
        None => Ok(None),
    }
}

pub async fn list(conn: &mut SqliteConnection, page: PageRequest) -> Result<Page<Album>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM albums")
        .fetch_one(&mut *conn)
        .await?;

    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM albums al ORDER BY al.id LIMIT ? OFFSET ?"
    ))
    .bind(page.size)
    .bind(page.offset(total))
    .fetch_all(&mut *conn)
    .await?;

    let results = rows
        .iter()
        .map(from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Page {
        count: total,
        results,
    })
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM albums al WHERE al.id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

/// Album joined with its artist
pub async fn get_record(conn: &mut SqliteConnection, id: AlbumId) -> Result<Option<AlbumRecord>> {
    let row = sqlx::query(&format!(
        "SELECT {}, {}
         FROM albums al
         JOIN artists ar ON al.artist_id = ar.id
         WHERE al.id = ?",
        COLUMNS,
        artists::COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(AlbumRecord {
        album: from_row(&row)?,
        artist: artists::from_row(&row)?,
    }))
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Album>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM albums al WHERE al.name = ?"))
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

pub async fn get_by_artist(conn: &mut SqliteConnection, artist_id: ArtistId) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM albums al WHERE al.artist_id = ? ORDER BY al.year, al.name"
    ))
    .bind(artist_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

pub(crate) async fn insert(conn: &mut SqliteConnection, album: &CreateAlbum) -> Result<Album> {
    let result = sqlx::query("INSERT INTO albums (name, year, artist_id) VALUES (?, ?, ?)")
        .bind(&album.name)
        .bind(album.year)
        .bind(album.artist_id)
        .execute(&mut *conn)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(conn, id)
        .await?
        .ok_or_else(|| CatalogError::Database("Failed to retrieve created album".to_string()))
}

/// Resolve the artist reference and insert the album.
///
/// Run inside a transaction: an implicitly created artist must not outlive
/// a failed album insert.
pub async fn create(conn: &mut SqliteConnection, album: NewAlbum) -> Result<AlbumRecord> {
    if find_by_name(conn, &album.name).await?.is_some() {
        return Err(CatalogError::field(
            "name",
            "album with this name already exists.",
        ));
    }

    let artist = resolve::artist(conn, &album.artist).await?;

    let created = insert(
        conn,
        &CreateAlbum {
            name: album.name,
            year: album.year,
            artist_id: artist.id,
        },
    )
    .await?;

    tracing::info!(album_id = created.id, artist_id = artist.id, "Album created");

    Ok(AlbumRecord {
        album: created,
        artist,
    })
}

/// Delete an album. Songs and lyrics below it cascade.
pub async fn delete(conn: &mut SqliteConnection, id: AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Album", id));
    }
    Ok(())
}
