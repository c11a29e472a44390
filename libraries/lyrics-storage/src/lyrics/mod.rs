use crate::{albums, artists, resolve, songs};
use lyrics_core::{
    error::Result,
    filters::{LyricFilter, LyricOrderField, RandomLyricFilter},
    pagination::{Page, PageRequest},
    types::*,
    votes::VoteDelta,
    CatalogError,
};
use rand::Rng;
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection};

const COLUMNS: &str = "l.id AS lyric_id, l.text AS lyric_text, l.song_id AS lyric_song_id, \
                       l.votes AS lyric_votes, l.upvotes AS lyric_upvotes, \
                       l.downvotes AS lyric_downvotes";

/// Lyric with song, album and artist
const RECORD_QUERY: &str = "FROM lyrics l
     JOIN songs s ON l.song_id = s.id
     LEFT JOIN albums al ON s.album_id = al.id
     LEFT JOIN artists ar ON al.artist_id = ar.id";

fn from_row(row: &SqliteRow) -> std::result::Result<Lyric, sqlx::Error> {
    Ok(Lyric {
        id: row.try_get("lyric_id")?,
        text: row.try_get("lyric_text")?,
        song_id: row.try_get("lyric_song_id")?,
        votes: row.try_get("lyric_votes")?,
        upvotes: row.try_get("lyric_upvotes")?,
        downvotes: row.try_get("lyric_downvotes")?,
    })
}

fn record_from_row(row: &SqliteRow) -> std::result::Result<LyricRecord, sqlx::Error> {
    Ok(LyricRecord {
        lyric: from_row(row)?,
        song: songs::from_row(row)?,
        album: albums::from_row_optional(row)?,
        artist: artists::from_row_optional(row)?,
    })
}

fn select_record() -> String {
    format!(
        "SELECT {}, {}, {}, {} {}",
        COLUMNS,
        songs::COLUMNS,
        albums::COLUMNS,
        artists::COLUMNS,
        RECORD_QUERY
    )
}

/// Every search term must appear, case-insensitively, in the lyric text,
/// the song name or the album name.
///
/// Column and term are both folded by `SQLite`'s `lower()`.
fn push_search(query: &mut QueryBuilder<'_, Sqlite>, filter: &LyricFilter) {
    let mut separator = " WHERE ";
    for term in &filter.search_terms {
        query
            .push(separator)
            .push("(instr(lower(l.text), lower(")
            .push_bind(term.clone())
            .push(")) > 0 OR instr(lower(s.name), lower(")
            .push_bind(term.clone())
            .push(")) > 0 OR instr(lower(coalesce(al.name, '')), lower(")
            .push_bind(term.clone())
            .push(")) > 0)");
        separator = " AND ";
    }
}

pub async fn list(
    conn: &mut SqliteConnection,
    filter: &LyricFilter,
    page: PageRequest,
) -> Result<Page<LyricRecord>> {
    let mut count = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) {RECORD_QUERY}"));
    push_search(&mut count, filter);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

    let mut query = QueryBuilder::<Sqlite>::new(select_record());
    push_search(&mut query, filter);

    query.push(" ORDER BY ");
    for (field, direction) in &filter.ordering {
        let column = match field {
            LyricOrderField::Text => "l.text",
            LyricOrderField::SongName => "s.name",
            LyricOrderField::AlbumName => "al.name",
        };
        query.push(column).push(" ").push(direction.as_sql()).push(", ");
    }
    query
        .push("l.id LIMIT ")
        .push_bind(page.size)
        .push(" OFFSET ")
        .push_bind(page.offset(total));

    let rows = query.build().fetch_all(&mut *conn).await?;
    let results = rows
        .iter()
        .map(record_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Page {
        count: total,
        results,
    })
}

pub async fn get_record(conn: &mut SqliteConnection, id: LyricId) -> Result<Option<LyricRecord>> {
    let row = sqlx::query(&format!("{} WHERE l.id = ?", select_record()))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(record_from_row).transpose()?)
}

pub async fn get_by_song(conn: &mut SqliteConnection, song_id: SongId) -> Result<Vec<Lyric>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM lyrics l WHERE l.song_id = ? ORDER BY l.id"
    ))
    .bind(song_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Resolve the song reference and insert the lyric with zeroed counters.
///
/// Run inside a transaction so an implicitly created song is rolled back
/// with a failed insert.
pub async fn create(conn: &mut SqliteConnection, lyric: CreateLyric) -> Result<LyricRecord> {
    let song = resolve::song(conn, &lyric.song).await?;

    let result = sqlx::query("INSERT INTO lyrics (text, song_id) VALUES (?, ?)")
        .bind(&lyric.text)
        .bind(song.id)
        .execute(&mut *conn)
        .await?;

    let id = result.last_insert_rowid();
    tracing::info!(lyric_id = id, song_id = song.id, "Lyric created");

    get_record(conn, id)
        .await?
        .ok_or_else(|| CatalogError::Database("Failed to retrieve created lyric".to_string()))
}

pub async fn update(conn: &mut SqliteConnection, id: LyricId, lyric: UpdateLyric) -> Result<LyricRecord> {
    if get_record(conn, id).await?.is_none() {
        return Err(CatalogError::not_found("Lyric", id));
    }

    let song_id = match &lyric.song {
        Some(reference) => Some(resolve::song(conn, reference).await?.id),
        None => None,
    };

    let mut query_parts = Vec::new();
    if lyric.text.is_some() {
        query_parts.push("text = ?");
    }
    if song_id.is_some() {
        query_parts.push("song_id = ?");
    }

    if !query_parts.is_empty() {
        let query_str = format!("UPDATE lyrics SET {} WHERE id = ?", query_parts.join(", "));
        let mut query = sqlx::query(&query_str);

        if let Some(text) = &lyric.text {
            query = query.bind(text);
        }
        if let Some(song_id) = song_id {
            query = query.bind(song_id);
        }

        query.bind(id).execute(&mut *conn).await?;
    }

    get_record(conn, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Lyric", id))
}

pub async fn delete(conn: &mut SqliteConnection, id: LyricId) -> Result<()> {
    let result = sqlx::query("DELETE FROM lyrics WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Lyric", id));
    }
    Ok(())
}

/// Add a vote delta to the counters in a single statement.
///
/// The addition happens in the datastore, so concurrent votes never
/// overwrite each other.
pub async fn apply_vote(conn: &mut SqliteConnection, id: LyricId, delta: VoteDelta) -> Result<()> {
    let result = sqlx::query(
        "UPDATE lyrics
         SET votes = votes + ?, upvotes = upvotes + ?, downvotes = downvotes + ?
         WHERE id = ?",
    )
    .bind(delta.votes)
    .bind(delta.upvotes)
    .bind(delta.downvotes)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Lyric", id));
    }
    Ok(())
}

fn push_random_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &RandomLyricFilter) {
    let mut separator = " WHERE ";
    if let Some(name) = &filter.artist_name {
        query
            .push(separator)
            .push("instr(lower(ar.name), lower(")
            .push_bind(name.clone())
            .push(")) > 0");
        separator = " AND ";
    }
    if let Some(artist_id) = filter.artist_id {
        query.push(separator).push("ar.id = ").push_bind(artist_id);
    }
}

/// Pick one matching lyric uniformly at random.
///
/// Counts the candidates and draws an index, so every match has the same
/// probability regardless of how the datastore implements `RANDOM()`.
pub async fn random(
    conn: &mut SqliteConnection,
    filter: &RandomLyricFilter,
) -> Result<Option<LyricRecord>> {
    let mut count = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) {RECORD_QUERY}"));
    push_random_filter(&mut count, filter);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

    if total == 0 {
        return Ok(None);
    }

    let index = rand::thread_rng().gen_range(0..total);

    let mut query = QueryBuilder::<Sqlite>::new(select_record());
    push_random_filter(&mut query, filter);
    query.push(" ORDER BY l.id LIMIT 1 OFFSET ").push_bind(index);

    let row = query.build().fetch_optional(&mut *conn).await?;
    Ok(row.as_ref().map(record_from_row).transpose()?)
}
