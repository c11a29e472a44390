use lyrics_core::{
    error::Result,
    filters::{ArtistFilter, ArtistOrderField},
    pagination::{Page, PageRequest},
    types::*,
    CatalogError,
};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection};

pub(crate) const COLUMNS: &str = "ar.id AS artist_id, ar.name AS artist_name, \
                                  ar.first_year_active AS artist_first_year_active";

/// Map the `artist_*` columns of a row
pub(crate) fn from_row(row: &SqliteRow) -> std::result::Result<Artist, sqlx::Error> {
    Ok(Artist {
        id: row.try_get("artist_id")?,
        name: row.try_get("artist_name")?,
        first_year_active: row.try_get("artist_first_year_active")?,
    })
}

/// Same as `from_row` for a LEFT JOIN that may not have matched
pub(crate) fn from_row_optional(row: &SqliteRow) -> std::result::Result<Option<Artist>, sqlx::Error> {
    match row.try_get::<Option<ArtistId>, _>("artist_id")? {
        Some(_) => from_row(row).map(Some),
        None => Ok(None),
    }
}

fn push_filters(query: &mut QueryBuilder<'_, Sqlite>, filter: &ArtistFilter) {
    let mut separator = " WHERE ";
    if let Some(lt) = filter.first_year_active_lt {
        query.push(separator).push("ar.first_year_active < ").push_bind(lt);
        separator = " AND ";
    }
    if let Some(gt) = filter.first_year_active_gt {
        query.push(separator).push("ar.first_year_active > ").push_bind(gt);
        separator = " AND ";
    }
    if let Some(name) = &filter.name {
        query.push(separator).push("ar.name = ").push_bind(name.clone());
        separator = " AND ";
    }
    if let Some(fragment) = &filter.name_contains {
        query
            .push(separator)
            .push("instr(ar.name, ")
            .push_bind(fragment.clone())
            .push(") > 0");
    }
}

pub async fn list(
    conn: &mut SqliteConnection,
    filter: &ArtistFilter,
    page: PageRequest,
) -> Result<Page<Artist>> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM artists ar");
    push_filters(&mut count, filter);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM artists ar"));
    push_filters(&mut query, filter);

    query.push(" ORDER BY ");
    for (field, direction) in &filter.ordering {
        let column = match field {
            ArtistOrderField::Name => "ar.name",
            ArtistOrderField::FirstYearActive => "ar.first_year_active",
        };
        query.push(column).push(" ").push(direction.as_sql()).push(", ");
    }
    query
        .push("ar.id LIMIT ")
        .push_bind(page.size)
        .push(" OFFSET ")
        .push_bind(page.offset(total));

    let rows = query.build().fetch_all(&mut *conn).await?;
    let results = rows
        .iter()
        .map(from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Page {
        count: total,
        results,
    })
}

pub async fn get_by_id(conn: &mut SqliteConnection, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM artists ar WHERE ar.id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM artists ar WHERE ar.name = ?"))
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(row.as_ref().map(from_row).transpose()?)
}

/// Insert without a prior name check. A taken name surfaces as `Conflict`.
pub(crate) async fn insert(conn: &mut SqliteConnection, artist: &CreateArtist) -> Result<Artist> {
    let result = sqlx::query("INSERT INTO artists (name, first_year_active) VALUES (?, ?)")
        .bind(&artist.name)
        .bind(artist.first_year_active)
        .execute(&mut *conn)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(conn, id)
        .await?
        .ok_or_else(|| CatalogError::Database("Failed to retrieve created artist".to_string()))
}

/// Create an artist, rejecting a name that is already taken
pub async fn create(conn: &mut SqliteConnection, artist: CreateArtist) -> Result<Artist> {
    if find_by_name(conn, &artist.name).await?.is_some() {
        return Err(name_taken());
    }
    insert(conn, &artist).await
}

pub async fn update(conn: &mut SqliteConnection, id: ArtistId, artist: UpdateArtist) -> Result<Artist> {
    let existing = get_by_id(conn, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Artist", id))?;

    if artist.is_empty() {
        return Ok(existing);
    }

    if let Some(name) = &artist.name {
        if let Some(other) = find_by_name(conn, name).await? {
            if other.id != id {
                return Err(name_taken());
            }
        }
    }

    let mut query_parts = Vec::new();
    if artist.name.is_some() {
        query_parts.push("name = ?");
    }
    if artist.first_year_active.is_some() {
        query_parts.push("first_year_active = ?");
    }

    let query_str = format!("UPDATE artists SET {} WHERE id = ?", query_parts.join(", "));
    let mut query = sqlx::query(&query_str);

    if let Some(name) = &artist.name {
        query = query.bind(name);
    }
    if let Some(first_year_active) = artist.first_year_active {
        query = query.bind(first_year_active);
    }

    query.bind(id).execute(&mut *conn).await?;

    get_by_id(conn, id)
        .await?
        .ok_or_else(|| CatalogError::not_found("Artist", id))
}

/// Delete an artist. Albums, songs and lyrics below it cascade.
pub async fn delete(conn: &mut SqliteConnection, id: ArtistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::not_found("Artist", id));
    }
    Ok(())
}

fn name_taken() -> CatalogError {
    CatalogError::field("name", "artist with this name already exists.")
}
