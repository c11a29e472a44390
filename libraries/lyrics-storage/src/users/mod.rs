//! User accounts and credential lookup

use lyrics_core::{error::Result, types::*, CatalogError};
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

fn from_row(row: &SqliteRow) -> std::result::Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Create a user
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `user` - Username and an already hashed password
///
/// Fails with `Conflict` when the username is taken.
pub async fn create(conn: &mut SqliteConnection, user: CreateUser) -> Result<User> {
    let result = sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
        .bind(&user.username)
        .bind(&user.password_hash)
        .execute(&mut *conn)
        .await
        .map_err(|e| match CatalogError::from(e) {
            CatalogError::Conflict(_) => {
                CatalogError::conflict(format!("user '{}' already exists", user.username))
            }
            other => other,
        })?;

    let id = result.last_insert_rowid();

    let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref()
        .map(from_row)
        .transpose()?
        .ok_or_else(|| CatalogError::Database("Failed to retrieve created user".to_string()))
}

/// Get all users
pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, created_at FROM users ORDER BY username")
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .iter()
        .map(from_row)
        .collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Get a user's id and password hash for authentication
pub async fn find_credentials(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<(UserId, String)>> {
    let row = sqlx::query("SELECT id, password_hash FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(Some((row.try_get("id")?, row.try_get("password_hash")?))),
        None => Ok(None),
    }
}
