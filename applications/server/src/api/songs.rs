/// Songs API routes
use crate::{
    api::extract::{Id, PageParams, Params},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use lyrics_core::{
    views::{SongDetail, SongListItem},
    LyricRepository, Page, SongRepository,
};

/// GET /songs
pub async fn list_songs(
    State(app_state): State<AppState>,
    Params(page): Params<PageParams>,
) -> Result<Json<Page<SongListItem>>> {
    let page = app_state.pagination.request(page.page, page.size);
    let songs = app_state.db.list_songs(page).await?;
    Ok(Json(songs.map(SongListItem::from)))
}

/// GET /songs/:id
/// Song with album, artist and lyrics
pub async fn get_song(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<Json<SongDetail>> {
    let record = app_state
        .db
        .get_song(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Song not found".to_string()))?;
    let lyrics = app_state.db.lyrics_by_song(id).await?;
    Ok(Json(SongDetail::new(record, lyrics)))
}

/// DELETE /songs/:id
pub async fn delete_song(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.db.delete_song(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
