/// Albums API routes
use crate::{
    api::extract::{Id, PageParams, Params, Payload},
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use lyrics_core::{
    payload::{AlbumPayload, NewAlbum},
    views::{AlbumDetail, AlbumSummary},
    AlbumRepository, Page, SongRepository,
};

/// GET /albums
pub async fn list_albums(
    State(app_state): State<AppState>,
    Params(page): Params<PageParams>,
) -> Result<Json<Page<AlbumSummary>>> {
    let page = app_state.pagination.request(page.page, page.size);
    let albums = app_state.db.list_albums(page).await?;
    Ok(Json(albums.map(AlbumSummary::from)))
}

/// POST /albums
/// `artist` is an id or `{name, first_year_active}`
pub async fn create_album(
    State(app_state): State<AppState>,
    Payload(payload): Payload<AlbumPayload>,
) -> Result<(StatusCode, Json<AlbumDetail>)> {
    let album = NewAlbum::try_from(payload)?;
    let record = app_state.db.create_album(album).await?;
    Ok((StatusCode::CREATED, Json(AlbumDetail::new(record, Vec::new()))))
}

/// GET /albums/:id
/// Album with its artist and songs
pub async fn get_album(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumDetail>> {
    let record = app_state
        .db
        .get_album(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;
    let songs = app_state.db.songs_by_album(id).await?;
    Ok(Json(AlbumDetail::new(record, songs)))
}

/// DELETE /albums/:id
pub async fn delete_album(
    Id(id): Id,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    app_state.db.delete_album(id).await?;
    tracing::info!(album_id = id, "Album deleted");
    Ok(StatusCode::NO_CONTENT)
}
